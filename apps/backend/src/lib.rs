#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

//! Hunter vs Duck: authoritative turn engine and settlement.
//!
//! `domain` holds the pure rules. `services::match_flow::MatchFlowService`
//! wraps them with storage, per-match locking and the collaborator calls
//! defined in `repos`.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod repos;
pub mod services;
pub mod store;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use config::engine::EngineConfig;
pub use error::AppError;
pub use errors::ErrorCode;
pub use services::match_flow::{ActionResult, MatchFlowDeps, MatchFlowService};
pub use store::{InMemoryMatchStore, MatchStore};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
