//! In-memory collaborators.
//!
//! Used by the simulator and the integration tests. Each adapter can be
//! switched off with `set_available(false)`, after which every call fails
//! with `InfraErrorKind::StoreUnavailable`.

mod history;
mod lobby;
mod players;

use std::sync::atomic::{AtomicBool, Ordering};

pub use history::MemoryMatchHistory;
pub use lobby::MemoryLobby;
pub use players::{MemoryPlayerStore, PlayerRecord};

use crate::errors::domain::{DomainError, InfraErrorKind};

#[derive(Debug)]
struct Availability(AtomicBool);

impl Default for Availability {
    fn default() -> Self {
        Self(AtomicBool::new(true))
    }
}

impl Availability {
    fn set(&self, available: bool) {
        self.0.store(available, Ordering::SeqCst);
    }

    fn check(&self, what: &str) -> Result<(), DomainError> {
        if self.0.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(DomainError::infra(
                InfraErrorKind::StoreUnavailable,
                format!("{what} is unavailable"),
            ))
        }
    }
}
