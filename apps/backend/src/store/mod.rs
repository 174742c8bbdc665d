//! Match state storage and the per-match lock registry.

mod locks;
mod memory;

use async_trait::async_trait;

pub use locks::MatchLocks;
pub use memory::InMemoryMatchStore;

use crate::domain::state::{GameState, MatchId};
use crate::errors::domain::DomainError;

/// Keyed registry of live match states.
///
/// Callers serialize read-modify-write sequences through [`MatchLocks`];
/// the store itself only needs atomic single-key operations.
#[async_trait]
pub trait MatchStore: Send + Sync {
    async fn get(&self, match_id: MatchId) -> Result<Option<GameState>, DomainError>;

    async fn put(&self, state: GameState) -> Result<(), DomainError>;

    /// Remove a match; returns whether it existed.
    async fn delete(&self, match_id: MatchId) -> Result<bool, DomainError>;
}
