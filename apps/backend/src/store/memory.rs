use async_trait::async_trait;
use dashmap::DashMap;

use super::MatchStore;
use crate::domain::state::{GameState, MatchId};
use crate::errors::domain::DomainError;

#[derive(Debug, Default)]
pub struct InMemoryMatchStore {
    matches: DashMap<MatchId, GameState>,
}

impl InMemoryMatchStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

#[async_trait]
impl MatchStore for InMemoryMatchStore {
    async fn get(&self, match_id: MatchId) -> Result<Option<GameState>, DomainError> {
        Ok(self.matches.get(&match_id).map(|entry| entry.value().clone()))
    }

    async fn put(&self, state: GameState) -> Result<(), DomainError> {
        self.matches.insert(state.match_id, state);
        Ok(())
    }

    async fn delete(&self, match_id: MatchId) -> Result<bool, DomainError> {
        Ok(self.matches.remove(&match_id).is_some())
    }
}
