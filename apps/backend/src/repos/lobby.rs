//! Lobby contract: who plays which role in a match, for how much.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::state::{Gold, MatchId, PlayerId};
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSeating {
    pub match_id: MatchId,
    pub hunter_id: PlayerId,
    pub duck_id: PlayerId,
    pub hunter_bet: Gold,
    pub duck_bet: Gold,
    pub level: u8,
}

#[async_trait]
pub trait LobbyDirectory: Send + Sync {
    /// Seating for `match_id`, `None` when the lobby does not know the match.
    async fn seating(&self, match_id: MatchId) -> Result<Option<MatchSeating>, DomainError>;
}
