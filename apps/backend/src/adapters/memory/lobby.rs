use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::Availability;
use crate::domain::state::MatchId;
use crate::errors::domain::DomainError;
use crate::repos::lobby::{LobbyDirectory, MatchSeating};

#[derive(Debug, Default)]
pub struct MemoryLobby {
    seatings: Mutex<HashMap<MatchId, MatchSeating>>,
    availability: Availability,
}

impl MemoryLobby {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seat (or re-seat) the players of `seating.match_id`.
    pub fn seat(&self, seating: MatchSeating) {
        self.seatings.lock().insert(seating.match_id, seating);
    }

    pub fn set_available(&self, available: bool) {
        self.availability.set(available);
    }
}

#[async_trait]
impl LobbyDirectory for MemoryLobby {
    async fn seating(&self, match_id: MatchId) -> Result<Option<MatchSeating>, DomainError> {
        self.availability.check("lobby")?;
        Ok(self.seatings.lock().get(&match_id).copied())
    }
}
