//! Match flow service: the command/query surface over the rules engine.
//!
//! Every command takes the per-match lock, works on a copy of the stored
//! state, writes it back on success and, when the round has just ended,
//! drives settlement against the collaborators before returning.

mod mutation;
mod player_actions;
mod purchases;
mod rng_provider;
mod round_lifecycle;
mod settlement;

use std::sync::Arc;

pub use mutation::MatchMutationResult;
pub use player_actions::ActionResult;
pub use rng_provider::{EntropySeeds, FixedSeeds, SeedSource};

use crate::config::engine::EngineConfig;
use crate::domain::state::{GameState, MatchId};
use crate::error::AppError;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::{LobbyDirectory, MatchHistory, PlayerStore};
use crate::store::{MatchLocks, MatchStore};

/// Collaborators the service is wired to.
#[derive(Clone)]
pub struct MatchFlowDeps {
    pub store: Arc<dyn MatchStore>,
    pub players: Arc<dyn PlayerStore>,
    pub history: Arc<dyn MatchHistory>,
    pub lobby: Arc<dyn LobbyDirectory>,
}

pub struct MatchFlowService {
    store: Arc<dyn MatchStore>,
    players: Arc<dyn PlayerStore>,
    history: Arc<dyn MatchHistory>,
    lobby: Arc<dyn LobbyDirectory>,
    seeds: Arc<dyn SeedSource>,
    locks: MatchLocks,
    config: EngineConfig,
}

impl MatchFlowService {
    pub fn new(deps: MatchFlowDeps, config: EngineConfig) -> Self {
        let seeds = rng_provider::seed_source_for(&config);
        Self {
            store: deps.store,
            players: deps.players,
            history: deps.history,
            lobby: deps.lobby,
            seeds,
            locks: MatchLocks::new(),
            config,
        }
    }

    /// Replace the source of per-match seeds.
    pub fn with_seed_source(mut self, seeds: Arc<dyn SeedSource>) -> Self {
        self.seeds = seeds;
        self
    }

    /// Current state of a match, `None` if it was never initialized.
    pub async fn get_state(&self, match_id: MatchId) -> Result<Option<GameState>, AppError> {
        Ok(self.store.get(match_id).await?)
    }

    /// Load a match that must exist. Callers hold the match lock.
    async fn require_state(&self, match_id: MatchId) -> Result<GameState, AppError> {
        self.store.get(match_id).await?.ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Match, format!("Match {match_id} not found"))
                .into()
        })
    }
}
