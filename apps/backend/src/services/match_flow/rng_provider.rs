//! Per-match seeds and the RNG streams derived from them.

use std::sync::Arc;

use crate::config::engine::EngineConfig;
use crate::domain::rng::{derive_action_seed, derive_setup_seed, ChaChaRoundRng};
use crate::domain::state::{GameState, MatchId};

/// Chooses the base seed of a new match.
pub trait SeedSource: Send + Sync {
    fn match_seed(&self, match_id: MatchId) -> u64;
}

/// Fresh OS-backed entropy for every match.
#[derive(Debug, Default, Clone, Copy)]
pub struct EntropySeeds;

impl SeedSource for EntropySeeds {
    fn match_seed(&self, _match_id: MatchId) -> u64 {
        rand::random::<u64>()
    }
}

/// Reproducible seeds: the configured base offset by the match id.
#[derive(Debug, Clone, Copy)]
pub struct FixedSeeds(pub u64);

impl SeedSource for FixedSeeds {
    fn match_seed(&self, match_id: MatchId) -> u64 {
        self.0.wrapping_add(match_id as u64)
    }
}

pub(super) fn seed_source_for(config: &EngineConfig) -> Arc<dyn SeedSource> {
    match config.rng_seed {
        Some(seed) => Arc::new(FixedSeeds(seed)),
        None => Arc::new(EntropySeeds),
    }
}

pub(super) fn setup_rng(match_seed: u64, round_no: u32) -> ChaChaRoundRng {
    ChaChaRoundRng::from_seed(derive_setup_seed(match_seed, round_no))
}

/// Stream for the next action of `state`'s round.
pub(super) fn action_rng(state: &GameState) -> ChaChaRoundRng {
    ChaChaRoundRng::from_seed(derive_action_seed(
        state.rng_seed,
        state.round_no,
        state.action_seq,
    ))
}
