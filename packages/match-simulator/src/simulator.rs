//! Drives matches through `MatchFlowService` with random legal moves.

use std::sync::Arc;

use hunt_backend::adapters::memory::{MemoryLobby, MemoryMatchHistory, MemoryPlayerStore};
use hunt_backend::domain::actions::Action;
use hunt_backend::domain::legal::legal_actions;
use hunt_backend::domain::perks::PerkId;
use hunt_backend::domain::state::{EndReason, GameState, Gold, MatchId, PlayerId, Side};
use hunt_backend::repos::MatchSeating;
use hunt_backend::{
    AppError, EngineConfig, InMemoryMatchStore, MatchFlowDeps, MatchFlowService,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

const HUNTER: PlayerId = 1;
const DUCK: PlayerId = 2;
/// Large enough that bets never exhaust either purse.
const START_GOLD: Gold = 1_000_000_000;
/// Actions after which the Hunter stops scanning and only shoots.
const PATIENCE: u32 = 200;

pub struct SimulationOptions {
    pub level: u8,
    pub bet: Gold,
    pub hunter_perks: Vec<PerkId>,
    pub duck_perks: Vec<PerkId>,
    pub seed: Option<u64>,
}

/// What one finished match looked like.
#[derive(Debug, Clone)]
pub struct MatchResult {
    pub winner: Side,
    pub reason: EndReason,
    pub shots: u32,
    pub actions: u32,
}

pub struct Simulator {
    service: MatchFlowService,
    players: Arc<MemoryPlayerStore>,
    lobby: Arc<MemoryLobby>,
    options: SimulationOptions,
    chooser: StdRng,
}

impl Simulator {
    pub fn new(config: EngineConfig, options: SimulationOptions) -> Self {
        let players = Arc::new(
            MemoryPlayerStore::new()
                .with_player(HUNTER, START_GOLD)
                .with_player(DUCK, START_GOLD),
        );
        for perk in &options.hunter_perks {
            players.grant(HUNTER, *perk, 1);
        }
        for perk in &options.duck_perks {
            players.grant(DUCK, *perk, 1);
        }

        let lobby = Arc::new(MemoryLobby::new());
        let deps = MatchFlowDeps {
            store: Arc::new(InMemoryMatchStore::new()),
            players: players.clone(),
            history: Arc::new(MemoryMatchHistory::new()),
            lobby: lobby.clone(),
        };
        let chooser = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            service: MatchFlowService::new(deps, config),
            players,
            lobby,
            options,
            chooser,
        }
    }

    /// Seat, initialize and play one match to its outcome.
    pub async fn play(&mut self, match_id: MatchId) -> Result<MatchResult, AppError> {
        self.lobby.seat(MatchSeating {
            match_id,
            hunter_id: HUNTER,
            duck_id: DUCK,
            hunter_bet: self.options.bet,
            duck_bet: self.options.bet,
            level: self.options.level,
        });

        let mut state = self.service.initialize_round(match_id).await?;
        let mut actions = 0u32;

        while let Some(side) = state.phase.actor() {
            let action = self.choose(&state, side, actions);
            let actor = state.player_for(side);
            debug!(match_id, actor, action = action.kind().as_str(), "Simulated move");
            state = self.service.apply_action(match_id, actor, action).await?.state;
            actions += 1;
        }

        let Some(outcome) = state.outcome else {
            return Err(AppError::internal(format!(
                "Match {match_id} left the loop without an outcome"
            )));
        };

        Ok(MatchResult {
            winner: outcome.winner,
            reason: outcome.reason,
            shots: state.shot_cells.len() as u32,
            actions,
        })
    }

    /// Net gold change of (Hunter, Duck) since the simulator started.
    pub fn gold_deltas(&self) -> (Gold, Gold) {
        let delta = |player| self.players.balance(player).unwrap_or(START_GOLD) - START_GOLD;
        (delta(HUNTER), delta(DUCK))
    }

    fn choose(&mut self, state: &GameState, side: Side, taken: u32) -> Action {
        let mut menu = legal_actions(state);
        if side == Side::Hunter
            && taken >= PATIENCE
            && menu.iter().any(|a| matches!(a, Action::Shoot { .. }))
        {
            menu.retain(|a| matches!(a, Action::Shoot { .. }));
        }
        // The engine always offers at least one move to the side on turn.
        match menu.len() {
            0 => Action::Stay,
            n => menu.swap_remove(self.chooser.random_range(0..n)),
        }
    }
}
