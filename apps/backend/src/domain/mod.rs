//! Domain layer: pure game rules, no I/O.

pub mod actions;
pub mod game_transition;
pub mod legal;
pub mod levels;
pub mod perks;
pub mod rng;
pub mod settlement;
pub mod setup;
pub mod shop;
pub mod state;
pub mod turns;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod test_prelude;
#[cfg(test)]
pub(crate) mod test_state_helpers;
#[cfg(test)]
mod tests_props_setup;
#[cfg(test)]
mod tests_props_turns;
#[cfg(test)]
mod tests_scenarios;
#[cfg(test)]
mod tests_setup;

// Re-exports for ergonomics
pub use actions::{Action, ActionKind, ActionReport, Finding, LastAction, ShotEffect};
pub use legal::legal_actions;
pub use levels::{level_def, LevelDef, LEVELS};
pub use perks::PerkId;
pub use rng::{derive_action_seed, derive_setup_seed, ChaChaRoundRng, RoundRng, ScriptedRng};
pub use settlement::{SettlementLedger, SettlementPlan, SettlementRules, SettlementStep};
pub use state::{Cell, EndReason, GameState, Gold, MatchId, Outcome, Phase, PlayerId, Side};
