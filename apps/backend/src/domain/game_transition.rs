use crate::domain::state::{GameState, Outcome, Phase, Side};

/// The slice of a match the lifecycle transitions are derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchLifecycleView {
    pub round_no: u32,
    pub phase: Phase,
    pub outcome: Option<Outcome>,
    pub snared_turns: u8,
    pub settled: bool,
}

impl MatchLifecycleView {
    pub fn of(state: &GameState) -> Self {
        Self {
            round_no: state.round_no,
            phase: state.phase,
            outcome: state.outcome,
            snared_turns: state.duck_snared_turns,
            settled: state.is_settled() && state.outcome.is_some(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchTransition {
    /// Edge-triggered: the turn passed to a side.
    TurnBecame { side: Side },

    /// Edge-triggered: a fresh round replaced the previous one.
    RoundStarted { round_no: u32 },

    /// Edge-triggered: the Duck walked into a trap.
    DuckSnared,

    /// Edge-triggered: live -> ended.
    MatchEnded { outcome: Outcome },

    /// Edge-triggered: every settlement step has now been applied.
    SettlementCompleted,
}

/// Derive transitions from before/after lifecycle views.
pub fn derive_match_transitions(
    before: &MatchLifecycleView,
    after: &MatchLifecycleView,
) -> Vec<MatchTransition> {
    let mut transitions = Vec::new();

    if after.round_no != before.round_no {
        transitions.push(MatchTransition::RoundStarted {
            round_no: after.round_no,
        });
    }

    if before.phase != after.phase || after.round_no != before.round_no {
        if let Some(side) = after.phase.actor() {
            transitions.push(MatchTransition::TurnBecame { side });
        }
    }

    if before.snared_turns == 0 && after.snared_turns > 0 {
        transitions.push(MatchTransition::DuckSnared);
    }

    if let (None, Some(outcome)) = (before.outcome, after.outcome) {
        transitions.push(MatchTransition::MatchEnded { outcome });
    }

    if !before.settled && after.settled {
        transitions.push(MatchTransition::SettlementCompleted);
    }

    transitions
}
