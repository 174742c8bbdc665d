use tracing::{debug, info};

use super::MatchFlowService;
use crate::domain::game_transition::{
    derive_match_transitions, MatchLifecycleView, MatchTransition,
};
use crate::domain::state::GameState;
use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct MatchMutationResult {
    pub state: GameState,
    pub transitions: Vec<MatchTransition>,
}

impl MatchFlowService {
    /// Persist a mutated state and derive what changed.
    ///
    /// `after` is written back before settlement runs, so an outcome is
    /// stored even if every settlement step fails. Callers hold the lock.
    pub(super) async fn commit(
        &self,
        before: &MatchLifecycleView,
        mut after: GameState,
    ) -> Result<MatchMutationResult, AppError> {
        self.store.put(after.clone()).await?;

        if after.is_ended() && !after.is_settled() {
            self.drive_settlement(&mut after).await?;
        }

        let after_view = MatchLifecycleView::of(&after);
        let transitions = derive_match_transitions(before, &after_view);
        for transition in &transitions {
            log_transition(after.match_id, transition);
        }

        Ok(MatchMutationResult {
            state: after,
            transitions,
        })
    }
}

fn log_transition(match_id: i64, transition: &MatchTransition) {
    match transition {
        MatchTransition::TurnBecame { side } => {
            debug!(match_id, side = side.as_str(), "Turn passed");
        }
        MatchTransition::RoundStarted { round_no } => {
            info!(match_id, round_no, "Round started");
        }
        MatchTransition::DuckSnared => {
            debug!(match_id, "Duck snared");
        }
        MatchTransition::MatchEnded { outcome } => {
            info!(
                match_id,
                winner = outcome.winner.as_str(),
                reason = outcome.reason.as_str(),
                "Match ended"
            );
        }
        MatchTransition::SettlementCompleted => {
            info!(match_id, "Settlement completed");
        }
    }
}
