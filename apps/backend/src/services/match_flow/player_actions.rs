use time::OffsetDateTime;
use tracing::debug;

use super::rng_provider::action_rng;
use super::MatchFlowService;
use crate::domain::actions::{Action, ActionReport};
use crate::domain::game_transition::{MatchLifecycleView, MatchTransition};
use crate::domain::state::{GameState, MatchId, PlayerId};
use crate::domain::turns::{apply_action, record_action};
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone)]
pub struct ActionResult {
    pub state: GameState,
    pub report: ActionReport,
    pub transitions: Vec<MatchTransition>,
}

impl MatchFlowService {
    /// Apply one action for the player `actor_id`.
    ///
    /// A rejected action leaves the stored state untouched. If the action
    /// ends the round, settlement has run by the time this returns.
    pub async fn apply_action(
        &self,
        match_id: MatchId,
        actor_id: PlayerId,
        action: Action,
    ) -> Result<ActionResult, AppError> {
        let _guard = self.locks.acquire(match_id).await;
        let current = self.require_state(match_id).await?;

        let side = current.side_of(actor_id).ok_or_else(|| {
            DomainError::validation(
                ValidationKind::NotAParticipant,
                format!("Player {actor_id} is not seated in match {match_id}"),
            )
        })?;

        debug!(
            match_id,
            actor_id,
            side = side.as_str(),
            action = action.kind().as_str(),
            "Applying action"
        );

        let before = MatchLifecycleView::of(&current);
        let mut next = current;
        let mut rng = action_rng(&next);
        let report = apply_action(&mut next, side, &action, &mut rng)?;
        record_action(
            &mut next,
            side,
            &action,
            report.clone(),
            OffsetDateTime::now_utc(),
        );

        let result = self.commit(&before, next).await?;
        Ok(ActionResult {
            state: result.state,
            report,
            transitions: result.transitions,
        })
    }
}
