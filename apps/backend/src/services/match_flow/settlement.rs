use time::OffsetDateTime;
use tracing::{debug, warn};

use super::MatchFlowService;
use crate::domain::game_transition::MatchLifecycleView;
use crate::domain::perks::PerkId;
use crate::domain::settlement::{
    compute_settlement, SettlementLedger, SettlementPlan, SettlementStep,
};
use crate::domain::state::{GameState, MatchId, Side};
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::history::MatchSummary;

impl MatchFlowService {
    /// Re-drive settlement steps that failed earlier.
    ///
    /// A settled round is returned unchanged, so calling this any number of
    /// times moves gold and experience exactly once.
    pub async fn settle(&self, match_id: MatchId) -> Result<GameState, AppError> {
        let _guard = self.locks.acquire(match_id).await;
        let current = self.require_state(match_id).await?;

        if !current.is_ended() {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                format!("Match {match_id} has no outcome to settle"),
            )
            .into());
        }
        if current.is_settled() {
            return Ok(current);
        }

        let before = MatchLifecycleView::of(&current);
        let result = self.commit(&before, current).await?;
        Ok(result.state)
    }

    /// Apply every pending settlement step, persisting after each one.
    ///
    /// A failing step is logged and stays pending; the others still run.
    pub(super) async fn drive_settlement(&self, state: &mut GameState) -> Result<(), AppError> {
        let ledger = match &state.settlement {
            Some(ledger) => ledger.clone(),
            None => {
                let plan = compute_settlement(state, &self.config.settlement_rules())?;
                let ledger = SettlementLedger::new(plan);
                state.settlement = Some(ledger.clone());
                self.store.put(state.clone()).await?;
                ledger
            }
        };

        for step in ledger.pending() {
            match self.apply_step(state, &ledger.plan, step).await {
                Ok(()) => {
                    if let Some(ledger) = state.settlement.as_mut() {
                        ledger.mark_applied(step);
                    }
                    debug!(
                        match_id = state.match_id,
                        step = step.as_str(),
                        "Settlement step applied"
                    );
                }
                Err(e) => {
                    warn!(
                        match_id = state.match_id,
                        round_no = state.round_no,
                        step = step.as_str(),
                        error = %e,
                        "Settlement step failed, left pending"
                    );
                }
            }
            // Partial progress inside a failed step is kept too.
            self.store.put(state.clone()).await?;
        }
        Ok(())
    }

    async fn apply_step(
        &self,
        state: &mut GameState,
        plan: &SettlementPlan,
        step: SettlementStep,
    ) -> Result<(), DomainError> {
        match step {
            SettlementStep::HunterBalance => self.apply_balance(state, plan, Side::Hunter).await,
            SettlementStep::DuckBalance => self.apply_balance(state, plan, Side::Duck).await,
            SettlementStep::HunterExperience => {
                self.players
                    .add_experience(state.hunter_id, Side::Hunter, plan.hunter_xp)
                    .await
            }
            SettlementStep::DuckExperience => {
                self.players
                    .add_experience(state.duck_id, Side::Duck, plan.duck_xp)
                    .await
            }
            SettlementStep::Consumables => self.flush_consumables(state).await,
            SettlementStep::History => {
                let duration = OffsetDateTime::now_utc() - state.started_at;
                let summary = MatchSummary::finished(state, plan, duration.whole_seconds());
                self.history.record_match(&summary).await
            }
        }
    }

    async fn apply_balance(
        &self,
        state: &mut GameState,
        plan: &SettlementPlan,
        side: Side,
    ) -> Result<(), DomainError> {
        let player_id = state.player_for(side);
        let balance = self.players.get_balance(player_id).await?;
        let updated = balance + plan.delta_for(side);
        self.players.set_balance(player_id, updated).await?;
        match side {
            Side::Hunter => state.hunter_gold = updated,
            Side::Duck => state.duck_gold = updated,
        }
        Ok(())
    }

    /// Remove the charges spent this round from the Hunter's stored inventory.
    ///
    /// Each flushed kind is zeroed in the state, so a retry after a partial
    /// failure only flushes what is left.
    pub(super) async fn flush_consumables(&self, state: &mut GameState) -> Result<(), DomainError> {
        let hunter_id = state.hunter_id;
        let spent = state.inventory.hunter.spent.armor_piercing;
        if spent > 0 {
            self.players
                .add_inventory_item(hunter_id, PerkId::ArmorPiercing, -(spent as i64))
                .await?;
            state.inventory.hunter.spent.armor_piercing = 0;
        }
        let spent = state.inventory.hunter.spent.traps;
        if spent > 0 {
            self.players
                .add_inventory_item(hunter_id, PerkId::Trap, -(spent as i64))
                .await?;
            state.inventory.hunter.spent.traps = 0;
        }
        Ok(())
    }
}
