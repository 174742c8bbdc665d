use time::OffsetDateTime;
use tracing::{info, warn};

use super::rng_provider::setup_rng;
use super::MatchFlowService;
use crate::domain::game_transition::MatchLifecycleView;
use crate::domain::setup::{setup_round, RoundParams};
use crate::domain::state::{GameState, Gold, MatchId, PlayerId};
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use crate::repos::history::MatchSummary;
use crate::repos::players::load_inventory;

/// Seating and wagers a round is built from.
struct RoundSeating {
    hunter_id: PlayerId,
    duck_id: PlayerId,
    hunter_bet: Gold,
    duck_bet: Gold,
    level: u8,
}

impl MatchFlowService {
    /// Set up round 1 of a match seated in the lobby.
    pub async fn initialize_round(&self, match_id: MatchId) -> Result<GameState, AppError> {
        let _guard = self.locks.acquire(match_id).await;

        if self.store.get(match_id).await?.is_some() {
            return Err(DomainError::conflict(
                ConflictKind::MatchInProgress,
                format!("Match {match_id} already has a round"),
            )
            .into());
        }

        let seating = self.lobby.seating(match_id).await?.ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::Seating,
                format!("Lobby has no seating for match {match_id}"),
            )
        })?;
        if seating.hunter_id == seating.duck_id {
            return Err(DomainError::validation_other(format!(
                "Player {} cannot take both roles",
                seating.hunter_id
            ))
            .into());
        }

        let rng_seed = self.seeds.match_seed(match_id);
        let round = RoundSeating {
            hunter_id: seating.hunter_id,
            duck_id: seating.duck_id,
            hunter_bet: seating.hunter_bet,
            duck_bet: seating.duck_bet,
            level: seating.level,
        };
        let state = self.build_round(match_id, 1, rng_seed, round).await?;

        self.store.put(state.clone()).await?;
        info!(
            match_id,
            level = state.level,
            hunter_id = state.hunter_id,
            duck_id = state.duck_id,
            "Match initialized"
        );
        self.record_running(&state).await;
        Ok(state)
    }

    /// Replace the current round with a fresh one for the same seating.
    ///
    /// Rejected while a finished round still has settlement steps pending.
    /// Charges spent in an abandoned live round stay spent.
    pub async fn reset_round(&self, match_id: MatchId) -> Result<GameState, AppError> {
        let _guard = self.locks.acquire(match_id).await;
        let mut current = self.require_state(match_id).await?;

        ensure_settled(&current)?;
        self.flush_abandoned_charges(&mut current).await?;

        let before = MatchLifecycleView::of(&current);
        let round = RoundSeating {
            hunter_id: current.hunter_id,
            duck_id: current.duck_id,
            hunter_bet: current.hunter_bet,
            duck_bet: current.duck_bet,
            level: current.level,
        };
        let next = self
            .build_round(match_id, current.round_no + 1, current.rng_seed, round)
            .await?;

        let result = self.commit(&before, next).await?;
        self.record_running(&result.state).await;
        Ok(result.state)
    }

    /// Remove a match from the store and drop its lock entry.
    ///
    /// Returns whether a match was stored. Same guards as a reset: pending
    /// settlement blocks it and a live round's spent charges are flushed.
    pub async fn discard_match(&self, match_id: MatchId) -> Result<bool, AppError> {
        let guard = self.locks.acquire(match_id).await;

        let existed = match self.store.get(match_id).await? {
            Some(mut current) => {
                ensure_settled(&current)?;
                self.flush_abandoned_charges(&mut current).await?;
                self.store.delete(match_id).await?
            }
            None => false,
        };

        drop(guard);
        self.locks.forget(match_id);
        if existed {
            info!(match_id, "Match discarded");
        }
        Ok(existed)
    }

    /// Take the charges used in an unfinished round out of the stored
    /// inventory. Finished rounds do this as a settlement step.
    ///
    /// The state is written back even when a flush fails, so a retry only
    /// removes what is still outstanding.
    async fn flush_abandoned_charges(&self, state: &mut GameState) -> Result<(), AppError> {
        let spent = &state.inventory.hunter.spent;
        if spent.armor_piercing == 0 && spent.traps == 0 {
            return Ok(());
        }
        let flushed = self.flush_consumables(state).await;
        self.store.put(state.clone()).await?;
        if let Err(e) = flushed {
            warn!(
                match_id = state.match_id,
                round_no = state.round_no,
                error = %e,
                "Failed to flush charges of abandoned round"
            );
            return Err(e.into());
        }
        Ok(())
    }

    /// Read balances and inventory, then run round setup.
    async fn build_round(
        &self,
        match_id: MatchId,
        round_no: u32,
        rng_seed: u64,
        seating: RoundSeating,
    ) -> Result<GameState, AppError> {
        let hunter_gold = self.players.get_balance(seating.hunter_id).await?;
        let duck_gold = self.players.get_balance(seating.duck_id).await?;
        let inventory =
            load_inventory(self.players.as_ref(), seating.hunter_id, seating.duck_id).await?;

        let params = RoundParams {
            match_id,
            round_no,
            rng_seed,
            level: seating.level,
            hunter_id: seating.hunter_id,
            duck_id: seating.duck_id,
            hunter_bet: seating.hunter_bet,
            duck_bet: seating.duck_bet,
            hunter_gold,
            duck_gold,
            inventory,
            started_at: OffsetDateTime::now_utc(),
        };
        let mut rng = setup_rng(rng_seed, round_no);
        Ok(setup_round(params, &mut rng)?)
    }

    async fn record_running(&self, state: &GameState) {
        if let Err(e) = self
            .history
            .record_match(&MatchSummary::running(state))
            .await
        {
            warn!(
                match_id = state.match_id,
                round_no = state.round_no,
                error = %e,
                "Failed to record running match"
            );
        }
    }
}

fn ensure_settled(state: &GameState) -> Result<(), AppError> {
    if state.is_settled() {
        return Ok(());
    }
    Err(DomainError::conflict(
        ConflictKind::SettlementPending,
        format!("Match {} has unsettled results", state.match_id),
    )
    .into())
}
