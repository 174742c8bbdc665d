//! Settlement math and the ledger that makes applying it idempotent.
//!
//! [`compute_settlement`] is pure: it turns a finished round into gold and
//! experience deltas. The service applies the resulting plan step by step,
//! marking each [`SettlementStep`] in the [`SettlementLedger`] only after the
//! collaborator call succeeded, so re-driving settlement never applies a step
//! twice.

use serde::{Deserialize, Serialize};

use crate::domain::perks::{protection_amount, RAIN_PAYOUT_REDUCTION_PERCENT};
use crate::domain::state::{EndReason, GameState, Gold, Side};
use crate::errors::domain::DomainError;

/// Experience constants applied at settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettlementRules {
    /// Granted to both sides.
    pub base_xp: i64,
    /// Added for the winning side only.
    pub winner_xp: i64,
}

impl Default for SettlementRules {
    fn default() -> Self {
        Self {
            base_xp: 10,
            winner_xp: 15,
        }
    }
}

/// Deltas computed once for a finished round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementPlan {
    pub winner: Side,
    pub reason: EndReason,
    pub hunter_delta: Gold,
    pub duck_delta: Gold,
    /// Part of a lost Duck bet kept by armored feather.
    pub protection: Gold,
    /// Part of the Hunter's payout washed away by rain.
    pub rain_reduction: Gold,
    pub hunter_xp: i64,
    pub duck_xp: i64,
}

impl SettlementPlan {
    pub fn delta_for(&self, side: Side) -> Gold {
        match side {
            Side::Hunter => self.hunter_delta,
            Side::Duck => self.duck_delta,
        }
    }

    pub fn xp_for(&self, side: Side) -> i64 {
        match side {
            Side::Hunter => self.hunter_xp,
            Side::Duck => self.duck_xp,
        }
    }
}

/// One externally visible side effect of settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SettlementStep {
    HunterBalance,
    DuckBalance,
    HunterExperience,
    DuckExperience,
    Consumables,
    History,
}

impl SettlementStep {
    /// Steps in the order they are applied.
    pub const ALL: [SettlementStep; 6] = [
        SettlementStep::HunterBalance,
        SettlementStep::DuckBalance,
        SettlementStep::HunterExperience,
        SettlementStep::DuckExperience,
        SettlementStep::Consumables,
        SettlementStep::History,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            SettlementStep::HunterBalance => "hunter-balance",
            SettlementStep::DuckBalance => "duck-balance",
            SettlementStep::HunterExperience => "hunter-experience",
            SettlementStep::DuckExperience => "duck-experience",
            SettlementStep::Consumables => "consumables",
            SettlementStep::History => "history",
        }
    }
}

/// Plan plus the steps already applied for the current outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementLedger {
    pub plan: SettlementPlan,
    pub applied: Vec<SettlementStep>,
}

impl SettlementLedger {
    pub fn new(plan: SettlementPlan) -> Self {
        Self {
            plan,
            applied: Vec::new(),
        }
    }

    pub fn is_applied(&self, step: SettlementStep) -> bool {
        self.applied.contains(&step)
    }

    pub fn mark_applied(&mut self, step: SettlementStep) {
        if !self.is_applied(step) {
            self.applied.push(step);
        }
    }

    pub fn pending(&self) -> Vec<SettlementStep> {
        SettlementStep::ALL
            .into_iter()
            .filter(|s| !self.is_applied(*s))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.pending().is_empty()
    }
}

/// Compute gold and experience deltas for a finished round.
///
/// The loser's bet moves to the winner. A losing Duck keeps its
/// armored-feather protection, and rain halves what is left of the transfer.
pub fn compute_settlement(
    state: &GameState,
    rules: &SettlementRules,
) -> Result<SettlementPlan, DomainError> {
    let outcome = state.outcome.ok_or_else(|| {
        DomainError::validation_other("Cannot settle a round without an outcome")
    })?;

    let (hunter_delta, duck_delta, protection, rain_reduction) = match outcome.winner {
        Side::Hunter => {
            let bet = state.duck_bet.max(0);
            let protection =
                protection_amount(bet, state.inventory.duck.perks.armored_feather);
            let after_protection = bet - protection;
            let rain_reduction = if state.inventory.duck.round.rain_active {
                after_protection * RAIN_PAYOUT_REDUCTION_PERCENT as Gold / 100
            } else {
                0
            };
            let transfer = after_protection - rain_reduction;
            (transfer, -transfer, protection, rain_reduction)
        }
        Side::Duck => {
            let bet = state.hunter_bet.max(0);
            (-bet, bet, 0, 0)
        }
    };

    let xp = |side: Side| {
        if side == outcome.winner {
            rules.base_xp + rules.winner_xp
        } else {
            rules.base_xp
        }
    };

    Ok(SettlementPlan {
        winner: outcome.winner,
        reason: outcome.reason,
        hunter_delta,
        duck_delta,
        protection,
        rain_reduction,
        hunter_xp: xp(Side::Hunter),
        duck_xp: xp(Side::Duck),
    })
}
