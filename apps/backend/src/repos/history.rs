//! Match history contract.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::settlement::SettlementPlan;
use crate::domain::state::{EndReason, GameState, Gold, MatchId, PlayerId, Side};
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchStatus {
    Running,
    Finished,
}

/// Row written to the history collaborator at round start and at settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub match_id: MatchId,
    pub round_no: u32,
    pub level: u8,
    pub hunter_id: PlayerId,
    pub duck_id: PlayerId,
    pub hunter_bet: Gold,
    pub duck_bet: Gold,
    pub status: MatchStatus,
    pub winner: Option<Side>,
    pub reason: Option<EndReason>,
    pub hunter_delta: Gold,
    pub duck_delta: Gold,
    pub hunter_xp: i64,
    pub duck_xp: i64,
    pub shots_fired: u32,
    /// Seconds from round start until the summary was taken.
    pub duration_secs: i64,
}

impl MatchSummary {
    /// Summary of a round that has just started.
    pub fn running(state: &GameState) -> Self {
        Self {
            match_id: state.match_id,
            round_no: state.round_no,
            level: state.level,
            hunter_id: state.hunter_id,
            duck_id: state.duck_id,
            hunter_bet: state.hunter_bet,
            duck_bet: state.duck_bet,
            status: MatchStatus::Running,
            winner: None,
            reason: None,
            hunter_delta: 0,
            duck_delta: 0,
            hunter_xp: 0,
            duck_xp: 0,
            shots_fired: 0,
            duration_secs: 0,
        }
    }

    /// Final summary of a settled round.
    pub fn finished(state: &GameState, plan: &SettlementPlan, duration_secs: i64) -> Self {
        Self {
            status: MatchStatus::Finished,
            winner: Some(plan.winner),
            reason: Some(plan.reason),
            hunter_delta: plan.hunter_delta,
            duck_delta: plan.duck_delta,
            hunter_xp: plan.hunter_xp,
            duck_xp: plan.duck_xp,
            shots_fired: state.shot_cells.len() as u32,
            duration_secs: duration_secs.max(0),
            ..Self::running(state)
        }
    }
}

#[async_trait]
pub trait MatchHistory: Send + Sync {
    async fn record_match(&self, summary: &MatchSummary) -> Result<(), DomainError>;
}
