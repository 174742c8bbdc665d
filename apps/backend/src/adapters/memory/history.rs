use async_trait::async_trait;
use parking_lot::Mutex;

use super::Availability;
use crate::domain::state::MatchId;
use crate::errors::domain::DomainError;
use crate::repos::history::{MatchHistory, MatchStatus, MatchSummary};

/// Append-only list of every summary recorded.
#[derive(Debug, Default)]
pub struct MemoryMatchHistory {
    records: Mutex<Vec<MatchSummary>>,
    availability: Availability,
}

impl MemoryMatchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_available(&self, available: bool) {
        self.availability.set(available);
    }

    pub fn records(&self) -> Vec<MatchSummary> {
        self.records.lock().clone()
    }

    /// Finished summaries recorded for `match_id`, oldest first.
    pub fn finished_for(&self, match_id: MatchId) -> Vec<MatchSummary> {
        self.records
            .lock()
            .iter()
            .filter(|s| s.match_id == match_id && s.status == MatchStatus::Finished)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl MatchHistory for MemoryMatchHistory {
    async fn record_match(&self, summary: &MatchSummary) -> Result<(), DomainError> {
        self.availability.check("match history")?;
        self.records.lock().push(summary.clone());
        Ok(())
    }
}
