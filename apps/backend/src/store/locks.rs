use std::sync::Arc;
use std::time::Instant;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

use crate::domain::state::MatchId;

/// One async mutex per match id, created on first use.
///
/// Holding the guard serializes every operation on that match; operations
/// on different matches never contend.
#[derive(Debug, Default)]
pub struct MatchLocks {
    locks: DashMap<MatchId, Arc<Mutex<()>>>,
}

impl MatchLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, match_id: MatchId) -> OwnedMutexGuard<()> {
        // Clone the Arc out so the DashMap shard is released before awaiting.
        let lock = self
            .locks
            .entry(match_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .value()
            .clone();

        let wait_start = Instant::now();
        let guard = lock.lock_owned().await;
        let wait_ms = wait_start.elapsed().as_millis() as u64;
        if wait_ms > 0 {
            debug!(match_id, wait_ms, "Waited for match lock");
        }
        guard
    }

    /// Drop the lock entry of a deleted match.
    pub fn forget(&self, match_id: MatchId) {
        self.locks.remove(&match_id);
    }
}
