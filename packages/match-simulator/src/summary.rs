//! Aggregate statistics printed at the end of a run.

use std::collections::BTreeMap;

use hunt_backend::domain::state::{Gold, Side};
use serde::Serialize;

use crate::simulator::MatchResult;

#[derive(Debug, Default, Serialize)]
pub struct Wins {
    pub hunter: u32,
    pub duck: u32,
}

#[derive(Debug, Serialize)]
pub struct Summary {
    pub level: u8,
    pub completed: u32,
    pub errors: u32,
    pub wins: Wins,
    /// Keyed by end reason, e.g. `hunter-shot-duck`.
    pub by_reason: BTreeMap<&'static str, u32>,
    pub avg_shots: f64,
    pub avg_actions: f64,
    pub hunter_gold_delta: Gold,
    pub duck_gold_delta: Gold,
    pub duration_ms: f64,
    #[serde(skip)]
    total_shots: u64,
    #[serde(skip)]
    total_actions: u64,
}

impl Summary {
    pub fn new(level: u8) -> Self {
        Self {
            level,
            completed: 0,
            errors: 0,
            wins: Wins::default(),
            by_reason: BTreeMap::new(),
            avg_shots: 0.0,
            avg_actions: 0.0,
            hunter_gold_delta: 0,
            duck_gold_delta: 0,
            duration_ms: 0.0,
            total_shots: 0,
            total_actions: 0,
        }
    }

    pub fn record(&mut self, result: &MatchResult) {
        self.completed += 1;
        match result.winner {
            Side::Hunter => self.wins.hunter += 1,
            Side::Duck => self.wins.duck += 1,
        }
        *self.by_reason.entry(result.reason.as_str()).or_insert(0) += 1;
        self.total_shots += u64::from(result.shots);
        self.total_actions += u64::from(result.actions);
    }

    pub fn record_error(&mut self) {
        self.errors += 1;
    }

    pub fn finish(&mut self, (hunter, duck): (Gold, Gold), duration_ms: f64) {
        if self.completed > 0 {
            let n = f64::from(self.completed);
            self.avg_shots = self.total_shots as f64 / n;
            self.avg_actions = self.total_actions as f64 / n;
        }
        self.hunter_gold_delta = hunter;
        self.duck_gold_delta = duck;
        self.duration_ms = duration_ms;
    }
}
