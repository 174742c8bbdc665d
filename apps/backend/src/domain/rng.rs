//! Randomness seam for round setup and turn resolution.
//!
//! Every random choice the engine makes goes through [`RoundRng`], so tests
//! can script exact draws and production runs stay replayable from the
//! match seed.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of the two kinds of draw the rules need.
pub trait RoundRng {
    /// Uniform index in `0..len`. Callers never pass `len == 0`.
    fn pick_index(&mut self, len: usize) -> usize;

    /// True with probability `percent / 100`.
    fn roll_percent(&mut self, percent: u8) -> bool;
}

/// Uniformly pick one element, `None` when `items` is empty.
pub fn pick<T: Copy>(rng: &mut dyn RoundRng, items: &[T]) -> Option<T> {
    if items.is_empty() {
        return None;
    }
    let idx = rng.pick_index(items.len()).min(items.len() - 1);
    Some(items[idx])
}

/// Sample `count` distinct elements without replacement (partial Fisher-Yates).
///
/// Returns every element when `count >= items.len()`. Order is draw order.
pub fn sample<T: Copy>(rng: &mut dyn RoundRng, items: &[T], count: usize) -> Vec<T> {
    let mut pool = items.to_vec();
    let take = count.min(pool.len());
    for i in 0..take {
        let remaining = pool.len() - i;
        let j = i + rng.pick_index(remaining).min(remaining - 1);
        pool.swap(i, j);
    }
    pool.truncate(take);
    pool
}

/// Production RNG: a ChaCha8 stream seeded from the match seed.
pub struct ChaChaRoundRng {
    inner: ChaCha8Rng,
}

impl ChaChaRoundRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl RoundRng for ChaChaRoundRng {
    fn pick_index(&mut self, len: usize) -> usize {
        self.inner.random_range(0..len.max(1))
    }

    fn roll_percent(&mut self, percent: u8) -> bool {
        self.inner.random_range(0u8..100) < percent
    }
}

/// Replays queued draws; used by tests to force specific outcomes.
///
/// An exhausted pick queue yields index 0, an exhausted roll queue yields
/// `false`. Queued picks larger than the range are reduced modulo `len`.
#[derive(Debug, Default, Clone)]
pub struct ScriptedRng {
    picks: VecDeque<usize>,
    rolls: VecDeque<bool>,
}

impl ScriptedRng {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_picks(mut self, picks: impl IntoIterator<Item = usize>) -> Self {
        self.picks.extend(picks);
        self
    }

    pub fn with_rolls(mut self, rolls: impl IntoIterator<Item = bool>) -> Self {
        self.rolls.extend(rolls);
        self
    }
}

impl RoundRng for ScriptedRng {
    fn pick_index(&mut self, len: usize) -> usize {
        match self.picks.pop_front() {
            Some(idx) if len > 0 => idx % len,
            _ => 0,
        }
    }

    fn roll_percent(&mut self, _percent: u8) -> bool {
        self.rolls.pop_front().unwrap_or(false)
    }
}

/// Derive the seed used to set up a round.
///
/// Unique per (match, round); stable across retries of the same round.
pub fn derive_setup_seed(match_seed: u64, round_no: u32) -> u64 {
    match_seed
        .wrapping_add((round_no as u64).wrapping_mul(1_000_000))
        .wrapping_add(2)
}

/// Derive the seed for the `action_seq`-th action of a round.
///
/// Round and sequence are packed into disjoint halves of a word before
/// mixing, so every (round, action) pair maps to its own offset.
pub fn derive_action_seed(match_seed: u64, round_no: u32, action_seq: u32) -> u64 {
    let packed = ((round_no as u64) << 32) | action_seq as u64;
    // Multiplying by an odd constant is a bijection on u64.
    match_seed
        .wrapping_add(packed.wrapping_mul(0x9E37_79B9_7F4A_7C15))
        .wrapping_add(1)
}
