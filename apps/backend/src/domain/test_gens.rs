// Proptest generators for domain types.
// Boards come from the real setup code; the generators only pick the knobs.

use proptest::prelude::*;
use time::macros::datetime;

use crate::domain::rng::{derive_setup_seed, ChaChaRoundRng};
use crate::domain::setup::{setup_round, RoundParams};
use crate::domain::state::{DuckPerks, GameState, HunterPerks, Inventory};
use crate::domain::test_state_helpers::{DUCK, HUNTER};

/// A level key from the catalog.
pub fn level() -> impl Strategy<Value = u8> {
    1u8..=5
}

pub fn hunter_perks() -> impl Strategy<Value = HunterPerks> {
    (any::<bool>(), 0u32..3, 0u32..3, 0u8..=2).prop_map(
        |(binoculars, armor_piercing, traps, extra_ammo)| HunterPerks {
            binoculars,
            armor_piercing,
            traps,
            extra_ammo,
        },
    )
}

pub fn duck_perks() -> impl Strategy<Value = DuckPerks> {
    (0u8..=3, any::<[bool; 6]>()).prop_map(|(armored_feather, flags)| DuckPerks {
        armored_feather,
        mirror_plumage: flags[0],
        auto_flight: flags[1],
        ghost_flight: flags[2],
        rain: flags[3],
        safe_flight: flags[4],
        beaver_sense: flags[5],
    })
}

/// Random ownership on both sides; round flags start clear.
pub fn inventory() -> impl Strategy<Value = Inventory> {
    (hunter_perks(), duck_perks()).prop_map(|(h, d)| {
        let mut inv = Inventory::default();
        inv.hunter.perks = h;
        inv.duck.perks = d;
        inv
    })
}

/// Fresh round built by `setup_round` from a level, seed and inventory.
pub fn fresh_round() -> impl Strategy<Value = GameState> {
    (level(), any::<u64>(), inventory()).prop_map(|(level, seed, inventory)| {
        let params = RoundParams {
            match_id: 1,
            round_no: 1,
            rng_seed: seed,
            level,
            hunter_id: HUNTER,
            duck_id: DUCK,
            hunter_bet: 10,
            duck_bet: 10,
            hunter_gold: 100,
            duck_gold: 100,
            inventory,
            started_at: datetime!(2024-01-01 0:00 UTC),
        };
        let mut rng = ChaChaRoundRng::from_seed(derive_setup_seed(seed, 1));
        match setup_round(params, &mut rng) {
            Ok(state) => state,
            Err(e) => panic!("catalog level {level} failed to set up: {e}"),
        }
    })
}

/// Choice indices used to walk through legal actions.
pub fn choices() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(any::<u32>(), 1..64)
}
