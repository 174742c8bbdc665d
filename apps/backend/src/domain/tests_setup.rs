use time::macros::datetime;

use crate::domain::rng::{ChaChaRoundRng, ScriptedRng};
use crate::domain::setup::{setup_round, RoundParams};
use crate::domain::state::{Inventory, Phase};
use crate::errors::domain::{DomainError, ValidationKind};

fn params(level: u8) -> RoundParams {
    RoundParams {
        match_id: 7,
        round_no: 1,
        rng_seed: 99,
        level,
        hunter_id: 1,
        duck_id: 2,
        hunter_bet: 50,
        duck_bet: 50,
        hunter_gold: 500,
        duck_gold: 500,
        inventory: Inventory::default(),
        started_at: datetime!(2024-01-01 0:00 UTC),
    }
}

#[test]
fn level_one_uses_whole_grid() {
    let mut rng = ChaChaRoundRng::from_seed(1);
    let state = setup_round(params(1), &mut rng).unwrap();
    assert_eq!(state.active_cells, vec![0, 1, 2, 3, 4, 5]);
    assert!(state.is_active(state.beaver_cell.unwrap()));
    assert_eq!(state.warden_cell, None);
    assert_eq!(state.duck_cell, None);
    assert_eq!(state.ammo, 3);
    assert_eq!(state.phase, Phase::DuckInitial);
    assert!(state.shot_cells.is_empty());
    assert!(state.outcome.is_none());
    assert!(state.beaver_hint.is_none());
}

#[test]
fn level_five_samples_sorted_subset() {
    let mut rng = ChaChaRoundRng::from_seed(5);
    let state = setup_round(params(5), &mut rng).unwrap();
    assert_eq!(state.active_cells.len(), 16);
    assert!(state.active_cells.windows(2).all(|w| w[0] < w[1]));
    assert!(state.active_cells.iter().all(|&c| c < 25));
    let beaver = state.beaver_cell.unwrap();
    let warden = state.warden_cell.unwrap();
    assert_ne!(beaver, warden);
    assert!(state.is_active(beaver) && state.is_active(warden));
}

#[test]
fn scripted_draws_fix_the_board() {
    // Every pick 0: identity sample, Beaver on first cell, Warden on the next.
    let mut rng = ScriptedRng::new();
    let state = setup_round(params(3), &mut rng).unwrap();
    assert_eq!(state.active_cells, (0..10).collect::<Vec<u8>>());
    assert_eq!(state.beaver_cell, Some(0));
    assert_eq!(state.warden_cell, Some(1));
}

#[test]
fn warden_skips_beaver_cell_even_when_drawn_first() {
    // Level 3: ten picks for the sample, then Beaver index 4, Warden index 4
    // of the remaining cells (which is cell 5 once cell 4 is removed).
    let picks = std::iter::repeat(0).take(10).chain([4, 4]);
    let mut rng = ScriptedRng::new().with_picks(picks);
    let state = setup_round(params(3), &mut rng).unwrap();
    assert_eq!(state.beaver_cell, Some(4));
    assert_eq!(state.warden_cell, Some(5));
}

#[test]
fn extra_ammo_adds_to_base() {
    let mut p = params(2);
    p.inventory.hunter.perks.extra_ammo = 2;
    let mut rng = ChaChaRoundRng::from_seed(3);
    let state = setup_round(p, &mut rng).unwrap();
    assert_eq!(state.ammo, 6);
}

#[test]
fn beaver_sense_hides_beaver_among_decoys() {
    let mut p = params(4);
    p.inventory.duck.perks.beaver_sense = true;
    let mut rng = ChaChaRoundRng::from_seed(11);
    let state = setup_round(p, &mut rng).unwrap();
    let hint = state.beaver_hint.clone().unwrap();
    assert_eq!(hint.len(), 3);
    assert!(hint.windows(2).all(|w| w[0] < w[1]));
    assert!(hint.contains(&state.beaver_cell.unwrap()));
    assert!(hint.iter().all(|&c| state.is_active(c)));
}

#[test]
fn round_flags_reset_but_ownership_stays() {
    let mut p = params(1);
    p.inventory.duck.perks.mirror_plumage = true;
    p.inventory.duck.round.reflection_used = true;
    p.inventory.duck.round.rain_active = true;
    p.inventory.hunter.turn.binoculars_used = true;
    p.inventory.hunter.spent.traps = 2;
    let mut rng = ChaChaRoundRng::from_seed(0);
    let state = setup_round(p, &mut rng).unwrap();
    assert!(state.inventory.duck.perks.mirror_plumage);
    assert!(!state.inventory.duck.round.reflection_used);
    assert!(!state.inventory.duck.round.rain_active);
    assert!(!state.inventory.hunter.turn.binoculars_used);
    assert_eq!(state.inventory.hunter.spent.traps, 0);
}

#[test]
fn bets_are_validated() {
    let mut rng = ScriptedRng::new();

    let mut p = params(1);
    p.duck_bet = -1;
    let err = setup_round(p, &mut rng).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::InvalidBet));

    let mut p = params(1);
    p.hunter_bet = 501;
    let err = setup_round(p, &mut rng).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::InsufficientFunds));
}

#[test]
fn unknown_level_is_fatal_config() {
    let mut rng = ScriptedRng::new();
    let err = setup_round(params(9), &mut rng).unwrap_err();
    assert!(matches!(err, DomainError::Config(_)));
}
