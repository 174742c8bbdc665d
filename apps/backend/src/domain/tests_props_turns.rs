//! Property tests for turn resolution (pure domain).
//!
//! Rounds are walked through `legal_actions` with random choices.
//! Properties tested:
//! - Every enumerated action is accepted
//! - shot_cells stays a duplicate-free subset of active_cells
//! - ammo drops by exactly one per shot and never otherwise
//! - One-shot flags never go back to false within a round
//! - After an outcome every action is rejected and the state is frozen

use proptest::prelude::*;

use crate::domain::actions::{Action, ActionReport, ShotEffect};
use crate::domain::legal::legal_actions;
use crate::domain::rng::{derive_action_seed, ChaChaRoundRng};
use crate::domain::state::{DuckRoundFlags, GameState, Phase, Side};
use crate::domain::test_gens;
use crate::domain::test_prelude;
use crate::domain::test_state_helpers::{act, hunter_to_act, shoot};
use crate::domain::turns::apply_action;
use crate::errors::domain::ValidationKind;

fn flags_monotone(before: &DuckRoundFlags, after: &DuckRoundFlags) -> bool {
    (!before.reflection_used || after.reflection_used)
        && (!before.auto_flight_used || after.auto_flight_used)
        && (!before.rain_used || after.rain_used)
}

fn step_rng(state: &GameState) -> ChaChaRoundRng {
    ChaChaRoundRng::from_seed(derive_action_seed(
        state.rng_seed,
        state.round_no,
        state.action_seq,
    ))
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    #[test]
    fn prop_random_play_keeps_invariants(
        mut state in test_gens::fresh_round(),
        choices in test_gens::choices(),
    ) {
        for choice in choices {
            let actions = legal_actions(&state);
            if actions.is_empty() {
                break;
            }
            let action = actions[choice as usize % actions.len()].clone();
            let side = state.phase.actor().unwrap();
            let before = state.clone();
            let mut rng = step_rng(&state);

            let report = apply_action(&mut state, side, &action, &mut rng);
            prop_assert!(report.is_ok(), "{action:?} rejected: {report:?}");
            state.action_seq += 1;

            // shot_cells: subset of active, no duplicates, append-only
            prop_assert!(state.shot_cells.iter().all(|c| state.is_active(*c)));
            let mut dedup = state.shot_cells.clone();
            dedup.sort_unstable();
            dedup.dedup();
            prop_assert_eq!(dedup.len(), state.shot_cells.len());
            prop_assert!(state.shot_cells.starts_with(&before.shot_cells));
            prop_assert!(state.shot_cells.len() <= state.active_cells.len());

            // ammo: -1 per shot, untouched otherwise
            match action {
                Action::Shoot { .. } => prop_assert_eq!(state.ammo + 1, before.ammo),
                _ => prop_assert_eq!(state.ammo, before.ammo),
            }

            prop_assert!(flags_monotone(
                &before.inventory.duck.round,
                &state.inventory.duck.round
            ));
            prop_assert_eq!(state.outcome.is_some(), state.phase == Phase::Ended);
            prop_assert_eq!(&state.active_cells, &before.active_cells);
            prop_assert_eq!(state.beaver_cell, before.beaver_cell);
            prop_assert_eq!(state.warden_cell, before.warden_cell);
        }
    }

    #[test]
    fn prop_terminal_state_is_frozen(
        mut state in test_gens::fresh_round(),
        choices in test_gens::choices(),
        probe in any::<u8>(),
    ) {
        for choice in choices {
            let actions = legal_actions(&state);
            if actions.is_empty() {
                break;
            }
            let action = actions[choice as usize % actions.len()].clone();
            let side = state.phase.actor().unwrap();
            let mut rng = step_rng(&state);
            apply_action(&mut state, side, &action, &mut rng).unwrap();
        }
        if state.is_ended() {
            let frozen = state.clone();
            let mut rng = ChaChaRoundRng::from_seed(0);
            for (side, action) in [
                (Side::Hunter, shoot(probe % 25)),
                (Side::Duck, Action::Stay),
                (Side::Duck, Action::Fly { cell: probe % 25 }),
                (Side::Hunter, Action::UseBinoculars),
            ] {
                let err = apply_action(&mut state, side, &action, &mut rng).unwrap_err();
                prop_assert_eq!(err.validation_kind(), Some(&ValidationKind::MatchEnded));
            }
            prop_assert_eq!(state, frozen);
        }
    }
}

/// Over many hits on a mirror-protected Duck about one in ten reflects.
#[test]
fn mirror_reflects_about_ten_percent() {
    const TRIALS: u64 = 4000;
    let mut reflected = 0u64;
    let mut redirected = 0u64;

    for seed in 0..TRIALS {
        let mut state = hunter_to_act(2);
        state.inventory.duck.perks.mirror_plumage = true;
        let mut rng = ChaChaRoundRng::from_seed(derive_action_seed(seed, 1, 0));
        match act(&mut state, shoot(2), &mut rng).unwrap() {
            ActionReport::Shot {
                effect: ShotEffect::Reflected,
                ..
            } => reflected += 1,
            ActionReport::Shot {
                effect: ShotEffect::Redirected { to: Some(to) },
                ..
            } => {
                assert_ne!(to, 2);
                assert_eq!(state.duck_cell, Some(2));
                assert!(state.outcome.is_none());
                redirected += 1;
            }
            other => panic!("unexpected report {other:?}"),
        }
    }

    assert_eq!(reflected + redirected, TRIALS);
    // 3 sigma around 400 is roughly +/- 57
    assert!(
        (320..=480).contains(&reflected),
        "reflected {reflected} of {TRIALS}"
    );
}
