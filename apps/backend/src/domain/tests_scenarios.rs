//! End-to-end rounds played through `apply_action` on level 1 (2x3, ammo 3).

use crate::domain::actions::Action;
use crate::domain::rng::ScriptedRng;
use crate::domain::state::{EndReason, Outcome, Phase, Side};
use crate::domain::test_state_helpers::{act, make_game_state, shoot, MakeGameStateArgs};

fn level_one() -> crate::domain::state::GameState {
    make_game_state(MakeGameStateArgs {
        level: Some(1),
        beaver: Some(5),
        ammo: Some(3),
        ..Default::default()
    })
}

#[test]
fn scenario_a_hunter_finds_duck() {
    let mut state = level_one();
    let mut rng = ScriptedRng::new();

    act(&mut state, Action::PlaceDuck { cell: Some(2) }, &mut rng).unwrap();
    assert_eq!(state.phase, Phase::Hunter);

    act(&mut state, shoot(0), &mut rng).unwrap();
    assert_eq!(state.ammo, 2);
    assert_eq!(state.phase, Phase::Duck);

    act(&mut state, Action::Stay, &mut rng).unwrap();
    assert_eq!(state.phase, Phase::Hunter);

    act(&mut state, shoot(2), &mut rng).unwrap();
    assert_eq!(
        state.outcome,
        Some(Outcome {
            winner: Side::Hunter,
            reason: EndReason::HunterShotDuck
        })
    );
    assert_eq!(state.phase, Phase::Ended);
}

#[test]
fn scenario_b_hunter_runs_dry() {
    let mut state = level_one();
    let mut rng = ScriptedRng::new();

    act(&mut state, Action::PlaceDuck { cell: Some(4) }, &mut rng).unwrap();
    for (i, cell) in [0u8, 1, 2].into_iter().enumerate() {
        act(&mut state, shoot(cell), &mut rng).unwrap();
        assert_eq!(state.ammo as usize, 2 - i);
        if state.is_ended() {
            break;
        }
        act(&mut state, Action::Stay, &mut rng).unwrap();
    }

    assert_eq!(
        state.outcome,
        Some(Outcome {
            winner: Side::Duck,
            reason: EndReason::HunterOutOfAmmo
        })
    );
    assert_eq!(state.shot_cells, vec![0, 1, 2]);
}

#[test]
fn scenario_c_duck_lands_on_beaver() {
    let mut state = level_one();
    let mut rng = ScriptedRng::new();

    act(&mut state, Action::PlaceDuck { cell: Some(5) }, &mut rng).unwrap();
    assert_eq!(
        state.outcome,
        Some(Outcome {
            winner: Side::Hunter,
            reason: EndReason::DuckHitBeaver
        })
    );
    assert_eq!(state.phase, Phase::Ended);
    assert!(state.shot_cells.is_empty());
    assert_eq!(state.ammo, 3);
}
