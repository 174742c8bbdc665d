//! Enumeration of the actions currently legal for the side on turn.

use crate::domain::actions::Action;
use crate::domain::state::{Cell, GameState, Phase};

/// Every action the side on turn may submit right now.
///
/// Each returned action is accepted by `apply_action` for
/// `state.phase.actor()`. Suicidal moves (flying onto a hazard) are legal
/// and included.
pub fn legal_actions(state: &GameState) -> Vec<Action> {
    if state.is_ended() {
        return Vec::new();
    }
    match state.phase {
        Phase::DuckInitial => {
            let mut actions = vec![Action::PlaceDuck { cell: None }];
            actions.extend(
                state
                    .active_cells
                    .iter()
                    .map(|&c| Action::PlaceDuck { cell: Some(c) }),
            );
            actions
        }
        Phase::Hunter => hunter_actions(state),
        Phase::Duck => duck_actions(state),
        Phase::Ended => Vec::new(),
    }
}

fn hunter_actions(state: &GameState) -> Vec<Action> {
    let hunter = &state.inventory.hunter;
    let open = state.live_cells_except(&[]);
    let mut actions = Vec::new();

    for &cell in &open {
        actions.push(Action::Shoot {
            cell,
            armor_piercing: false,
        });
        if hunter.perks.armor_piercing > 0 {
            actions.push(Action::Shoot {
                cell,
                armor_piercing: true,
            });
        }
    }
    if hunter.perks.binoculars && !hunter.turn.binoculars_used {
        actions.push(Action::UseBinoculars);
    }
    if hunter.perks.traps > 0 && !hunter.turn.trap_set {
        actions.extend(
            open.iter()
                .filter(|c| !state.is_trapped(**c))
                .map(|&cell| Action::SetTrap { cell }),
        );
    }
    actions
}

fn duck_actions(state: &GameState) -> Vec<Action> {
    let duck = &state.inventory.duck;
    let mut actions = vec![Action::Stay];
    let snared = state.duck_snared_turns > 0;

    if !snared {
        actions.extend(
            state
                .active_cells
                .iter()
                .copied()
                .filter(|c| can_fly_to(state, *c))
                .map(|cell| Action::Fly { cell }),
        );
    }
    if duck.perks.rain && !duck.round.rain_used {
        actions.push(Action::CallRain);
    }
    if duck.perks.safe_flight && !snared && !safe_cells(state).is_empty() {
        actions.push(Action::SafeFlight);
    }
    actions
}

fn can_fly_to(state: &GameState, cell: Cell) -> bool {
    Some(cell) != state.duck_cell
        && !state.binoculars_used_cells.contains(&cell)
        && (!state.is_shot(cell) || state.inventory.duck.perks.ghost_flight)
}

fn safe_cells(state: &GameState) -> Vec<Cell> {
    let exclude: Vec<Cell> = state
        .duck_cell
        .into_iter()
        .chain(state.beaver_cell)
        .chain(state.warden_cell)
        .collect();
    state.live_cells_except(&exclude)
}
