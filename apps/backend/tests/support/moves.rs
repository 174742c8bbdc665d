//! Board-aware helpers for driving a match through the service.

use hunt_backend::domain::actions::Action;
use hunt_backend::domain::state::{Cell, GameState, MatchId};
use hunt_backend::ActionResult;

use super::harness::{Harness, DUCK, HUNTER};

/// Active non-hazard cells not listed in `exclude`, ascending.
pub fn safe_cells(state: &GameState, exclude: &[Cell]) -> Vec<Cell> {
    state
        .active_cells
        .iter()
        .copied()
        .filter(|c| !state.is_hazard(*c) && !exclude.contains(c))
        .collect()
}

pub fn shoot(cell: Cell) -> Action {
    Action::Shoot {
        cell,
        armor_piercing: false,
    }
}

pub async fn duck(h: &Harness, match_id: MatchId, action: Action) -> ActionResult {
    h.service
        .apply_action(match_id, DUCK, action)
        .await
        .expect("duck action accepted")
}

pub async fn hunter(h: &Harness, match_id: MatchId, action: Action) -> ActionResult {
    h.service
        .apply_action(match_id, HUNTER, action)
        .await
        .expect("hunter action accepted")
}

/// Place the Duck on the first safe cell and return that cell.
pub async fn place_safely(h: &Harness, match_id: MatchId) -> Cell {
    let state = h.state(match_id).await;
    let cell = safe_cells(&state, &[])[0];
    duck(h, match_id, Action::PlaceDuck { cell: Some(cell) }).await;
    cell
}

/// Place the Duck and shoot it straight away.
pub async fn hunter_wins(h: &Harness, match_id: MatchId) -> ActionResult {
    let cell = place_safely(h, match_id).await;
    hunter(h, match_id, shoot(cell)).await
}

/// Place the Duck on the Beaver.
pub async fn duck_hits_beaver(h: &Harness, match_id: MatchId) -> ActionResult {
    let state = h.state(match_id).await;
    let beaver = state.beaver_cell.expect("every level has a beaver");
    duck(h, match_id, Action::PlaceDuck { cell: Some(beaver) }).await
}
