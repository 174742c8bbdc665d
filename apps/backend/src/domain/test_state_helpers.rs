//! Test-only game state helpers for domain unit tests.

use time::macros::datetime;

use crate::domain::actions::{Action, ActionReport};
use crate::domain::rng::RoundRng;
use crate::domain::state::{Cell, GameState, Gold, Inventory, Phase, Side};
use crate::domain::turns::apply_action;
use crate::errors::domain::DomainError;

pub const HUNTER: i64 = 11;
pub const DUCK: i64 = 22;

/// Knobs for [`make_game_state`]; unset fields take level-1 defaults.
#[derive(Debug, Clone, Default)]
pub struct MakeGameStateArgs {
    pub level: Option<u8>,
    pub active_cells: Option<Vec<Cell>>,
    pub beaver: Option<Cell>,
    pub warden: Option<Cell>,
    pub duck: Option<Cell>,
    pub phase: Option<Phase>,
    pub ammo: Option<u8>,
    pub hunter_bet: Option<Gold>,
    pub duck_bet: Option<Gold>,
    pub inventory: Option<Inventory>,
}

/// Build a state by hand, bypassing random setup.
///
/// Defaults: level 1, cells 0..6 active, Beaver on 5, no Warden, Duck not
/// placed, phase `duck-initial`, ammo 3, bets 50/50, 1000 gold each.
pub fn make_game_state(args: MakeGameStateArgs) -> GameState {
    let phase = args.phase.unwrap_or(if args.duck.is_some() {
        Phase::Hunter
    } else {
        Phase::DuckInitial
    });
    GameState {
        match_id: 1,
        round_no: 1,
        rng_seed: 0,
        action_seq: 0,
        hunter_id: HUNTER,
        duck_id: DUCK,
        level: args.level.unwrap_or(1),
        active_cells: args.active_cells.unwrap_or_else(|| (0..6).collect()),
        shot_cells: Vec::new(),
        beaver_cell: Some(args.beaver.unwrap_or(5)),
        warden_cell: args.warden,
        duck_cell: args.duck,
        trap_cells: Vec::new(),
        beaver_hint: None,
        ammo: args.ammo.unwrap_or(3),
        phase,
        outcome: None,
        hunter_bet: args.hunter_bet.unwrap_or(50),
        duck_bet: args.duck_bet.unwrap_or(50),
        hunter_gold: 1000,
        duck_gold: 1000,
        inventory: args.inventory.unwrap_or_default(),
        revealed_empty_by_binoculars: Vec::new(),
        binoculars_used_cells: Vec::new(),
        duck_snared_turns: 0,
        last_action: None,
        started_at: datetime!(2024-01-01 12:00 UTC),
        settlement: None,
    }
}

/// Level-1 state with the Duck already sitting on `duck`, Hunter to act.
pub fn hunter_to_act(duck: Cell) -> GameState {
    make_game_state(MakeGameStateArgs {
        duck: Some(duck),
        ..Default::default()
    })
}

/// Apply an action for whichever side owns it.
pub fn act(
    state: &mut GameState,
    action: Action,
    rng: &mut dyn RoundRng,
) -> Result<ActionReport, DomainError> {
    let side: Side = action.side();
    apply_action(state, side, &action, rng)
}

pub fn shoot(cell: Cell) -> Action {
    Action::Shoot {
        cell,
        armor_piercing: false,
    }
}
