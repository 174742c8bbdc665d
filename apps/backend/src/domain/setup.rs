//! Randomized round setup: active cells, hazards, hint and ammo.

use time::OffsetDateTime;

use crate::domain::levels::{level_def, LevelDef};
use crate::domain::rng::{pick, sample, RoundRng};
use crate::domain::state::{Cell, GameState, Gold, Inventory, MatchId, Phase, PlayerId};
use crate::errors::domain::{DomainError, ValidationKind};

/// Everything a round needs that does not come from the dice.
#[derive(Debug, Clone)]
pub struct RoundParams {
    pub match_id: MatchId,
    pub round_no: u32,
    pub rng_seed: u64,
    pub level: u8,
    pub hunter_id: PlayerId,
    pub duck_id: PlayerId,
    pub hunter_bet: Gold,
    pub duck_bet: Gold,
    pub hunter_gold: Gold,
    pub duck_gold: Gold,
    /// Persistent ownership; per-round flags are cleared here.
    pub inventory: Inventory,
    pub started_at: OffsetDateTime,
}

/// Build the initial state of a round.
pub fn setup_round(params: RoundParams, rng: &mut dyn RoundRng) -> Result<GameState, DomainError> {
    let def = level_def(params.level)?;
    validate_bet(params.hunter_bet, params.hunter_gold, "hunter")?;
    validate_bet(params.duck_bet, params.duck_gold, "duck")?;

    let active_cells = select_active_cells(&def, rng);
    let (beaver_cell, warden_cell) = place_hazards(&def, &active_cells, rng);

    let mut inventory = params.inventory;
    inventory.start_round();

    let beaver_hint = match beaver_cell {
        Some(beaver) if inventory.duck.perks.beaver_sense => {
            Some(beaver_hint(beaver, &active_cells, rng))
        }
        _ => None,
    };
    let ammo = def.ammo.saturating_add(inventory.hunter.perks.extra_ammo);

    Ok(GameState {
        match_id: params.match_id,
        round_no: params.round_no,
        rng_seed: params.rng_seed,
        action_seq: 0,
        hunter_id: params.hunter_id,
        duck_id: params.duck_id,
        level: def.level,
        active_cells,
        shot_cells: Vec::new(),
        beaver_cell,
        warden_cell,
        duck_cell: None,
        trap_cells: Vec::new(),
        beaver_hint,
        ammo,
        phase: Phase::DuckInitial,
        outcome: None,
        hunter_bet: params.hunter_bet,
        duck_bet: params.duck_bet,
        hunter_gold: params.hunter_gold,
        duck_gold: params.duck_gold,
        inventory,
        revealed_empty_by_binoculars: Vec::new(),
        binoculars_used_cells: Vec::new(),
        duck_snared_turns: 0,
        last_action: None,
        started_at: params.started_at,
        settlement: None,
    })
}

fn validate_bet(bet: Gold, balance: Gold, who: &str) -> Result<(), DomainError> {
    if bet < 0 {
        return Err(DomainError::validation(
            ValidationKind::InvalidBet,
            format!("{who} bet {bet} is negative"),
        ));
    }
    if bet > balance {
        return Err(DomainError::validation(
            ValidationKind::InsufficientFunds,
            format!("{who} bet {bet} exceeds balance {balance}"),
        ));
    }
    Ok(())
}

/// Active cells for a round, ascending.
pub fn select_active_cells(def: &LevelDef, rng: &mut dyn RoundRng) -> Vec<Cell> {
    let all = def.all_cells();
    if def.active_count() >= def.grid_size() {
        return all;
    }
    let mut cells = sample(rng, &all, def.active_count() as usize);
    cells.sort_unstable();
    cells
}

/// Beaver uniform over active cells; Warden uniform over the rest.
///
/// Drawing the Warden from the cells left after the Beaver has the same
/// distribution as redrawing on collision and always terminates.
pub fn place_hazards(
    def: &LevelDef,
    active_cells: &[Cell],
    rng: &mut dyn RoundRng,
) -> (Option<Cell>, Option<Cell>) {
    let beaver = if def.has_beaver {
        pick(rng, active_cells)
    } else {
        None
    };
    let warden = if def.has_warden {
        let rest: Vec<Cell> = active_cells
            .iter()
            .copied()
            .filter(|c| Some(*c) != beaver)
            .collect();
        pick(rng, &rest)
    } else {
        None
    };
    (beaver, warden)
}

/// The Beaver cell hidden among two other active cells, ascending.
pub fn beaver_hint(beaver: Cell, active_cells: &[Cell], rng: &mut dyn RoundRng) -> Vec<Cell> {
    let others: Vec<Cell> = active_cells
        .iter()
        .copied()
        .filter(|c| *c != beaver)
        .collect();
    let mut hint = sample(rng, &others, 2);
    hint.push(beaver);
    hint.sort_unstable();
    hint
}
