//! Turn resolution: one function per legal action.
//!
//! Every function validates before it mutates, so a rejected action leaves
//! the state exactly as it was. [`apply_action`] adds the turn checks shared
//! by all actions and dispatches.

use time::OffsetDateTime;

use crate::domain::actions::{Action, ActionReport, Finding, LastAction, ShotEffect};
use crate::domain::perks::REFLECT_CHANCE_PERCENT;
use crate::domain::rng::{pick, RoundRng};
use crate::domain::state::{
    require_duck_cell, require_phase, Cell, EndReason, GameState, Phase, Side,
};
use crate::errors::domain::{DomainError, ValidationKind};

/// Validate the actor and apply `action` for `side`.
///
/// Check order: ended match, action of the other side, out-of-turn actor,
/// action illegal in the current phase.
pub fn apply_action(
    state: &mut GameState,
    side: Side,
    action: &Action,
    rng: &mut dyn RoundRng,
) -> Result<ActionReport, DomainError> {
    if state.is_ended() {
        return Err(DomainError::validation(
            ValidationKind::MatchEnded,
            "Match has already ended",
        ));
    }
    if action.side() != side {
        return Err(DomainError::validation(
            ValidationKind::WrongSide,
            format!(
                "{} cannot submit {}",
                side.as_str(),
                action.kind().as_str()
            ),
        ));
    }
    if state.phase.actor() != Some(side) {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            format!("It is not the {}'s turn", side.as_str()),
        ));
    }

    match *action {
        Action::PlaceDuck { cell } => place_duck(state, cell, rng),
        Action::Shoot {
            cell,
            armor_piercing,
        } => shoot(state, cell, armor_piercing, rng),
        Action::UseBinoculars => use_binoculars(state, rng),
        Action::SetTrap { cell } => set_trap(state, cell),
        Action::Stay => stay(state),
        Action::Fly { cell } => fly(state, cell),
        Action::CallRain => call_rain(state),
        Action::SafeFlight => safe_flight(state, rng),
    }
}

/// Stamp the audit trail and advance the per-round action counter.
pub fn record_action(
    state: &mut GameState,
    side: Side,
    action: &Action,
    report: ActionReport,
    at: OffsetDateTime,
) {
    state.action_seq = state.action_seq.wrapping_add(1);
    state.last_action = Some(LastAction {
        kind: action.kind(),
        actor: side,
        player_id: state.player_for(side),
        report,
        at,
    });
}

fn require_active(state: &GameState, cell: Cell) -> Result<(), DomainError> {
    if !state.is_active(cell) {
        return Err(DomainError::validation(
            ValidationKind::InvalidCell,
            format!("Cell {cell} is not in play"),
        ));
    }
    Ok(())
}

fn hazard_reason_for_duck(state: &GameState, cell: Cell) -> Option<EndReason> {
    if state.beaver_cell == Some(cell) {
        Some(EndReason::DuckHitBeaver)
    } else if state.warden_cell == Some(cell) {
        Some(EndReason::DuckHitWarden)
    } else {
        None
    }
}

/// Move the Duck onto `cell`, springing a trap there if one is set.
fn land_duck(state: &mut GameState, cell: Cell) -> bool {
    state.duck_cell = Some(cell);
    if let Some(pos) = state.trap_cells.iter().position(|c| *c == cell) {
        state.trap_cells.remove(pos);
        state.duck_snared_turns = 1;
        true
    } else {
        false
    }
}

fn ensure_not_snared(state: &GameState) -> Result<(), DomainError> {
    if state.duck_snared_turns > 0 {
        return Err(DomainError::validation(
            ValidationKind::DuckSnared,
            format!("Duck is snared for {} more turn(s)", state.duck_snared_turns),
        ));
    }
    Ok(())
}

pub fn place_duck(
    state: &mut GameState,
    cell: Option<Cell>,
    rng: &mut dyn RoundRng,
) -> Result<ActionReport, DomainError> {
    require_phase(state, Phase::DuckInitial)?;

    let cell = match cell {
        Some(c) => {
            require_active(state, c)?;
            c
        }
        None => {
            let exclude: Vec<Cell> = state
                .beaver_cell
                .into_iter()
                .chain(state.warden_cell)
                .collect();
            let candidates = state.live_cells_except(&exclude);
            pick(rng, &candidates).ok_or_else(|| {
                DomainError::validation(
                    ValidationKind::NoSafeCell,
                    "No cell left to place the Duck",
                )
            })?
        }
    };

    if let Some(reason) = hazard_reason_for_duck(state, cell) {
        state.duck_cell = Some(cell);
        state.end_with(reason);
        return Ok(ActionReport::Placed {
            cell,
            snared: false,
        });
    }

    let snared = land_duck(state, cell);
    state.pass_to_hunter();
    Ok(ActionReport::Placed { cell, snared })
}

pub fn shoot(
    state: &mut GameState,
    target: Cell,
    armor_piercing: bool,
    rng: &mut dyn RoundRng,
) -> Result<ActionReport, DomainError> {
    require_phase(state, Phase::Hunter)?;
    require_active(state, target)?;
    if state.is_shot(target) {
        return Err(DomainError::validation(
            ValidationKind::CellAlreadyShot,
            format!("Cell {target} was already shot"),
        ));
    }
    if armor_piercing && state.inventory.hunter.perks.armor_piercing == 0 {
        return Err(DomainError::validation(
            ValidationKind::NoChargesLeft,
            "No armor-piercing charges left",
        ));
    }
    let duck = require_duck_cell(state, "shoot")?;

    if armor_piercing {
        let hunter = &mut state.inventory.hunter;
        hunter.perks.armor_piercing -= 1;
        hunter.spent.armor_piercing += 1;
    }
    state.ammo = state.ammo.saturating_sub(1);

    let effect = if state.warden_cell == Some(target) {
        state.shot_cells.push(target);
        state.end_with(EndReason::HunterHitWarden);
        ShotEffect::HitWarden
    } else if state.beaver_cell == Some(target) {
        state.shot_cells.push(target);
        state.end_with(EndReason::HunterHitBeaver);
        ShotEffect::HitBeaver
    } else if target == duck {
        resolve_duck_hit(state, target, armor_piercing, rng)
    } else {
        state.shot_cells.push(target);
        finish_shot(state);
        ShotEffect::Miss
    };

    Ok(ActionReport::Shot {
        target,
        armor_piercing,
        effect,
        ammo_left: state.ammo,
    })
}

/// The shot found the Duck; defensive perks get a chance before it lands.
fn resolve_duck_hit(
    state: &mut GameState,
    target: Cell,
    armor_piercing: bool,
    rng: &mut dyn RoundRng,
) -> ShotEffect {
    let duck = &state.inventory.duck;
    let can_reflect = duck.perks.mirror_plumage && !duck.round.reflection_used;
    let can_auto_fly = duck.perks.auto_flight && !duck.round.auto_flight_used;

    if !armor_piercing && can_reflect {
        state.inventory.duck.round.reflection_used = true;
        if rng.roll_percent(REFLECT_CHANCE_PERCENT) {
            state.shot_cells.push(target);
            state.end_with(EndReason::HunterHitBeaver);
            return ShotEffect::Reflected;
        }
        let candidates = state.live_cells_except(&[target]);
        let to = pick(rng, &candidates);
        if let Some(cell) = to {
            state.shot_cells.push(cell);
        }
        finish_shot(state);
        return ShotEffect::Redirected { to };
    }

    if !armor_piercing && can_auto_fly {
        let mut exclude = vec![target];
        exclude.extend(state.beaver_cell);
        exclude.extend(state.warden_cell);
        let candidates = state.live_cells_except(&exclude);
        if let Some(to) = pick(rng, &candidates) {
            state.inventory.duck.round.auto_flight_used = true;
            state.shot_cells.push(target);
            land_duck(state, to);
            finish_shot(state);
            return ShotEffect::Evaded { to };
        }
    }

    state.shot_cells.push(target);
    state.end_with(EndReason::HunterShotDuck);
    ShotEffect::HitDuck
}

/// A shot that did not end the match: attrition check, then the Duck moves.
fn finish_shot(state: &mut GameState) {
    if state.ammo == 0 {
        state.end_with(EndReason::HunterOutOfAmmo);
    } else {
        state.pass_to_duck();
    }
}

pub fn use_binoculars(
    state: &mut GameState,
    rng: &mut dyn RoundRng,
) -> Result<ActionReport, DomainError> {
    require_phase(state, Phase::Hunter)?;
    if !state.inventory.hunter.perks.binoculars {
        return Err(DomainError::validation(
            ValidationKind::PerkNotOwned,
            "Binoculars not owned",
        ));
    }
    if state.inventory.hunter.turn.binoculars_used {
        return Err(DomainError::validation(
            ValidationKind::PerkAlreadyUsed,
            "Binoculars already used this turn",
        ));
    }

    let candidates = state.live_cells_except(&state.binoculars_used_cells);
    state.inventory.hunter.turn.binoculars_used = true;

    let Some(cell) = pick(rng, &candidates) else {
        state.pass_to_duck();
        return Ok(ActionReport::Scanned {
            cell: None,
            finding: None,
        });
    };

    let finding = if state.duck_cell == Some(cell) {
        Finding::Duck
    } else if state.beaver_cell == Some(cell) {
        Finding::Beaver
    } else if state.warden_cell == Some(cell) {
        Finding::Warden
    } else {
        state.revealed_empty_by_binoculars.push(cell);
        Finding::Empty
    };
    state.binoculars_used_cells.push(cell);
    state.pass_to_duck();

    Ok(ActionReport::Scanned {
        cell: Some(cell),
        finding: Some(finding),
    })
}

pub fn set_trap(state: &mut GameState, cell: Cell) -> Result<ActionReport, DomainError> {
    require_phase(state, Phase::Hunter)?;
    if state.inventory.hunter.perks.traps == 0 {
        return Err(DomainError::validation(
            ValidationKind::NoChargesLeft,
            "No trap charges left",
        ));
    }
    if state.inventory.hunter.turn.trap_set {
        return Err(DomainError::validation(
            ValidationKind::PerkAlreadyUsed,
            "A trap was already set this turn",
        ));
    }
    require_active(state, cell)?;
    if state.is_shot(cell) {
        return Err(DomainError::validation(
            ValidationKind::CellAlreadyShot,
            format!("Cell {cell} was already shot"),
        ));
    }
    if state.is_trapped(cell) {
        return Err(DomainError::validation(
            ValidationKind::CellTrapped,
            format!("Cell {cell} already carries a trap"),
        ));
    }

    let hunter = &mut state.inventory.hunter;
    hunter.perks.traps -= 1;
    hunter.spent.traps += 1;
    hunter.turn.trap_set = true;
    state.trap_cells.push(cell);

    Ok(ActionReport::TrapSet { cell })
}

pub fn stay(state: &mut GameState) -> Result<ActionReport, DomainError> {
    require_phase(state, Phase::Duck)?;
    state.duck_snared_turns = state.duck_snared_turns.saturating_sub(1);
    state.pass_to_hunter();
    Ok(ActionReport::Stayed {
        snared_turns_left: state.duck_snared_turns,
    })
}

pub fn fly(state: &mut GameState, cell: Cell) -> Result<ActionReport, DomainError> {
    require_phase(state, Phase::Duck)?;
    ensure_not_snared(state)?;
    require_active(state, cell)?;
    let from = require_duck_cell(state, "fly")?;
    if cell == from {
        return Err(DomainError::validation(
            ValidationKind::SameCell,
            format!("Duck is already on cell {cell}"),
        ));
    }
    if state.binoculars_used_cells.contains(&cell) {
        return Err(DomainError::validation(
            ValidationKind::CellRevealed,
            format!("Cell {cell} was scanned by binoculars"),
        ));
    }
    if state.is_shot(cell) && !state.inventory.duck.perks.ghost_flight {
        return Err(DomainError::validation(
            ValidationKind::CellAlreadyShot,
            format!("Cell {cell} was already shot"),
        ));
    }

    if let Some(reason) = hazard_reason_for_duck(state, cell) {
        state.duck_cell = Some(cell);
        state.end_with(reason);
        return Ok(ActionReport::Flew {
            from,
            to: cell,
            snared: false,
        });
    }

    let snared = land_duck(state, cell);
    state.pass_to_hunter();
    Ok(ActionReport::Flew {
        from,
        to: cell,
        snared,
    })
}

pub fn call_rain(state: &mut GameState) -> Result<ActionReport, DomainError> {
    require_phase(state, Phase::Duck)?;
    let duck = &mut state.inventory.duck;
    if !duck.perks.rain {
        return Err(DomainError::validation(
            ValidationKind::PerkNotOwned,
            "Rain not owned",
        ));
    }
    if duck.round.rain_used {
        return Err(DomainError::validation(
            ValidationKind::PerkAlreadyUsed,
            "Rain already called this round",
        ));
    }
    duck.round.rain_used = true;
    duck.round.rain_active = true;
    // Rain takes the Duck's turn, so it counts down a snare like staying does.
    state.duck_snared_turns = state.duck_snared_turns.saturating_sub(1);
    state.pass_to_hunter();
    Ok(ActionReport::RainCalled)
}

/// Relocate to a random cell that is in play, unshot and hazard-free.
///
/// Cells scanned by binoculars stay eligible here.
pub fn safe_flight(
    state: &mut GameState,
    rng: &mut dyn RoundRng,
) -> Result<ActionReport, DomainError> {
    require_phase(state, Phase::Duck)?;
    if !state.inventory.duck.perks.safe_flight {
        return Err(DomainError::validation(
            ValidationKind::PerkNotOwned,
            "Safe flight not owned",
        ));
    }
    ensure_not_snared(state)?;
    let from = require_duck_cell(state, "safe_flight")?;

    let mut exclude = vec![from];
    exclude.extend(state.beaver_cell);
    exclude.extend(state.warden_cell);
    let candidates = state.live_cells_except(&exclude);
    let to = pick(rng, &candidates).ok_or_else(|| {
        DomainError::validation(ValidationKind::NoSafeCell, "No safe cell to fly to")
    })?;

    let snared = land_duck(state, to);
    state.pass_to_hunter();
    Ok(ActionReport::SafeFlew { from, to, snared })
}
