use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::actions::LastAction;
use crate::domain::perks::PerkId;
use crate::domain::settlement::SettlementLedger;
use crate::errors::domain::{DomainError, ValidationKind};

pub type Cell = u8;
pub type PlayerId = i64;
pub type MatchId = i64;
pub type Gold = i64;

/// The two roles of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Side {
    Hunter,
    Duck,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Hunter => Side::Duck,
            Side::Duck => Side::Hunter,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Side::Hunter => "hunter",
            Side::Duck => "duck",
        }
    }
}

/// Match progression phases, in strict order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    /// Duck chooses its starting cell.
    DuckInitial,
    /// Hunter fires, scans or sets a trap.
    Hunter,
    /// Duck stays, flies or uses an ability.
    Duck,
    /// Terminal, read-only.
    Ended,
}

impl Phase {
    /// Side whose action is legal in this phase.
    pub fn actor(self) -> Option<Side> {
        match self {
            Phase::DuckInitial | Phase::Duck => Some(Side::Duck),
            Phase::Hunter => Some(Side::Hunter),
            Phase::Ended => None,
        }
    }
}

/// Why a match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EndReason {
    DuckHitBeaver,
    DuckHitWarden,
    HunterHitWarden,
    HunterHitBeaver,
    HunterShotDuck,
    HunterOutOfAmmo,
}

impl EndReason {
    pub const ALL: [EndReason; 6] = [
        EndReason::DuckHitBeaver,
        EndReason::DuckHitWarden,
        EndReason::HunterHitWarden,
        EndReason::HunterHitBeaver,
        EndReason::HunterShotDuck,
        EndReason::HunterOutOfAmmo,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            EndReason::DuckHitBeaver => "duck-hit-beaver",
            EndReason::DuckHitWarden => "duck-hit-warden",
            EndReason::HunterHitWarden => "hunter-hit-warden",
            EndReason::HunterHitBeaver => "hunter-hit-beaver",
            EndReason::HunterShotDuck => "hunter-shot-duck",
            EndReason::HunterOutOfAmmo => "hunter-out-of-ammo",
        }
    }

    /// Side that wins when the match ends for this reason.
    pub fn winner(self) -> Side {
        match self {
            EndReason::DuckHitBeaver | EndReason::DuckHitWarden | EndReason::HunterShotDuck => {
                Side::Hunter
            }
            EndReason::HunterHitWarden
            | EndReason::HunterHitBeaver
            | EndReason::HunterOutOfAmmo => Side::Duck,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub winner: Side,
    pub reason: EndReason,
}

impl Outcome {
    pub fn from_reason(reason: EndReason) -> Self {
        Self {
            winner: reason.winner(),
            reason,
        }
    }
}

/// Hunter perks that persist across rounds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HunterPerks {
    pub binoculars: bool,
    /// Remaining armor-piercing charges.
    pub armor_piercing: u32,
    /// Remaining trap charges.
    pub traps: u32,
    /// Extra-ammo rank (adds one shot per rank).
    pub extra_ammo: u8,
}

/// Hunter flags that reset at the start of every Hunter turn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HunterTurnFlags {
    pub binoculars_used: bool,
    pub trap_set: bool,
}

/// Consumable charges spent during the current round, flushed at settlement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpentCharges {
    pub armor_piercing: u32,
    pub traps: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HunterInventory {
    pub perks: HunterPerks,
    pub turn: HunterTurnFlags,
    pub spent: SpentCharges,
    /// Cosmetic progression counter.
    pub character_level: u32,
}

/// Duck perks that persist across rounds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuckPerks {
    /// Armored-feather rank, 0 when not owned.
    pub armored_feather: u8,
    pub mirror_plumage: bool,
    pub auto_flight: bool,
    pub ghost_flight: bool,
    pub rain: bool,
    pub safe_flight: bool,
    pub beaver_sense: bool,
}

/// Duck one-shot flags; monotone within a round, cleared by the next round.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuckRoundFlags {
    pub reflection_used: bool,
    pub auto_flight_used: bool,
    pub rain_used: bool,
    pub rain_active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuckInventory {
    pub perks: DuckPerks,
    pub round: DuckRoundFlags,
    /// Cosmetic progression counter.
    pub character_level: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    pub hunter: HunterInventory,
    pub duck: DuckInventory,
}

impl Inventory {
    /// Owned rank (or charge count) of a perk; 0 when not owned.
    pub fn rank_of(&self, perk: PerkId) -> u32 {
        let h = &self.hunter.perks;
        let d = &self.duck.perks;
        match perk {
            PerkId::Binoculars => h.binoculars as u32,
            PerkId::ArmorPiercing => h.armor_piercing,
            PerkId::Trap => h.traps,
            PerkId::ExtraAmmo => h.extra_ammo as u32,
            PerkId::ArmoredFeather => d.armored_feather as u32,
            PerkId::MirrorPlumage => d.mirror_plumage as u32,
            PerkId::AutoFlight => d.auto_flight as u32,
            PerkId::GhostFlight => d.ghost_flight as u32,
            PerkId::Rain => d.rain as u32,
            PerkId::SafeFlight => d.safe_flight as u32,
            PerkId::BeaverSense => d.beaver_sense as u32,
        }
    }

    /// Overwrite the owned rank (or charge count) of a perk.
    pub fn set_rank(&mut self, perk: PerkId, rank: u32) {
        let h = &mut self.hunter.perks;
        let d = &mut self.duck.perks;
        let clamp_u8 = |r: u32| r.min(u8::MAX as u32) as u8;
        match perk {
            PerkId::Binoculars => h.binoculars = rank > 0,
            PerkId::ArmorPiercing => h.armor_piercing = rank,
            PerkId::Trap => h.traps = rank,
            PerkId::ExtraAmmo => h.extra_ammo = clamp_u8(rank),
            PerkId::ArmoredFeather => d.armored_feather = clamp_u8(rank),
            PerkId::MirrorPlumage => d.mirror_plumage = rank > 0,
            PerkId::AutoFlight => d.auto_flight = rank > 0,
            PerkId::GhostFlight => d.ghost_flight = rank > 0,
            PerkId::Rain => d.rain = rank > 0,
            PerkId::SafeFlight => d.safe_flight = rank > 0,
            PerkId::BeaverSense => d.beaver_sense = rank > 0,
        }
    }

    pub fn add_character_levels(&mut self, side: Side, levels: u32) {
        match side {
            Side::Hunter => self.hunter.character_level += levels,
            Side::Duck => self.duck.character_level += levels,
        }
    }

    /// Clear every per-round and per-turn flag; ownership is kept.
    pub fn start_round(&mut self) {
        self.hunter.turn = HunterTurnFlags::default();
        self.hunter.spent = SpentCharges::default();
        self.duck.round = DuckRoundFlags::default();
    }
}

/// Authoritative state of one match round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub match_id: MatchId,
    /// Round number within the match (1-based, bumped by reset).
    pub round_no: u32,
    /// Base seed every random draw of this match is derived from.
    pub rng_seed: u64,
    /// Count of actions applied this round; part of the per-action seed.
    pub action_seq: u32,

    pub hunter_id: PlayerId,
    pub duck_id: PlayerId,

    pub level: u8,
    /// Ascending, immutable for the round.
    pub active_cells: Vec<Cell>,
    /// Append-only record of fired-at cells.
    pub shot_cells: Vec<Cell>,
    pub beaver_cell: Option<Cell>,
    pub warden_cell: Option<Cell>,
    pub duck_cell: Option<Cell>,
    pub trap_cells: Vec<Cell>,
    /// Beaver cell hidden among two decoys, ascending.
    pub beaver_hint: Option<Vec<Cell>>,

    pub ammo: u8,
    pub phase: Phase,
    pub outcome: Option<Outcome>,

    pub hunter_bet: Gold,
    pub duck_bet: Gold,
    pub hunter_gold: Gold,
    pub duck_gold: Gold,

    pub inventory: Inventory,
    pub revealed_empty_by_binoculars: Vec<Cell>,
    pub binoculars_used_cells: Vec<Cell>,
    pub duck_snared_turns: u8,

    pub last_action: Option<LastAction>,
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    /// Present once an outcome has been reached and settlement has begun.
    pub settlement: Option<SettlementLedger>,
}

impl GameState {
    pub fn is_active(&self, cell: Cell) -> bool {
        self.active_cells.binary_search(&cell).is_ok()
    }

    pub fn is_shot(&self, cell: Cell) -> bool {
        self.shot_cells.contains(&cell)
    }

    pub fn is_hazard(&self, cell: Cell) -> bool {
        self.beaver_cell == Some(cell) || self.warden_cell == Some(cell)
    }

    pub fn is_trapped(&self, cell: Cell) -> bool {
        self.trap_cells.contains(&cell)
    }

    pub fn is_ended(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn player_for(&self, side: Side) -> PlayerId {
        match side {
            Side::Hunter => self.hunter_id,
            Side::Duck => self.duck_id,
        }
    }

    /// Side seated for a player id, if any.
    pub fn side_of(&self, player_id: PlayerId) -> Option<Side> {
        if player_id == self.hunter_id {
            Some(Side::Hunter)
        } else if player_id == self.duck_id {
            Some(Side::Duck)
        } else {
            None
        }
    }

    pub fn bet_of(&self, side: Side) -> Gold {
        match side {
            Side::Hunter => self.hunter_bet,
            Side::Duck => self.duck_bet,
        }
    }

    pub fn gold_of(&self, side: Side) -> Gold {
        match side {
            Side::Hunter => self.hunter_gold,
            Side::Duck => self.duck_gold,
        }
    }

    /// Active cells that are neither shot nor in `exclude`.
    pub fn live_cells_except(&self, exclude: &[Cell]) -> Vec<Cell> {
        self.active_cells
            .iter()
            .copied()
            .filter(|c| !self.is_shot(*c) && !exclude.contains(c))
            .collect()
    }

    /// Record the outcome and close the round.
    pub fn end_with(&mut self, reason: EndReason) {
        self.outcome = Some(Outcome::from_reason(reason));
        self.phase = Phase::Ended;
    }

    /// Hand the turn to the Hunter, clearing the Hunter's per-turn flags.
    pub fn pass_to_hunter(&mut self) {
        self.phase = Phase::Hunter;
        self.inventory.hunter.turn = HunterTurnFlags::default();
    }

    pub fn pass_to_duck(&mut self) {
        self.phase = Phase::Duck;
    }

    /// Round outcome is settled end to end (or there is nothing to settle).
    pub fn is_settled(&self) -> bool {
        match (&self.outcome, &self.settlement) {
            (None, _) => true,
            (Some(_), Some(ledger)) => ledger.is_complete(),
            (Some(_), None) => false,
        }
    }
}

pub fn require_duck_cell(state: &GameState, ctx: &'static str) -> Result<Cell, DomainError> {
    state.duck_cell.ok_or_else(|| {
        DomainError::validation_other(format!("Invariant violated: duck_cell must be set ({ctx})"))
    })
}

pub fn require_phase(state: &GameState, phase: Phase) -> Result<(), DomainError> {
    if state.is_ended() {
        return Err(DomainError::validation(
            ValidationKind::MatchEnded,
            "Match has already ended",
        ));
    }
    if state.phase != phase {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            format!("Expected phase {phase:?}, match is in {:?}", state.phase),
        ));
    }
    Ok(())
}
