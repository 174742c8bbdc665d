//! Perk and economy rules.
//!
//! Pure lookups mapping perk identifiers and ranks to cost, protection
//! percentage and character-level bonus. Consulted by the turn engine for
//! ownership checks, by the shop for purchases and by settlement for
//! armored-feather protection.

use serde::{Deserialize, Serialize};

use crate::domain::state::{Gold, Side};

/// Chance (percent) that mirror plumage reflects a hit back as a Beaver hit.
pub const REFLECT_CHANCE_PERCENT: u8 = 10;
/// Share (percent) of the Hunter's payout washed away by rain.
pub const RAIN_PAYOUT_REDUCTION_PERCENT: u8 = 50;

pub const BINOCULARS_COST: Gold = 150;
pub const BINOCULARS_LEVEL_BONUS: u32 = 1;

pub const ARMORED_FEATHER_MAX_RANK: u8 = 3;
const ARMORED_FEATHER_COST: [Gold; 3] = [100, 200, 350];
const ARMORED_FEATHER_PROTECTION: [u8; 3] = [5, 10, 15];
const ARMORED_FEATHER_LEVEL_BONUS: [u32; 3] = [1, 1, 2];

pub const EXTRA_AMMO_MAX_RANK: u8 = 2;
const EXTRA_AMMO_COST: [Gold; 2] = [200, 400];
const EXTRA_AMMO_LEVEL_BONUS: [u32; 2] = [1, 1];

/// Every purchasable perk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PerkId {
    Binoculars,
    ArmorPiercing,
    Trap,
    ExtraAmmo,
    ArmoredFeather,
    MirrorPlumage,
    AutoFlight,
    GhostFlight,
    Rain,
    SafeFlight,
    BeaverSense,
}

/// How ownership of a perk grows with purchases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerkKind {
    /// Owned or not.
    Unique,
    /// Bought rank by rank up to `max_rank`.
    Ranked { max_rank: u8 },
    /// Each purchase adds one charge; using the perk spends one.
    Consumable,
}

impl PerkId {
    pub const ALL: [PerkId; 11] = [
        PerkId::Binoculars,
        PerkId::ArmorPiercing,
        PerkId::Trap,
        PerkId::ExtraAmmo,
        PerkId::ArmoredFeather,
        PerkId::MirrorPlumage,
        PerkId::AutoFlight,
        PerkId::GhostFlight,
        PerkId::Rain,
        PerkId::SafeFlight,
        PerkId::BeaverSense,
    ];

    pub fn side(self) -> Side {
        match self {
            PerkId::Binoculars | PerkId::ArmorPiercing | PerkId::Trap | PerkId::ExtraAmmo => {
                Side::Hunter
            }
            _ => Side::Duck,
        }
    }

    pub fn kind(self) -> PerkKind {
        match self {
            PerkId::ArmorPiercing | PerkId::Trap => PerkKind::Consumable,
            PerkId::ArmoredFeather => PerkKind::Ranked {
                max_rank: ARMORED_FEATHER_MAX_RANK,
            },
            PerkId::ExtraAmmo => PerkKind::Ranked {
                max_rank: EXTRA_AMMO_MAX_RANK,
            },
            _ => PerkKind::Unique,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            PerkId::Binoculars => "binoculars",
            PerkId::ArmorPiercing => "armor-piercing",
            PerkId::Trap => "trap",
            PerkId::ExtraAmmo => "extra-ammo",
            PerkId::ArmoredFeather => "armored-feather",
            PerkId::MirrorPlumage => "mirror-plumage",
            PerkId::AutoFlight => "auto-flight",
            PerkId::GhostFlight => "ghost-flight",
            PerkId::Rain => "rain",
            PerkId::SafeFlight => "safe-flight",
            PerkId::BeaverSense => "beaver-sense",
        }
    }
}

pub fn binoculars_cost() -> Gold {
    BINOCULARS_COST
}

pub fn binoculars_level_bonus() -> u32 {
    BINOCULARS_LEVEL_BONUS
}

fn rank_slot(rank: u8, max_rank: u8) -> Option<usize> {
    (1..=max_rank).contains(&rank).then(|| (rank - 1) as usize)
}

/// Cost of buying armored feather at `rank` (1..=3).
pub fn armored_feather_cost(rank: u8) -> Option<Gold> {
    rank_slot(rank, ARMORED_FEATHER_MAX_RANK).map(|i| ARMORED_FEATHER_COST[i])
}

/// Protection percentage for an owned rank; 0 when not owned.
pub fn armored_feather_protection_percent(rank: u8) -> u8 {
    rank_slot(rank.min(ARMORED_FEATHER_MAX_RANK), ARMORED_FEATHER_MAX_RANK)
        .map(|i| ARMORED_FEATHER_PROTECTION[i])
        .unwrap_or(0)
}

pub fn armored_feather_level_bonus(rank: u8) -> Option<u32> {
    rank_slot(rank, ARMORED_FEATHER_MAX_RANK).map(|i| ARMORED_FEATHER_LEVEL_BONUS[i])
}

pub fn can_upgrade_armored_feather(current_rank: u8) -> bool {
    current_rank < ARMORED_FEATHER_MAX_RANK
}

/// Cost of the rank after `current_rank`, if one exists.
pub fn next_armored_feather_cost(current_rank: u8) -> Option<Gold> {
    if !can_upgrade_armored_feather(current_rank) {
        return None;
    }
    armored_feather_cost(current_rank + 1)
}

/// Amount of a lost bet kept by the Duck thanks to armored feather.
///
/// `floor(bet * p / 100)`; zero for non-positive bets or rank 0.
pub fn protection_amount(bet: Gold, rank: u8) -> Gold {
    if bet <= 0 {
        return 0;
    }
    bet * armored_feather_protection_percent(rank) as Gold / 100
}

/// Cost of buying `perk` at `rank` (for consumables: one charge, rank ignored).
pub fn perk_cost(perk: PerkId, rank: u8) -> Option<Gold> {
    match perk {
        PerkId::Binoculars => (rank == 1).then(binoculars_cost),
        PerkId::ArmorPiercing => Some(60),
        PerkId::Trap => Some(50),
        PerkId::ExtraAmmo => rank_slot(rank, EXTRA_AMMO_MAX_RANK).map(|i| EXTRA_AMMO_COST[i]),
        PerkId::ArmoredFeather => armored_feather_cost(rank),
        PerkId::MirrorPlumage => (rank == 1).then_some(250),
        PerkId::AutoFlight => (rank == 1).then_some(200),
        PerkId::GhostFlight => (rank == 1).then_some(180),
        PerkId::Rain => (rank == 1).then_some(120),
        PerkId::SafeFlight => (rank == 1).then_some(160),
        PerkId::BeaverSense => (rank == 1).then_some(90),
    }
}

/// Character-level bonus granted when `perk` reaches `rank`.
pub fn perk_level_bonus(perk: PerkId, rank: u8) -> Option<u32> {
    match perk {
        PerkId::Binoculars => (rank == 1).then(binoculars_level_bonus),
        PerkId::ArmorPiercing | PerkId::Trap => Some(0),
        PerkId::ExtraAmmo => {
            rank_slot(rank, EXTRA_AMMO_MAX_RANK).map(|i| EXTRA_AMMO_LEVEL_BONUS[i])
        }
        PerkId::ArmoredFeather => armored_feather_level_bonus(rank),
        PerkId::MirrorPlumage => (rank == 1).then_some(2),
        PerkId::AutoFlight
        | PerkId::GhostFlight
        | PerkId::Rain
        | PerkId::SafeFlight
        | PerkId::BeaverSense => (rank == 1).then_some(1),
    }
}

/// Sum of level bonuses for owning `perk` at `owned` (charges count nothing).
pub fn accumulated_level_bonus(perk: PerkId, owned: u32) -> u32 {
    match perk.kind() {
        PerkKind::Consumable => 0,
        PerkKind::Unique => {
            if owned > 0 {
                perk_level_bonus(perk, 1).unwrap_or(0)
            } else {
                0
            }
        }
        PerkKind::Ranked { max_rank } => {
            let top = owned.min(max_rank as u32) as u8;
            (1..=top)
                .filter_map(|r| perk_level_bonus(perk, r))
                .sum()
        }
    }
}
