use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::state::{Cell, PlayerId, Side};

/// Every move a player can submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Action {
    /// Duck's first placement; `None` lets the engine choose.
    PlaceDuck { cell: Option<Cell> },
    Shoot {
        cell: Cell,
        #[serde(default)]
        armor_piercing: bool,
    },
    UseBinoculars,
    SetTrap { cell: Cell },
    Stay,
    Fly { cell: Cell },
    CallRain,
    SafeFlight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
    PlaceDuck,
    Shoot,
    UseBinoculars,
    SetTrap,
    Stay,
    Fly,
    CallRain,
    SafeFlight,
}

impl ActionKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            ActionKind::PlaceDuck => "place-duck",
            ActionKind::Shoot => "shoot",
            ActionKind::UseBinoculars => "use-binoculars",
            ActionKind::SetTrap => "set-trap",
            ActionKind::Stay => "stay",
            ActionKind::Fly => "fly",
            ActionKind::CallRain => "call-rain",
            ActionKind::SafeFlight => "safe-flight",
        }
    }
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::PlaceDuck { .. } => ActionKind::PlaceDuck,
            Action::Shoot { .. } => ActionKind::Shoot,
            Action::UseBinoculars => ActionKind::UseBinoculars,
            Action::SetTrap { .. } => ActionKind::SetTrap,
            Action::Stay => ActionKind::Stay,
            Action::Fly { .. } => ActionKind::Fly,
            Action::CallRain => ActionKind::CallRain,
            Action::SafeFlight => ActionKind::SafeFlight,
        }
    }

    /// Side allowed to submit this action.
    pub fn side(&self) -> Side {
        match self {
            Action::Shoot { .. } | Action::UseBinoculars | Action::SetTrap { .. } => Side::Hunter,
            Action::PlaceDuck { .. }
            | Action::Stay
            | Action::Fly { .. }
            | Action::CallRain
            | Action::SafeFlight => Side::Duck,
        }
    }
}

/// How a shot resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "kebab-case")]
pub enum ShotEffect {
    Miss,
    HitWarden,
    HitBeaver,
    HitDuck,
    /// Mirror plumage bounced the shot back onto the Beaver.
    Reflected,
    /// Mirror plumage deflected the shot to another cell (if any was live).
    Redirected { to: Option<Cell> },
    /// Auto-flight carried the Duck away before the shot landed.
    Evaded { to: Cell },
}

/// What binoculars saw on the scanned cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Finding {
    Duck,
    Beaver,
    Warden,
    Empty,
}

/// Structured payload describing the effect of an applied action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ActionReport {
    Placed {
        cell: Cell,
        snared: bool,
    },
    Shot {
        target: Cell,
        armor_piercing: bool,
        effect: ShotEffect,
        ammo_left: u8,
    },
    Scanned {
        cell: Option<Cell>,
        finding: Option<Finding>,
    },
    TrapSet {
        cell: Cell,
    },
    Stayed {
        snared_turns_left: u8,
    },
    Flew {
        from: Cell,
        to: Cell,
        snared: bool,
    },
    RainCalled,
    SafeFlew {
        from: Cell,
        to: Cell,
        snared: bool,
    },
}

/// Audit trail entry for the most recent action; never read by the rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastAction {
    pub kind: ActionKind,
    pub actor: Side,
    pub player_id: PlayerId,
    pub report: ActionReport,
    #[serde(with = "time::serde::rfc3339")]
    pub at: OffsetDateTime,
}
