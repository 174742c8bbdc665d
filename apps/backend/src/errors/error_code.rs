//! Error codes for the Hunter vs Duck engine.
//!
//! This module defines all error codes returned to callers of the engine.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and are the machine-readable
//! reason attached to every rejected request.

use core::fmt;

/// Centralized error codes for the engine surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Turn and phase
    /// Action submitted by the side that is not on turn
    OutOfTurn,
    /// Action is not legal in the current phase
    PhaseMismatch,
    /// Actor is not seated in this match
    NotAParticipant,
    /// Action or perk belongs to the other side
    WrongSide,
    /// Match already has an outcome
    MatchEnded,

    // Targets
    /// Cell is not one of the active cells
    InvalidCell,
    /// Cell has already been fired at
    CellAlreadyShot,
    /// Cell was scanned by binoculars and is closed to flight
    CellRevealed,
    /// Duck tried to fly onto its own cell
    SameCell,
    /// Cell already carries a trap
    CellTrapped,
    /// No cell qualifies for a safe relocation
    NoSafeCell,

    // Perks and economy
    /// Perk is not owned by the acting side
    PerkNotOwned,
    /// One-shot perk was already used this round or turn
    PerkAlreadyUsed,
    /// Consumable perk has no charges left
    NoChargesLeft,
    /// Duck is snared and cannot move
    DuckSnared,
    /// Balance does not cover the cost or bet
    InsufficientFunds,
    /// Requested rank is already owned or does not exist
    RankUnavailable,
    /// Bet amount is not acceptable
    InvalidBet,
    /// General validation error
    ValidationError,

    // Resource Not Found
    /// Match id is unknown to the store
    MatchNotFound,
    /// Player is unknown to the player store
    PlayerNotFound,
    /// Lobby has no seating for the match
    SeatingNotFound,
    /// General not found error
    NotFound,

    // Conflicts
    /// Round has an outcome whose settlement has not completed
    SettlementPending,
    /// Match already has a round; use reset to start another
    MatchInProgress,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System Errors
    /// A collaborator (player store, history, lobby) failed
    UpstreamUnavailable,
    /// A collaborator timed out
    UpstreamTimeout,
    /// Stored data could not be interpreted
    DataCorruption,
    /// Internal error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OutOfTurn => "OUT_OF_TURN",
            Self::PhaseMismatch => "PHASE_MISMATCH",
            Self::NotAParticipant => "NOT_A_PARTICIPANT",
            Self::WrongSide => "WRONG_SIDE",
            Self::MatchEnded => "MATCH_ENDED",

            Self::InvalidCell => "INVALID_CELL",
            Self::CellAlreadyShot => "CELL_ALREADY_SHOT",
            Self::CellRevealed => "CELL_REVEALED",
            Self::SameCell => "SAME_CELL",
            Self::CellTrapped => "CELL_TRAPPED",
            Self::NoSafeCell => "NO_SAFE_CELL",

            Self::PerkNotOwned => "PERK_NOT_OWNED",
            Self::PerkAlreadyUsed => "PERK_ALREADY_USED",
            Self::NoChargesLeft => "NO_CHARGES_LEFT",
            Self::DuckSnared => "DUCK_SNARED",
            Self::InsufficientFunds => "INSUFFICIENT_FUNDS",
            Self::RankUnavailable => "RANK_UNAVAILABLE",
            Self::InvalidBet => "INVALID_BET",
            Self::ValidationError => "VALIDATION_ERROR",

            Self::MatchNotFound => "MATCH_NOT_FOUND",
            Self::PlayerNotFound => "PLAYER_NOT_FOUND",
            Self::SeatingNotFound => "SEATING_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::SettlementPending => "SETTLEMENT_PENDING",
            Self::MatchInProgress => "MATCH_IN_PROGRESS",
            Self::Conflict => "CONFLICT",

            Self::UpstreamUnavailable => "UPSTREAM_UNAVAILABLE",
            Self::UpstreamTimeout => "UPSTREAM_TIMEOUT",
            Self::DataCorruption => "DATA_CORRUPTION",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
