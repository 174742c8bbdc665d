use thiserror::Error;

use crate::errors::domain::{
    ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind,
};
use crate::errors::ErrorCode;

/// Service-level error returned by every engine operation.
///
/// Every variant carries an [`ErrorCode`] so callers can surface a
/// machine-readable reason to the acting player.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error("Validation error: {detail}")]
    Validation { code: ErrorCode, detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Conflict: {detail}")]
    Conflict { code: ErrorCode, detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Upstream error: {detail}")]
    Upstream { code: ErrorCode, detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
}

impl AppError {
    /// Machine-readable code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { code, .. } => *code,
            AppError::NotFound { code, .. } => *code,
            AppError::Conflict { code, .. } => *code,
            AppError::Config { .. } => ErrorCode::ConfigError,
            AppError::Upstream { code, .. } => *code,
            AppError::Internal { .. } => ErrorCode::Internal,
        }
    }

    /// Human-readable detail for this error
    pub fn detail(&self) -> &str {
        match self {
            AppError::Validation { detail, .. }
            | AppError::NotFound { detail, .. }
            | AppError::Conflict { detail, .. }
            | AppError::Config { detail }
            | AppError::Upstream { detail, .. }
            | AppError::Internal { detail } => detail,
        }
    }

    /// True for errors a player can fix by re-issuing corrected input.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            AppError::Validation { .. } | AppError::NotFound { .. } | AppError::Conflict { .. }
        )
    }

    pub fn invalid(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Validation {
            code,
            detail: detail.into(),
        }
    }

    pub fn not_found(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            detail: detail.into(),
        }
    }

    pub fn conflict(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Conflict {
            code,
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn upstream(detail: impl Into<String>) -> Self {
        Self::Upstream {
            code: ErrorCode::UpstreamUnavailable,
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }
}

fn validation_code(kind: &ValidationKind) -> ErrorCode {
    match kind {
        ValidationKind::OutOfTurn => ErrorCode::OutOfTurn,
        ValidationKind::PhaseMismatch => ErrorCode::PhaseMismatch,
        ValidationKind::NotAParticipant => ErrorCode::NotAParticipant,
        ValidationKind::WrongSide => ErrorCode::WrongSide,
        ValidationKind::InvalidCell => ErrorCode::InvalidCell,
        ValidationKind::CellAlreadyShot => ErrorCode::CellAlreadyShot,
        ValidationKind::CellRevealed => ErrorCode::CellRevealed,
        ValidationKind::SameCell => ErrorCode::SameCell,
        ValidationKind::CellTrapped => ErrorCode::CellTrapped,
        ValidationKind::PerkNotOwned => ErrorCode::PerkNotOwned,
        ValidationKind::PerkAlreadyUsed => ErrorCode::PerkAlreadyUsed,
        ValidationKind::NoChargesLeft => ErrorCode::NoChargesLeft,
        ValidationKind::DuckSnared => ErrorCode::DuckSnared,
        ValidationKind::NoSafeCell => ErrorCode::NoSafeCell,
        ValidationKind::InsufficientFunds => ErrorCode::InsufficientFunds,
        ValidationKind::RankUnavailable => ErrorCode::RankUnavailable,
        ValidationKind::MatchEnded => ErrorCode::MatchEnded,
        ValidationKind::InvalidBet => ErrorCode::InvalidBet,
        ValidationKind::Other(_) => ErrorCode::ValidationError,
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(kind, detail) => AppError::Validation {
                code: validation_code(&kind),
                detail,
            },
            DomainError::NotFound(kind, detail) => {
                let code = match kind {
                    NotFoundKind::Match => ErrorCode::MatchNotFound,
                    NotFoundKind::Player => ErrorCode::PlayerNotFound,
                    NotFoundKind::Seating => ErrorCode::SeatingNotFound,
                    NotFoundKind::Other(_) => ErrorCode::NotFound,
                };
                AppError::NotFound { code, detail }
            }
            DomainError::Conflict(kind, detail) => {
                let code = match kind {
                    ConflictKind::SettlementPending => ErrorCode::SettlementPending,
                    ConflictKind::MatchInProgress => ErrorCode::MatchInProgress,
                    ConflictKind::Other(_) => ErrorCode::Conflict,
                };
                AppError::Conflict { code, detail }
            }
            DomainError::Infra(kind, detail) => match kind {
                InfraErrorKind::Timeout => AppError::Upstream {
                    code: ErrorCode::UpstreamTimeout,
                    detail,
                },
                InfraErrorKind::StoreUnavailable => AppError::Upstream {
                    code: ErrorCode::UpstreamUnavailable,
                    detail,
                },
                InfraErrorKind::DataCorruption => AppError::Upstream {
                    code: ErrorCode::DataCorruption,
                    detail,
                },
                InfraErrorKind::Other(_) => AppError::Internal { detail },
            },
            DomainError::Config(detail) => AppError::Config { detail },
        }
    }
}

impl From<std::env::VarError> for AppError {
    fn from(e: std::env::VarError) -> Self {
        AppError::config(format!("env var error: {e}"))
    }
}
