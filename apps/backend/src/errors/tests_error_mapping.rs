// Unit tests for error mapping - pure domain errors into service errors
use crate::errors::domain::{
    ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind,
};
use crate::{AppError, ErrorCode};

#[test]
fn maps_validation_kinds_to_codes() {
    let cases = [
        (ValidationKind::OutOfTurn, ErrorCode::OutOfTurn),
        (ValidationKind::PhaseMismatch, ErrorCode::PhaseMismatch),
        (ValidationKind::InvalidCell, ErrorCode::InvalidCell),
        (ValidationKind::CellAlreadyShot, ErrorCode::CellAlreadyShot),
        (ValidationKind::CellRevealed, ErrorCode::CellRevealed),
        (ValidationKind::DuckSnared, ErrorCode::DuckSnared),
        (ValidationKind::MatchEnded, ErrorCode::MatchEnded),
        (ValidationKind::InsufficientFunds, ErrorCode::InsufficientFunds),
        (
            ValidationKind::Other("weird".into()),
            ErrorCode::ValidationError,
        ),
    ];
    for (kind, code) in cases {
        let app: AppError = DomainError::validation(kind, "bad input").into();
        assert_eq!(app.code(), code);
        assert!(app.is_rejection());
        assert_eq!(app.detail(), "bad input");
    }
}

#[test]
fn maps_conflicts() {
    let pending = DomainError::conflict(ConflictKind::SettlementPending, "pending");
    let app: AppError = pending.into();
    assert_eq!(app.code().as_str(), "SETTLEMENT_PENDING");

    let running = DomainError::conflict(ConflictKind::MatchInProgress, "already running");
    let app: AppError = running.into();
    assert_eq!(app.code(), ErrorCode::MatchInProgress);

    let other = DomainError::conflict(ConflictKind::Other("x".into()), "generic conflict");
    let app: AppError = other.into();
    assert_eq!(app.code().as_str(), "CONFLICT");
}

#[test]
fn maps_not_found() {
    let nf = DomainError::not_found(NotFoundKind::Match, "no match");
    let app: AppError = nf.into();
    assert_eq!(app.code().as_str(), "MATCH_NOT_FOUND");

    let seating = DomainError::not_found(NotFoundKind::Seating, "no seating");
    let app: AppError = seating.into();
    assert_eq!(app.code(), ErrorCode::SeatingNotFound);
}

#[test]
fn maps_infra() {
    let t = DomainError::infra(InfraErrorKind::Timeout, "timeout");
    let app: AppError = t.into();
    assert_eq!(app.code().as_str(), "UPSTREAM_TIMEOUT");
    assert!(matches!(app, AppError::Upstream { .. }));
    assert!(!app.is_rejection());

    let other = DomainError::infra(InfraErrorKind::Other("boom".into()), "boom");
    let app: AppError = other.into();
    assert_eq!(app.code(), ErrorCode::Internal);
}

#[test]
fn maps_config() {
    let app: AppError = DomainError::config("unknown level 42").into();
    assert_eq!(app.code(), ErrorCode::ConfigError);
    assert!(matches!(app, AppError::Config { .. }));
}
