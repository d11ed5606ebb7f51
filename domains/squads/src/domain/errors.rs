//! Squads domain errors and their conversion into the shared API error type.

use bytes_common::Error;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum SquadError {
    #[error("{0}")]
    NotFound(String),

    #[error("squad is full")]
    SquadFull,

    #[error("already a member of this squad")]
    AlreadyInSquad,

    #[error("insufficient balance: need {required}, have {available}")]
    InsufficientBalance { required: i64, available: i64 },

    #[error("squad switching is disabled during active challenge campaigns")]
    CampaignLocked,

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("repository error: {0}")]
    Repository(#[from] bytes_common::db::RepositoryError),
}

impl From<SquadError> for Error {
    fn from(err: SquadError) -> Self {
        match err {
            SquadError::NotFound(msg) => Error::NotFound(msg),
            SquadError::SquadFull => Error::domain(
                axum::http::StatusCode::CONFLICT,
                "SQUAD_FULL",
                "This squad has reached its member limit",
                json!({}),
            ),
            SquadError::AlreadyInSquad => Error::domain(
                axum::http::StatusCode::CONFLICT,
                "ALREADY_IN_SQUAD",
                "You are already a member of this squad",
                json!({}),
            ),
            SquadError::InsufficientBalance {
                required,
                available,
            } => Error::domain(
                axum::http::StatusCode::PAYMENT_REQUIRED,
                "INSUFFICIENT_BALANCE",
                "Insufficient balance to join this squad",
                json!({ "required": required, "available": available }),
            ),
            SquadError::CampaignLocked => Error::domain(
                axum::http::StatusCode::LOCKED,
                "CAMPAIGN_LOCKED",
                "Squad switching is disabled during active challenge campaigns",
                json!({}),
            ),
            SquadError::Validation(msg) => Error::Validation(msg),
            SquadError::Conflict(msg) => Error::Conflict(msg),
            SquadError::Repository(repo_err) => repo_err.into(),
        }
    }
}
