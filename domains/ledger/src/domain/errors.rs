//! Ledger domain errors and their conversion into the shared API error type.

use bytes_common::Error;
use chrono::{DateTime, Utc};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("daily reward already claimed")]
    AlreadyClaimed { next_claim_at: DateTime<Utc> },

    #[error("transfer cooldown in effect")]
    Cooldown {
        retry_after_seconds: i64,
        cooldown_end_timestamp: DateTime<Utc>,
    },

    #[error("insufficient balance: need {required}, have {available}")]
    InsufficientBalance { required: i64, available: i64 },

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    #[error("repository error: {0}")]
    Repository(#[from] bytes_common::db::RepositoryError),
}

impl From<LedgerError> for Error {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::AlreadyClaimed { next_claim_at } => Error::domain(
                axum::http::StatusCode::CONFLICT,
                "ALREADY_CLAIMED",
                "Daily reward already claimed for today",
                json!({ "next_claim_at": next_claim_at }),
            ),
            LedgerError::Cooldown {
                retry_after_seconds,
                cooldown_end_timestamp,
            } => Error::domain(
                axum::http::StatusCode::TOO_MANY_REQUESTS,
                "TRANSFER_COOLDOWN",
                "Transfer cooldown is still in effect",
                json!({
                    "retry_after_seconds": retry_after_seconds,
                    "cooldown_end_timestamp": cooldown_end_timestamp,
                }),
            ),
            LedgerError::InsufficientBalance {
                required,
                available,
            } => Error::domain(
                axum::http::StatusCode::PAYMENT_REQUIRED,
                "INSUFFICIENT_BALANCE",
                "Insufficient balance for this operation",
                json!({ "required": required, "available": available }),
            ),
            LedgerError::Validation(msg) => Error::Validation(msg),
            LedgerError::Conflict(msg) => Error::Conflict(msg),
            LedgerError::NotFound(msg) => Error::NotFound(msg),
            LedgerError::Repository(repo_err) => repo_err.into(),
        }
    }
}
