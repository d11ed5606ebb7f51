//! Announce domain errors and their conversion into the shared API error type.

use bytes_common::Error;
use serde_json::json;

use super::webhook::WebhookError;

#[derive(Debug, thiserror::Error)]
pub enum AnnounceError {
    #[error("beacon cooldown: {seconds_remaining}s remaining")]
    OnCooldown { seconds_remaining: i64 },

    #[error("beacon body is empty")]
    EmptyBody,

    #[error("beacon body exceeds the channel's message size limit ({limit} chars)")]
    TooLong { limit: i32 },

    #[error("webhook unreachable: {0}")]
    Unreachable(#[from] WebhookError),

    #[error("repository error: {0}")]
    Repository(#[from] bytes_common::db::RepositoryError),
}

impl From<AnnounceError> for Error {
    fn from(err: AnnounceError) -> Self {
        match err {
            AnnounceError::OnCooldown { seconds_remaining } => Error::domain(
                axum::http::StatusCode::TOO_MANY_REQUESTS,
                "BEACON_COOLDOWN",
                "You are still on beacon cooldown",
                json!({ "retry_after_seconds": seconds_remaining }),
            ),
            AnnounceError::EmptyBody => Error::Validation("beacon body must not be empty".into()),
            AnnounceError::TooLong { limit } => Error::domain(
                axum::http::StatusCode::BAD_REQUEST,
                "BEACON_TOO_LONG",
                format!("beacon body exceeds the {limit}-character message limit"),
                json!({ "limit": limit }),
            ),
            AnnounceError::Unreachable(webhook_err) => Error::domain(
                match webhook_err {
                    WebhookError::Timeout => axum::http::StatusCode::GATEWAY_TIMEOUT,
                    WebhookError::NotFound | WebhookError::Unreachable(_) => {
                        axum::http::StatusCode::BAD_GATEWAY
                    }
                },
                "BEACON_UNREACHABLE",
                webhook_err.to_string(),
                json!({}),
            ),
            AnnounceError::Repository(repo_err) => repo_err.into(),
        }
    }
}
