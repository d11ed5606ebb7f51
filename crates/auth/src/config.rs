//! Auth configuration: the two shared-secret keys the API accepts.
//!
//! The chat-gateway process authenticates as the "bot" principal; guild
//! administration tooling authenticates as the "admin" principal. Both are
//! plain shared secrets compared in constant time, not hashed credentials —
//! there is no per-user login on this API, only per-process trust.

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub bot_api_key: String,
    pub admin_api_key: String,
}

impl AuthConfig {
    pub fn new(bot_api_key: impl Into<String>, admin_api_key: impl Into<String>) -> Self {
        Self {
            bot_api_key: bot_api_key.into(),
            admin_api_key: admin_api_key.into(),
        }
    }
}
