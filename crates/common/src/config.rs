//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables to ensure
//! clean separation between code and config.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Database connection URL (PostgreSQL)
    pub database_url: String,

    /// Shared-secret key the chat-gateway process presents as `Authorization: Bearer <key>`
    pub bot_api_key: String,

    /// Shared-secret key admin tooling presents for guild-config/squad-admin endpoints
    pub admin_api_key: String,

    /// Guild reference IANA timezone used for calendar-date arithmetic
    pub guild_default_timezone: String,

    /// Runtime configuration
    pub log_level: String,
    pub rust_log: String,
    pub port: u16,

    /// Outbound HTTP client timeout for beacon webhook delivery, in milliseconds
    pub webhook_timeout_ms: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let config = Self {
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL is required"))?,

            bot_api_key: env::var("BOT_API_KEY")
                .map_err(|_| anyhow::anyhow!("BOT_API_KEY is required"))?,
            admin_api_key: env::var("ADMIN_API_KEY")
                .map_err(|_| anyhow::anyhow!("ADMIN_API_KEY is required"))?,

            guild_default_timezone: env::var("GUILD_DEFAULT_TIMEZONE")
                .unwrap_or_else(|_| "America/New_York".to_string()),

            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "bytes_core=debug".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .unwrap_or(8000),

            webhook_timeout_ms: env::var("WEBHOOK_TIMEOUT_MS")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
        };

        Ok(config)
    }
}
