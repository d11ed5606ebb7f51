pub mod config;
pub mod entities;
pub mod errors;
pub mod service;

pub use config::GuildConfig;
pub use entities::{
    BytesBalance, BytesTransaction, Counterparty, DailyClaimResult, LeaderboardEntry,
    RoleRewardGrant, TransferResult, SYSTEM_ID, WELCOME_BONUS_REASON,
};
pub use errors::LedgerError;
pub use service::LedgerService;
