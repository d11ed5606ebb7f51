//! Ledger domain: balances, daily claim, transfer, leaderboard, guild economy config.

pub mod api;
pub mod domain;
pub mod repository;

pub use domain::{
    BytesBalance, BytesTransaction, Counterparty, DailyClaimResult, GuildConfig, LeaderboardEntry,
    LedgerError, LedgerService, RoleRewardGrant, TransferResult, SYSTEM_ID,
};
pub use api::LedgerState;
pub use repository::LedgerRepositories;
