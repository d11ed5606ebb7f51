//! Repository implementations for the Ledger domain

pub mod balances;
pub mod config;
pub mod role_rewards;
pub mod transactions;

use sqlx::{PgPool, Postgres, Transaction};

pub use balances::BalanceRepository;
pub use config::GuildConfigRepository;
pub use role_rewards::{grant_crossed_thresholds_tx, RoleRewardRepository};
pub use transactions::{
    claim_daily_tx, credit_balance_tx, debit_balance_tx, get_balance_for_update_tx,
    insert_transaction_tx, lock_order, set_last_transfer_at_tx, TransactionRepository,
};

/// Combined repository access for the Ledger domain.
#[derive(Clone)]
pub struct LedgerRepositories {
    pool: PgPool,
    pub balances: BalanceRepository,
    pub configs: GuildConfigRepository,
    pub transactions: TransactionRepository,
    pub role_rewards: RoleRewardRepository,
}

impl LedgerRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            balances: BalanceRepository::new(pool.clone()),
            configs: GuildConfigRepository::new(pool.clone()),
            transactions: TransactionRepository::new(pool.clone()),
            role_rewards: RoleRewardRepository::new(pool.clone()),
            pool,
        }
    }

    /// Begin a new database transaction.
    pub async fn begin(&self) -> std::result::Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }
}
