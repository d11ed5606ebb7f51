//! Ledger business logic: the operations clients actually call, each
//! executing inside exactly one database transaction alongside its
//! corresponding activity log append.

use std::sync::Arc;

use bytes_activity::repository::append_activity_tx;
use bytes_common::{timezone, Clock};
use chrono::{Duration, TimeZone};
use serde_json::json;

use crate::domain::config::GuildConfig;
use crate::domain::entities::{
    daily_reward_reason, BytesBalance, Counterparty, DailyClaimResult, TransferResult, SYSTEM_ID,
};
use crate::domain::errors::LedgerError;
use crate::repository::{
    claim_daily_tx, credit_balance_tx, debit_balance_tx, get_balance_for_update_tx,
    grant_crossed_thresholds_tx, insert_transaction_tx, lock_order, set_last_transfer_at_tx,
    LedgerRepositories,
};

type Result<T> = std::result::Result<T, LedgerError>;

#[derive(Clone)]
pub struct LedgerService {
    pub repos: LedgerRepositories,
    pub clock: Arc<dyn Clock>,
}

impl LedgerService {
    pub fn new(repos: LedgerRepositories, clock: Arc<dyn Clock>) -> Self {
        Self { repos, clock }
    }

    /// Grant any role-reward thresholds `new_balance` newly qualifies for
    /// and record a `role_assigned` activity for each, inside the caller's
    /// transaction.
    async fn grant_role_rewards(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        guild_id: &str,
        user_id: &str,
        new_balance: i64,
        config: &GuildConfig,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Result<()> {
        if config.role_rewards.is_empty() {
            return Ok(());
        }
        let granted = grant_crossed_thresholds_tx(
            tx,
            guild_id,
            user_id,
            new_balance,
            &config.role_rewards,
            now,
        )
        .await?;
        for grant in granted {
            append_activity_tx(
                tx,
                guild_id,
                user_id,
                None,
                "role_assigned",
                json!({ "role_id": grant.role_id }),
                now,
            )
            .await?;
        }
        Ok(())
    }

    pub async fn get_balance(&self, guild_id: &str, user_id: &str, config: &GuildConfig) -> Result<BytesBalance> {
        Ok(self
            .repos
            .balances
            .get_or_create(guild_id, user_id, config.starting_balance, self.clock.now())
            .await?)
    }

    pub async fn claim_daily(
        &self,
        guild_id: &str,
        user_id: &str,
        username: &str,
        config: &GuildConfig,
        tz_name: &str,
    ) -> Result<DailyClaimResult> {
        let now = self.clock.now();

        // Make sure the balance row exists before the CAS update below.
        self.repos
            .balances
            .get_or_create(guild_id, user_id, config.starting_balance, now)
            .await?;

        let tz = timezone::resolve_timezone(tz_name)
            .map_err(|e| LedgerError::Validation(e.to_string()))?;
        let today = timezone::local_date(now, tz);

        let next_day_start_utc = |date: chrono::NaiveDate| -> chrono::DateTime<chrono::Utc> {
            let next = date + Duration::days(1);
            tz.from_local_datetime(&next.and_hms_opt(0, 0, 0).unwrap())
                .single()
                .map(|dt| dt.with_timezone(&chrono::Utc))
                .unwrap_or(now)
        };

        let mut tx = self.repos
            .begin()
            .await
            .map_err(bytes_common::db::RepositoryError::from)?;

        let current = get_balance_for_update_tx(&mut tx, guild_id, user_id)
            .await?
            .ok_or_else(|| LedgerError::NotFound("balance not found".to_string()))?;

        if current.last_daily_date == Some(today) {
            return Err(LedgerError::AlreadyClaimed {
                next_claim_at: next_day_start_utc(today),
            });
        }

        let is_consecutive = current
            .last_daily_date
            .is_some_and(|last| timezone::is_consecutive_local_date(last, today));
        let new_streak = if is_consecutive {
            current.streak_count + 1
        } else {
            1
        };
        let multiplier = config.multiplier_for_streak(new_streak);
        let earned = config.daily_amount * multiplier as i64;

        let updated = claim_daily_tx(&mut tx, guild_id, user_id, today, is_consecutive, earned, now)
            .await?
            .ok_or_else(|| LedgerError::AlreadyClaimed {
                next_claim_at: next_day_start_utc(today),
            })?;

        let reason = daily_reward_reason(new_streak, multiplier);
        insert_transaction_tx(
            &mut tx,
            guild_id,
            SYSTEM_ID,
            SYSTEM_ID,
            user_id,
            username,
            earned,
            Some(&reason),
            now,
        )
        .await?;

        append_activity_tx(
            &mut tx,
            guild_id,
            user_id,
            None,
            "daily_claim",
            json!({ "earned": earned, "streak": new_streak, "multiplier": multiplier }),
            now,
        )
        .await?;

        self.grant_role_rewards(&mut tx, guild_id, user_id, updated.balance, config, now)
            .await?;

        tx.commit().await?;

        Ok(DailyClaimResult {
            earned,
            multiplier,
            streak_count: updated.streak_count,
            new_balance: updated.balance,
            reason,
        })
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn transfer(
        &self,
        guild_id: &str,
        giver: &Counterparty,
        giver_username: &str,
        receiver: &Counterparty,
        receiver_username: &str,
        amount: i64,
        reason: Option<&str>,
        config: &GuildConfig,
    ) -> Result<TransferResult> {
        if amount < 1 || amount > config.max_transfer {
            return Err(LedgerError::Validation(format!(
                "amount must be between 1 and {}",
                config.max_transfer
            )));
        }
        if giver.id() == receiver.id() && !matches!(giver, Counterparty::System) {
            return Err(LedgerError::Validation(
                "giver and receiver must differ".to_string(),
            ));
        }
        if let Some(r) = reason {
            if r.len() > 200 {
                return Err(LedgerError::Validation(
                    "reason must be at most 200 characters".to_string(),
                ));
            }
        }

        let now = self.clock.now();
        self.repos
            .balances
            .get_or_create(guild_id, giver.id(), config.starting_balance, now)
            .await?;
        self.repos
            .balances
            .get_or_create(guild_id, receiver.id(), config.starting_balance, now)
            .await?;

        let mut tx = self.repos
            .begin()
            .await
            .map_err(bytes_common::db::RepositoryError::from)?;

        // Lock both rows in a fixed order to avoid deadlocking against a
        // concurrent transfer running the other direction.
        let (first, second) = lock_order(giver.id(), receiver.id());
        get_balance_for_update_tx(&mut tx, guild_id, first).await?;
        if second != first {
            get_balance_for_update_tx(&mut tx, guild_id, second).await?;
        }

        let giver_row = get_balance_for_update_tx(&mut tx, guild_id, giver.id())
            .await?
            .ok_or_else(|| LedgerError::NotFound("giver balance not found".to_string()))?;

        if config.transfer_cooldown_hours > 0 {
            if let Some(last_transfer) = giver_row.last_transfer_at {
                let cooldown_end = last_transfer + Duration::hours(config.transfer_cooldown_hours as i64);
                if now < cooldown_end {
                    return Err(LedgerError::Cooldown {
                        retry_after_seconds: (cooldown_end - now).num_seconds().max(0),
                        cooldown_end_timestamp: cooldown_end,
                    });
                }
            }
        }

        if giver_row.balance < amount {
            return Err(LedgerError::InsufficientBalance {
                required: amount,
                available: giver_row.balance,
            });
        }

        let giver_balance = debit_balance_tx(&mut tx, guild_id, giver.id(), amount, now)
            .await
            .map_err(|_| LedgerError::InsufficientBalance {
                required: amount,
                available: giver_row.balance,
            })?;
        let receiver_balance = credit_balance_tx(&mut tx, guild_id, receiver.id(), amount, now).await?;
        set_last_transfer_at_tx(&mut tx, guild_id, giver.id(), now).await?;

        let transaction = insert_transaction_tx(
            &mut tx,
            guild_id,
            giver.id(),
            giver_username,
            receiver.id(),
            receiver_username,
            amount,
            reason,
            now,
        )
        .await?;

        append_activity_tx(
            &mut tx,
            guild_id,
            giver.id(),
            None,
            "transfer_sent",
            json!({ "amount": amount, "to": receiver.id() }),
            now,
        )
        .await?;
        append_activity_tx(
            &mut tx,
            guild_id,
            receiver.id(),
            None,
            "transfer_received",
            json!({ "amount": amount, "from": giver.id() }),
            now,
        )
        .await?;

        self.grant_role_rewards(
            &mut tx,
            guild_id,
            receiver.id(),
            receiver_balance.balance,
            config,
            now,
        )
        .await?;

        tx.commit().await?;

        Ok(TransferResult {
            giver_balance: giver_balance.balance,
            receiver_balance: receiver_balance.balance,
            amount,
            transaction,
        })
    }
}
