//! Squads business logic: listing with derived pricing, and the atomic
//! join/switch flow that debits the ledger, replaces membership, and logs
//! activity in one transaction.

use std::sync::Arc;

use bytes_activity::repository::append_activity_tx;
use bytes_common::Clock;
use bytes_ledger::repository::{debit_balance_tx, get_balance_for_update_tx, insert_transaction_tx};
use bytes_ledger::SYSTEM_ID;
use serde_json::json;
use uuid::Uuid;

use crate::domain::campaign::CampaignGate;
use crate::domain::entities::{
    apply_discount, JoinResult, SaleKind, Squad, SquadListing, SquadMemberEntry,
    UserSquadResponse,
};
use crate::domain::errors::SquadError;
use crate::repository::{count_members_for_update_tx, replace_membership_tx, SquadRepositories};

type Result<T> = std::result::Result<T, SquadError>;

#[derive(Clone)]
pub struct SquadService {
    pub repos: SquadRepositories,
    pub clock: Arc<dyn Clock>,
    pub campaign: Arc<dyn CampaignGate>,
}

impl SquadService {
    pub fn new(repos: SquadRepositories, clock: Arc<dyn Clock>, campaign: Arc<dyn CampaignGate>) -> Self {
        Self {
            repos,
            clock,
            campaign,
        }
    }

    /// All active squads for a guild with sale-adjusted current prices,
    /// default squad sorted last.
    pub async fn list_squads(&self, guild_id: &str) -> Result<Vec<SquadListing>> {
        let squads = self.repos.squads.list(guild_id).await?;
        let now = self.clock.now();
        let mut listings = Vec::with_capacity(squads.len());
        for squad in squads {
            let member_count = self.repos.squads.member_count(squad.id).await?;
            let join_sale = self.repos.sales.active_for(squad.id, SaleKind::Join, now).await?;
            let switch_sale = self.repos.sales.active_for(squad.id, SaleKind::Switch, now).await?;
            let current_join_cost = join_sale
                .map(|s| apply_discount(squad.switch_cost, s.discount_percent))
                .unwrap_or(squad.switch_cost);
            let current_switch_cost = switch_sale
                .map(|s| apply_discount(squad.switch_cost, s.discount_percent))
                .unwrap_or(squad.switch_cost);
            listings.push(SquadListing {
                squad,
                current_join_cost,
                current_switch_cost,
                member_count,
            });
        }
        Ok(listings)
    }

    pub async fn get_squad(&self, guild_id: &str, squad_id: Uuid) -> Result<Squad> {
        self.repos
            .squads
            .get(guild_id, squad_id)
            .await?
            .ok_or_else(|| SquadError::NotFound(format!("squad {squad_id} not found")))
    }

    pub async fn get_user_squad(&self, guild_id: &str, user_id: &str) -> Result<UserSquadResponse> {
        let membership = self.repos.memberships.get(guild_id, user_id).await?;
        match membership {
            None => Ok(UserSquadResponse {
                squad: None,
                joined_at: None,
            }),
            Some(m) => {
                let squad = self.repos.squads.get(guild_id, m.squad_id).await?;
                Ok(UserSquadResponse {
                    joined_at: Some(m.joined_at),
                    squad,
                })
            }
        }
    }

    pub async fn get_squad_members(&self, squad_id: Uuid) -> Result<Vec<SquadMemberEntry>> {
        Ok(self.repos.memberships.list_for_squad(squad_id).await?)
    }

    pub async fn join_squad(
        &self,
        guild_id: &str,
        user_id: &str,
        username: &str,
        squad_id: Uuid,
    ) -> Result<JoinResult> {
        let target = self
            .repos
            .squads
            .get(guild_id, squad_id)
            .await?
            .filter(|s| s.is_active)
            .ok_or_else(|| SquadError::NotFound(format!("squad {squad_id} not found")))?;

        let current_membership = self.repos.memberships.get(guild_id, user_id).await?;
        let current_squad = match &current_membership {
            Some(m) => self.repos.squads.get(guild_id, m.squad_id).await?,
            None => None,
        };

        if let Some(current) = &current_squad {
            if !current.is_default && self.campaign.is_active(guild_id).await {
                return Err(SquadError::CampaignLocked);
            }
            if current.id == target.id {
                return Err(SquadError::AlreadyInSquad);
            }
        }

        let now = self.clock.now();
        let is_join = current_squad.as_ref().is_none_or(|s| s.is_default);
        let sale_kind = if is_join { SaleKind::Join } else { SaleKind::Switch };
        let sale = self.repos.sales.active_for(target.id, sale_kind, now).await?;
        let fee = sale
            .map(|s| apply_discount(target.switch_cost, s.discount_percent))
            .unwrap_or(target.switch_cost);

        let mut tx = self.repos
            .begin()
            .await
            .map_err(bytes_common::db::RepositoryError::from)?;

        let member_count = count_members_for_update_tx(&mut tx, target.id).await?;
        if let Some(max) = target.max_members {
            if member_count >= max as i64 {
                return Err(SquadError::SquadFull);
            }
        }

        let balance = get_balance_for_update_tx(&mut tx, guild_id, user_id)
            .await
            .map_err(SquadError::Repository)?
            .ok_or_else(|| SquadError::NotFound("balance not found".to_string()))?;
        if balance.balance < fee {
            return Err(SquadError::InsufficientBalance {
                required: fee,
                available: balance.balance,
            });
        }

        let clock_now = self.clock.now();
        let new_balance = if fee > 0 {
            let updated = debit_balance_tx(&mut tx, guild_id, user_id, fee, clock_now)
                .await
                .map_err(|_| SquadError::InsufficientBalance {
                    required: fee,
                    available: balance.balance,
                })?;
            let reason = format!("Squad join fee: {}", target.name);
            insert_transaction_tx(
                &mut tx,
                guild_id,
                user_id,
                username,
                SYSTEM_ID,
                SYSTEM_ID,
                fee,
                Some(&reason),
                clock_now,
            )
            .await
            .map_err(SquadError::Repository)?;
            updated.balance
        } else {
            balance.balance
        };

        replace_membership_tx(&mut tx, guild_id, user_id, target.id, clock_now)
            .await
            .map_err(SquadError::Repository)?;

        append_activity_tx(
            &mut tx,
            guild_id,
            user_id,
            Some(target.id),
            "squad_join",
            json!({ "squad_id": target.id, "fee": fee }),
            clock_now,
        )
        .await
        .map_err(SquadError::Repository)?;

        if let Some(previous) = &current_squad {
            append_activity_tx(
                &mut tx,
                guild_id,
                user_id,
                Some(previous.id),
                "squad_leave",
                json!({ "squad_id": previous.id }),
                clock_now,
            )
            .await
            .map_err(SquadError::Repository)?;
        }

        tx.commit()
            .await
            .map_err(bytes_common::db::RepositoryError::from)?;

        Ok(JoinResult {
            new_balance,
            squad: target,
            previous_squad: current_squad,
        })
    }
}
