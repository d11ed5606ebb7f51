//! Transactional free functions for the Squads domain (Zero2Prod pattern).
//!
//! `replace_membership_tx` is the core of `join_squad`: it runs in the same
//! transaction as the ledger debit and the activity appends, so a squad
//! change and its fee either both commit or neither does.

use bytes_common::db::RepositoryError;
use chrono::{DateTime, Utc};
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::domain::entities::SquadMembership;

/// Delete any existing membership for this user and insert the new one,
/// returning the new row.
pub async fn replace_membership_tx(
    transaction: &mut Transaction<'_, Postgres>,
    guild_id: &str,
    user_id: &str,
    squad_id: Uuid,
    now: DateTime<Utc>,
) -> std::result::Result<SquadMembership, RepositoryError> {
    sqlx::query("DELETE FROM squad_memberships WHERE guild_id = $1 AND user_id = $2")
        .bind(guild_id)
        .bind(user_id)
        .execute(&mut **transaction)
        .await?;

    let created = sqlx::query_as(
        r#"
        INSERT INTO squad_memberships (guild_id, user_id, squad_id, joined_at)
        VALUES ($1, $2, $3, $4)
        RETURNING guild_id, user_id, squad_id, joined_at
        "#,
    )
    .bind(guild_id)
    .bind(user_id)
    .bind(squad_id)
    .bind(now)
    .fetch_one(&mut **transaction)
    .await?;
    Ok(created)
}

/// Lock and count current members of a squad within an existing
/// transaction, to serialize against concurrent joins racing the
/// `max_members` check.
pub async fn count_members_for_update_tx(
    transaction: &mut Transaction<'_, Postgres>,
    squad_id: Uuid,
) -> std::result::Result<i64, RepositoryError> {
    let rows: Vec<(String,)> =
        sqlx::query_as("SELECT user_id FROM squad_memberships WHERE squad_id = $1 FOR UPDATE")
            .bind(squad_id)
            .fetch_all(&mut **transaction)
            .await?;
    Ok(rows.len() as i64)
}

pub async fn get_squad_for_update_tx(
    transaction: &mut Transaction<'_, Postgres>,
    guild_id: &str,
    squad_id: Uuid,
) -> std::result::Result<Option<crate::domain::entities::Squad>, RepositoryError> {
    let row = sqlx::query_as(
        r#"
        SELECT id, guild_id, role_id, name, description, welcome_message,
               announcement_channel, switch_cost, max_members, is_active, is_default,
               created_at, updated_at
        FROM squads
        WHERE guild_id = $1 AND id = $2
        FOR UPDATE
        "#,
    )
    .bind(guild_id)
    .bind(squad_id)
    .fetch_optional(&mut **transaction)
    .await?;
    Ok(row)
}
