//! Squad sale repository

use bytes_common::db::RepositoryError;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{SaleKind, SquadSale};

type Result<T> = std::result::Result<T, RepositoryError>;

#[derive(Clone)]
pub struct SaleRepository {
    pool: PgPool,
}

impl SaleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The currently-active sale for this squad+kind, if any.
    pub async fn active_for(
        &self,
        squad_id: Uuid,
        kind: SaleKind,
        now: DateTime<Utc>,
    ) -> Result<Option<SquadSale>> {
        let row = sqlx::query_as(
            r#"
            SELECT id, squad_id, kind, discount_percent, starts_at, ends_at
            FROM squad_sales
            WHERE squad_id = $1 AND kind = $2 AND starts_at <= $3 AND ends_at >= $3
            ORDER BY discount_percent DESC
            LIMIT 1
            "#,
        )
        .bind(squad_id)
        .bind(kind)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn create(
        &self,
        squad_id: Uuid,
        kind: SaleKind,
        discount_percent: i32,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
    ) -> Result<SquadSale> {
        let created = sqlx::query_as(
            r#"
            INSERT INTO squad_sales (id, squad_id, kind, discount_percent, starts_at, ends_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, squad_id, kind, discount_percent, starts_at, ends_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(squad_id)
        .bind(kind)
        .bind(discount_percent)
        .bind(starts_at)
        .bind(ends_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }
}
