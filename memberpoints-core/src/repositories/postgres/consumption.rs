// src/repositories/postgres/consumption.rs

use async_trait::async_trait;
use sqlx::{PgExecutor, Pool, Postgres};
use tracing::debug;
use uuid::Uuid;
use memberpoints_common::models::ConsumptionRecord;
use memberpoints_common::traits::repository_traits::ConsumptionRepository;
use crate::Error;

#[derive(Clone)]
pub struct PostgresConsumptionRepository {
    pool: Pool<Postgres>,
}

impl PostgresConsumptionRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

pub(crate) async fn insert_consumption_with<'e, E>(executor: E, rec: &ConsumptionRecord) -> Result<(), Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query(
        r#"
        INSERT INTO consumption_records (
            consumption_id, member_id, amount, sold_item, category,
            sales_time, reward_points, expiry_date
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
        .bind(rec.consumption_id)
        .bind(rec.member_id)
        .bind(rec.amount)
        .bind(&rec.sold_item)
        .bind(rec.category)
        .bind(rec.sales_time)
        .bind(rec.reward_points)
        .bind(rec.expiry_date)
        .execute(executor)
        .await?;
    Ok(())
}

#[async_trait]
impl ConsumptionRepository for PostgresConsumptionRepository {
    async fn insert_consumption(&self, rec: &ConsumptionRecord) -> Result<(), Error> {
        insert_consumption_with(&self.pool, rec).await
    }

    async fn list_consumptions_for_member(&self, member_id: Uuid) -> Result<Vec<ConsumptionRecord>, Error> {
        let rows = sqlx::query_as::<_, ConsumptionRecord>(
            r#"
            SELECT consumption_id, member_id, amount, sold_item, category,
                   sales_time, reward_points, expiry_date
            FROM consumption_records
            WHERE member_id = $1
            ORDER BY sales_time DESC
            "#,
        )
            .bind(member_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn replace_all_consumptions(&self, records: &[ConsumptionRecord]) -> Result<u64, Error> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM consumption_records")
            .execute(&mut *tx)
            .await?
            .rows_affected();

        for rec in records {
            insert_consumption_with(&mut *tx, rec).await?;
        }

        tx.commit().await?;
        debug!("Replaced consumption records: deleted={}, inserted={}", deleted, records.len());
        Ok(deleted)
    }
}
