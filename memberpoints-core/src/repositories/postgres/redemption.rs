use async_trait::async_trait;
use sqlx::{PgExecutor, Pool, Postgres};
use uuid::Uuid;
use memberpoints_common::models::RedemptionRecord;
use memberpoints_common::traits::repository_traits::RedemptionRepository;
use crate::Error;

#[derive(Clone)]
pub struct PostgresRedemptionRepository {
    pool: Pool<Postgres>,
}

impl PostgresRedemptionRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

/// Redemptions are debits, so the only writer is the ledger's conditional commit.
pub(crate) async fn insert_redemption_with<'e, E>(executor: E, rec: &RedemptionRecord) -> Result<(), Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query(
        r#"
        INSERT INTO redemption_records (
            redemption_id, member_id, points_used, redeemed_item, redemption_time
        )
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
        .bind(rec.redemption_id)
        .bind(rec.member_id)
        .bind(rec.points_used)
        .bind(&rec.redeemed_item)
        .bind(rec.redemption_time)
        .execute(executor)
        .await?;
    Ok(())
}

#[async_trait]
impl RedemptionRepository for PostgresRedemptionRepository {
    async fn list_redemptions_for_member(&self, member_id: Uuid, limit: i64) -> Result<Vec<RedemptionRecord>, Error> {
        let rows = sqlx::query_as::<_, RedemptionRecord>(
            r#"
            SELECT redemption_id, member_id, points_used, redeemed_item, redemption_time
            FROM redemption_records
            WHERE member_id = $1
            ORDER BY redemption_time DESC
            LIMIT $2
            "#,
        )
            .bind(member_id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}
