use async_trait::async_trait;
use sqlx::{PgExecutor, Pool, Postgres};
use uuid::Uuid;
use memberpoints_common::models::SlotMachineRecord;
use memberpoints_common::traits::repository_traits::SlotRecordRepository;
use crate::Error;

#[derive(Clone)]
pub struct PostgresSlotRecordRepository {
    pool: Pool<Postgres>,
}

impl PostgresSlotRecordRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

pub(crate) async fn insert_slot_record_with<'e, E>(executor: E, rec: &SlotMachineRecord) -> Result<(), Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query(
        r#"
        INSERT INTO slot_machine_records (
            slot_record_id, member_id, variant, bet, grid_result, win_points, played_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
        .bind(rec.slot_record_id)
        .bind(rec.member_id)
        .bind(rec.variant)
        .bind(rec.bet)
        .bind(&rec.grid_result)
        .bind(rec.win_points)
        .bind(rec.played_at)
        .execute(executor)
        .await?;
    Ok(())
}

#[async_trait]
impl SlotRecordRepository for PostgresSlotRecordRepository {
    async fn list_slot_records_for_member(&self, member_id: Uuid, limit: i64) -> Result<Vec<SlotMachineRecord>, Error> {
        let rows = sqlx::query_as::<_, SlotMachineRecord>(
            r#"
            SELECT slot_record_id, member_id, variant, bet, grid_result, win_points, played_at
            FROM slot_machine_records
            WHERE member_id = $1
            ORDER BY played_at DESC
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
