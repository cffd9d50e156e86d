use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use memberpoints_common::models::SyncLog;
use memberpoints_common::traits::repository_traits::SyncLogRepository;
use crate::Error;

#[derive(Clone)]
pub struct PostgresSyncLogRepository {
    pool: Pool<Postgres>,
}

impl PostgresSyncLogRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SyncLogRepository for PostgresSyncLogRepository {
    async fn insert_sync_log(&self, log: &SyncLog) -> Result<(), Error> {
        sqlx::query(
            r#"
            INSERT INTO sync_logs (sync_log_id, sync_time, status, message)
            VALUES ($1, $2, $3, $4)
            "#,
        )
            .bind(log.sync_log_id)
            .bind(log.sync_time)
            .bind(log.status)
            .bind(&log.message)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list_recent_sync_logs(&self, limit: i64) -> Result<Vec<SyncLog>, Error> {
        let rows = sqlx::query_as::<_, SyncLog>(
            r#"
            SELECT sync_log_id, sync_time, status, message
            FROM sync_logs
            ORDER BY sync_time DESC
            LIMIT $1
            "#,
        )
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}
