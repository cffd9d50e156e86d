// src/repositories/postgres/ledger.rs

use async_trait::async_trait;
use sqlx::{PgExecutor, Pool, Postgres};
use tracing::debug;
use uuid::Uuid;
use memberpoints_common::models::{LedgerBatch, LedgerTotals};
use memberpoints_common::traits::repository_traits::LedgerRepository;
use crate::Error;
use super::consumption::insert_consumption_with;
use super::redemption::insert_redemption_with;
use super::slot::insert_slot_record_with;

/// Grid plays settle through redemption/consumption rows, so only reel plays
/// contribute their bet and win here.
const TOTALS_SQL: &str = r#"
    SELECT
        (SELECT COALESCE(SUM(reward_points), 0)::BIGINT
           FROM consumption_records WHERE member_id = $1) AS consumption_rewards,
        (SELECT COALESCE(SUM(win_points), 0)::BIGINT
           FROM slot_machine_records WHERE member_id = $1 AND variant = 'reels') AS slot_wins,
        (SELECT COALESCE(SUM(points_used), 0)::BIGINT
           FROM redemption_records WHERE member_id = $1) AS redemptions,
        (SELECT COALESCE(SUM(bet), 0)::BIGINT
           FROM slot_machine_records WHERE member_id = $1 AND variant = 'reels') AS slot_bets
"#;

#[derive(Clone)]
pub struct PostgresLedgerRepository {
    pool: Pool<Postgres>,
}

impl PostgresLedgerRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

async fn fetch_totals<'e, E>(executor: E, member_id: Uuid) -> Result<LedgerTotals, Error>
where
    E: PgExecutor<'e>,
{
    let totals = sqlx::query_as::<_, LedgerTotals>(TOTALS_SQL)
        .bind(member_id)
        .fetch_one(executor)
        .await?;
    Ok(totals)
}

fn check_batch_owner(member_id: Uuid, batch: &LedgerBatch) -> Result<(), Error> {
    let foreign = batch.consumptions.iter().map(|r| r.member_id)
        .chain(batch.redemptions.iter().map(|r| r.member_id))
        .chain(batch.slot_records.iter().map(|r| r.member_id))
        .any(|owner| owner != member_id);
    if foreign {
        return Err(Error::Validation(format!(
            "ledger batch contains rows for a member other than {}",
            member_id
        )));
    }
    Ok(())
}

#[async_trait]
impl LedgerRepository for PostgresLedgerRepository {
    async fn ledger_totals(&self, member_id: Uuid) -> Result<LedgerTotals, Error> {
        fetch_totals(&self.pool, member_id).await
    }

    async fn apply_conditional(&self, member_id: Uuid, cost: i64, batch: &LedgerBatch) -> Result<i64, Error> {
        check_batch_owner(member_id, batch)?;

        let mut tx = self.pool.begin().await?;

        // Row lock serializes every debit for this member until commit.
        let locked = sqlx::query("SELECT member_id FROM members WHERE member_id = $1 FOR UPDATE")
            .bind(member_id)
            .fetch_optional(&mut *tx)
            .await?;
        if locked.is_none() {
            return Err(Error::NotFound(format!("member {}", member_id)));
        }

        let available = fetch_totals(&mut *tx, member_id).await?.available();
        if available < cost {
            tx.rollback().await?;
            return Err(Error::InsufficientPoints { available, required: cost });
        }

        for rec in &batch.redemptions {
            insert_redemption_with(&mut *tx, rec).await?;
        }
        for rec in &batch.consumptions {
            insert_consumption_with(&mut *tx, rec).await?;
        }
        for rec in &batch.slot_records {
            insert_slot_record_with(&mut *tx, rec).await?;
        }

        let balance = fetch_totals(&mut *tx, member_id).await?.available();
        tx.commit().await?;

        debug!(
            "Ledger commit for member {}: cost={}, before={}, after={}",
            member_id, cost, available, balance
        );
        Ok(balance)
    }
}
