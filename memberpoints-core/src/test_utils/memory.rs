// File: memberpoints-core/src/test_utils/memory.rs

use std::sync::Arc;
use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;
use memberpoints_common::models::{
    ConsumptionRecord, LedgerBatch, LedgerTotals, Member, RedemptionRecord, SlotMachineRecord,
    SlotVariant, SyncLog,
};
use memberpoints_common::traits::repository_traits::{
    ConsumptionRepository, LedgerRepository, MemberRepository, RedemptionRepository,
    SlotRecordRepository, SyncLogRepository,
};
use crate::Error;

#[derive(Debug, Default)]
struct Tables {
    members: Vec<Member>,
    consumptions: Vec<ConsumptionRecord>,
    redemptions: Vec<RedemptionRecord>,
    slot_records: Vec<SlotMachineRecord>,
    sync_logs: Vec<SyncLog>,
}

impl Tables {
    fn totals(&self, member_id: Uuid) -> LedgerTotals {
        let reels = || {
            self.slot_records
                .iter()
                .filter(move |r| r.member_id == member_id && r.variant == SlotVariant::Reels)
        };
        LedgerTotals {
            consumption_rewards: self.consumptions.iter()
                .filter(|r| r.member_id == member_id)
                .map(|r| r.reward_points)
                .sum(),
            slot_wins: reels().map(|r| r.win_points).sum(),
            redemptions: self.redemptions.iter()
                .filter(|r| r.member_id == member_id)
                .map(|r| r.points_used)
                .sum(),
            slot_bets: reels().map(|r| r.bet).sum(),
        }
    }
}

/// In-memory stand-in for every repository, sharing one set of tables.
///
/// All operations take a single lock, so `apply_conditional` is atomic the same
/// way the Postgres row lock makes it.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn consumptions(&self) -> Vec<ConsumptionRecord> {
        self.tables.lock().await.consumptions.clone()
    }

    pub async fn redemptions(&self) -> Vec<RedemptionRecord> {
        self.tables.lock().await.redemptions.clone()
    }

    pub async fn slot_records(&self) -> Vec<SlotMachineRecord> {
        self.tables.lock().await.slot_records.clone()
    }

    pub async fn sync_logs(&self) -> Vec<SyncLog> {
        self.tables.lock().await.sync_logs.clone()
    }
}

#[async_trait]
impl MemberRepository for InMemoryStore {
    async fn create_member(&self, member: &Member) -> Result<(), Error> {
        let mut t = self.tables.lock().await;
        if t.members.iter().any(|m| m.username == member.username) {
            return Err(Error::Validation(format!("username '{}' is already taken", member.username)));
        }
        t.members.push(member.clone());
        Ok(())
    }

    async fn get_member(&self, member_id: Uuid) -> Result<Option<Member>, Error> {
        let t = self.tables.lock().await;
        Ok(t.members.iter().find(|m| m.member_id == member_id).cloned())
    }

    async fn get_member_by_username(&self, username: &str) -> Result<Option<Member>, Error> {
        let t = self.tables.lock().await;
        Ok(t.members.iter().find(|m| m.username == username).cloned())
    }

    async fn find_members_by_email(&self, email: &str) -> Result<Vec<Member>, Error> {
        let t = self.tables.lock().await;
        Ok(t.members
            .iter()
            .filter(|m| m.email.as_deref() == Some(email))
            .cloned()
            .collect())
    }

    async fn list_members(&self) -> Result<Vec<Member>, Error> {
        let t = self.tables.lock().await;
        let mut members = t.members.clone();
        members.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(members)
    }

    async fn update_member(&self, member: &Member) -> Result<(), Error> {
        let mut t = self.tables.lock().await;
        match t.members.iter_mut().find(|m| m.member_id == member.member_id) {
            Some(slot) => {
                *slot = member.clone();
                Ok(())
            }
            None => Err(Error::NotFound(format!("member {}", member.member_id))),
        }
    }

    async fn delete_member(&self, member_id: Uuid) -> Result<(), Error> {
        let mut t = self.tables.lock().await;
        t.members.retain(|m| m.member_id != member_id);
        t.consumptions.retain(|r| r.member_id != member_id);
        t.redemptions.retain(|r| r.member_id != member_id);
        t.slot_records.retain(|r| r.member_id != member_id);
        Ok(())
    }
}

#[async_trait]
impl ConsumptionRepository for InMemoryStore {
    async fn insert_consumption(&self, rec: &ConsumptionRecord) -> Result<(), Error> {
        self.tables.lock().await.consumptions.push(rec.clone());
        Ok(())
    }

    async fn list_consumptions_for_member(&self, member_id: Uuid) -> Result<Vec<ConsumptionRecord>, Error> {
        let t = self.tables.lock().await;
        let mut recs: Vec<_> = t.consumptions.iter().filter(|r| r.member_id == member_id).cloned().collect();
        recs.sort_by(|a, b| b.sales_time.cmp(&a.sales_time));
        Ok(recs)
    }

    async fn replace_all_consumptions(&self, records: &[ConsumptionRecord]) -> Result<u64, Error> {
        let mut t = self.tables.lock().await;
        let replaced = t.consumptions.len() as u64;
        t.consumptions = records.to_vec();
        Ok(replaced)
    }
}

#[async_trait]
impl RedemptionRepository for InMemoryStore {
    async fn list_redemptions_for_member(&self, member_id: Uuid, limit: i64) -> Result<Vec<RedemptionRecord>, Error> {
        let t = self.tables.lock().await;
        let mut recs: Vec<_> = t.redemptions.iter().filter(|r| r.member_id == member_id).cloned().collect();
        recs.sort_by(|a, b| b.redemption_time.cmp(&a.redemption_time));
        recs.truncate(limit.max(0) as usize);
        Ok(recs)
    }
}

#[async_trait]
impl SlotRecordRepository for InMemoryStore {
    async fn list_slot_records_for_member(&self, member_id: Uuid, limit: i64) -> Result<Vec<SlotMachineRecord>, Error> {
        let t = self.tables.lock().await;
        let mut recs: Vec<_> = t.slot_records.iter().filter(|r| r.member_id == member_id).cloned().collect();
        recs.sort_by(|a, b| b.played_at.cmp(&a.played_at));
        recs.truncate(limit.max(0) as usize);
        Ok(recs)
    }
}

#[async_trait]
impl SyncLogRepository for InMemoryStore {
    async fn insert_sync_log(&self, log: &SyncLog) -> Result<(), Error> {
        self.tables.lock().await.sync_logs.push(log.clone());
        Ok(())
    }

    async fn list_recent_sync_logs(&self, limit: i64) -> Result<Vec<SyncLog>, Error> {
        let t = self.tables.lock().await;
        let mut logs = t.sync_logs.clone();
        logs.sort_by(|a, b| b.sync_time.cmp(&a.sync_time));
        logs.truncate(limit.max(0) as usize);
        Ok(logs)
    }
}

#[async_trait]
impl LedgerRepository for InMemoryStore {
    async fn ledger_totals(&self, member_id: Uuid) -> Result<LedgerTotals, Error> {
        Ok(self.tables.lock().await.totals(member_id))
    }

    async fn apply_conditional(&self, member_id: Uuid, cost: i64, batch: &LedgerBatch) -> Result<i64, Error> {
        let mut t = self.tables.lock().await;
        if !t.members.iter().any(|m| m.member_id == member_id) {
            return Err(Error::NotFound(format!("member {}", member_id)));
        }
        let available = t.totals(member_id).available();
        if available < cost {
            return Err(Error::InsufficientPoints { available, required: cost });
        }
        t.redemptions.extend(batch.redemptions.iter().cloned());
        t.consumptions.extend(batch.consumptions.iter().cloned());
        t.slot_records.extend(batch.slot_records.iter().cloned());
        Ok(t.totals(member_id).available())
    }
}
