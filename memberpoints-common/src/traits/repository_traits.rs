use async_trait::async_trait;
use uuid::Uuid;
use crate::error::Error;
use crate::models::{
    ConsumptionRecord, LedgerBatch, LedgerTotals, Member, RedemptionRecord,
    SlotMachineRecord, SyncLog,
};

#[async_trait]
pub trait MemberRepository: Send + Sync {
    async fn create_member(&self, member: &Member) -> Result<(), Error>;
    async fn get_member(&self, member_id: Uuid) -> Result<Option<Member>, Error>;
    async fn get_member_by_username(&self, username: &str) -> Result<Option<Member>, Error>;

    /// Every member whose email equals `email`. Emails are not unique, so callers
    /// decide what to do with zero or several matches.
    async fn find_members_by_email(&self, email: &str) -> Result<Vec<Member>, Error>;

    /// Ordered by username.
    async fn list_members(&self) -> Result<Vec<Member>, Error>;
    async fn update_member(&self, member: &Member) -> Result<(), Error>;

    /// Removes the member and, by cascade, all of their ledger rows.
    async fn delete_member(&self, member_id: Uuid) -> Result<(), Error>;
}

#[async_trait]
pub trait ConsumptionRepository: Send + Sync {
    async fn insert_consumption(&self, rec: &ConsumptionRecord) -> Result<(), Error>;

    /// Newest sale first.
    async fn list_consumptions_for_member(&self, member_id: Uuid) -> Result<Vec<ConsumptionRecord>, Error>;

    /// Deletes every consumption row and inserts `records` in one transaction.
    /// Returns how many rows were deleted.
    async fn replace_all_consumptions(&self, records: &[ConsumptionRecord]) -> Result<u64, Error>;
}

#[async_trait]
pub trait RedemptionRepository: Send + Sync {
    async fn list_redemptions_for_member(&self, member_id: Uuid, limit: i64) -> Result<Vec<RedemptionRecord>, Error>;
}

#[async_trait]
pub trait SlotRecordRepository: Send + Sync {
    async fn list_slot_records_for_member(&self, member_id: Uuid, limit: i64) -> Result<Vec<SlotMachineRecord>, Error>;
}

#[async_trait]
pub trait SyncLogRepository: Send + Sync {
    async fn insert_sync_log(&self, log: &SyncLog) -> Result<(), Error>;
    async fn list_recent_sync_logs(&self, limit: i64) -> Result<Vec<SyncLog>, Error>;
}

/// Balance reads and balance-checked writes.
#[async_trait]
pub trait LedgerRepository: Send + Sync {
    async fn ledger_totals(&self, member_id: Uuid) -> Result<LedgerTotals, Error>;

    async fn available_points(&self, member_id: Uuid) -> Result<i64, Error> {
        Ok(self.ledger_totals(member_id).await?.available())
    }

    /// Atomically checks that the member can afford `cost` and writes `batch`.
    ///
    /// Concurrent calls for the same member are serialized; the balance seen by
    /// the check is the balance the writes apply to. Fails with `NotFound` for an
    /// unknown member and `InsufficientPoints` (writing nothing) when the balance
    /// is below `cost`. Returns the balance after the writes.
    async fn apply_conditional(&self, member_id: Uuid, cost: i64, batch: &LedgerBatch) -> Result<i64, Error>;
}
