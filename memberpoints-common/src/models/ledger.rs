// File: memberpoints-common/src/models/ledger.rs

use serde::{Deserialize, Serialize};
use crate::models::{ConsumptionRecord, RedemptionRecord, SlotMachineRecord};

/// The four aggregates a member's balance is derived from.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct LedgerTotals {
    pub consumption_rewards: i64,
    pub slot_wins: i64,
    pub redemptions: i64,
    pub slot_bets: i64,
}

impl LedgerTotals {
    /// (rewards + slot wins) - (redemptions + slot bets)
    pub fn available(&self) -> i64 {
        (self.consumption_rewards + self.slot_wins) - (self.redemptions + self.slot_bets)
    }
}

/// Rows written together by one ledger commit.
#[derive(Debug, Default, Clone)]
pub struct LedgerBatch {
    pub consumptions: Vec<ConsumptionRecord>,
    pub redemptions: Vec<RedemptionRecord>,
    pub slot_records: Vec<SlotMachineRecord>,
}

impl LedgerBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_consumption(mut self, rec: ConsumptionRecord) -> Self {
        self.consumptions.push(rec);
        self
    }

    pub fn with_redemption(mut self, rec: RedemptionRecord) -> Self {
        self.redemptions.push(rec);
        self
    }

    pub fn with_slot_record(mut self, rec: SlotMachineRecord) -> Self {
        self.slot_records.push(rec);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.consumptions.is_empty() && self.redemptions.is_empty() && self.slot_records.is_empty()
    }
}
