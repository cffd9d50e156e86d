// File: memberpoints-common/src/models/mod.rs
pub mod member;
pub mod consumption;
pub mod redemption;
pub mod slot;
pub mod sync_log;
pub mod ledger;

pub use member::Member;
pub use consumption::{ConsumptionCategory, ConsumptionRecord};
pub use redemption::RedemptionRecord;
pub use slot::{SlotMachineRecord, SlotVariant};
pub use sync_log::{SyncLog, SyncStatus};
pub use ledger::{LedgerBatch, LedgerTotals};
