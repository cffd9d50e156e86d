// src/repositories/postgres/mod.rs

pub mod member;
pub mod consumption;
pub mod redemption;
pub mod slot;
pub mod sync_log;
pub mod ledger;

pub use member::PostgresMemberRepository;
pub use consumption::PostgresConsumptionRepository;
pub use redemption::PostgresRedemptionRepository;
pub use slot::PostgresSlotRecordRepository;
pub use sync_log::PostgresSyncLogRepository;
pub use ledger::PostgresLedgerRepository;
