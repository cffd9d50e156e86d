// src/repositories/mod.rs

pub use memberpoints_common::traits::repository_traits::{
    ConsumptionRepository,
    LedgerRepository,
    MemberRepository,
    RedemptionRepository,
    SlotRecordRepository,
    SyncLogRepository,
};

pub use postgres::{
    PostgresConsumptionRepository,
    PostgresLedgerRepository,
    PostgresMemberRepository,
    PostgresRedemptionRepository,
    PostgresSlotRecordRepository,
    PostgresSyncLogRepository,
};

pub mod postgres;
