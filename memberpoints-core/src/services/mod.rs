// File: src/services/mod.rs

pub mod member_service;
pub mod ledger_service;
pub mod slot_service;
pub mod sheet_sync_service;

pub use member_service::{MemberService, MemberUpdate, NewMember};
pub use ledger_service::{LedgerService, MemberProfile, RedeemOutcome};
pub use slot_service::{GridSpinResult, ReelSpinResult, SlotService};
pub use sheet_sync_service::{SheetSyncService, SyncReport};
