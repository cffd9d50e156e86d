use std::fmt;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which slot game produced a play.
///
/// `Reels` plays settle through the slot table itself (bet and win are summed by
/// the ledger). `Grid` plays settle through a redemption debit and a slot-win
/// consumption credit, so their slot rows are audit-only.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Hash, sqlx::Type)]
#[sqlx(type_name = "TEXT")]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SlotVariant {
    Reels,
    Grid,
}

impl fmt::Display for SlotVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotVariant::Reels => write!(f, "reels"),
            SlotVariant::Grid => write!(f, "grid"),
        }
    }
}

/// Append-only audit row for one slot play.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, sqlx::FromRow)]
pub struct SlotMachineRecord {
    pub slot_record_id: Uuid,
    pub member_id: Uuid,
    pub variant: SlotVariant,
    pub bet: i64,
    pub grid_result: String,
    pub win_points: i64,
    pub played_at: DateTime<Utc>,
}

impl SlotMachineRecord {
    pub fn new(
        member_id: Uuid,
        variant: SlotVariant,
        bet: i64,
        grid_result: String,
        win_points: i64,
    ) -> Self {
        Self {
            slot_record_id: Uuid::new_v4(),
            member_id,
            variant,
            bet,
            grid_result,
            win_points,
            played_at: Utc::now(),
        }
    }
}
