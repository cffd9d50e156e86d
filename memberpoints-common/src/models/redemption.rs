use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::error::Error;

pub const DEFAULT_REDEEMED_ITEM: &str = "unspecified";

/// `redeemed_item` used when a grid slot play debits its bet.
pub const SLOT_BET_ITEM: &str = "slot bet";

/// A points debit: an item exchange, or a wager in the grid slot game.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, sqlx::FromRow)]
pub struct RedemptionRecord {
    pub redemption_id: Uuid,
    pub member_id: Uuid,
    pub points_used: i64,
    pub redeemed_item: String,
    pub redemption_time: DateTime<Utc>,
}

impl RedemptionRecord {
    pub fn new(member_id: Uuid, points_used: i64, redeemed_item: Option<&str>) -> Result<Self, Error> {
        if points_used <= 0 {
            return Err(Error::Validation(format!(
                "points to redeem must be a positive integer (got {})",
                points_used
            )));
        }
        let redeemed_item = redeemed_item
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_REDEEMED_ITEM);
        Ok(Self {
            redemption_id: Uuid::new_v4(),
            member_id,
            points_used,
            redeemed_item: redeemed_item.to_string(),
            redemption_time: Utc::now(),
        })
    }
}
