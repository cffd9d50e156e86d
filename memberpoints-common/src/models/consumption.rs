// File: memberpoints-common/src/models/consumption.rs

use std::fmt;
use std::str::FromStr;
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::error::Error;

/// 10% of the amount is credited for ordinary purchases.
pub const PURCHASE_REWARD_RATE: Decimal = Decimal::from_parts(1, 0, 0, false, 1);

/// Largest amount `NUMERIC(12, 2)` can hold: 9,999,999,999.99.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_327, 232, 0, false, 2);

/// Amounts are stored with two decimal places.
pub const AMOUNT_SCALE: u32 = 2;

/// Reward points expire this many days after the sale.
pub const POINTS_VALID_DAYS: i64 = 365;

/// Why a consumption row exists. Each category carries its own reward rule.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Hash, sqlx::Type)]
#[sqlx(type_name = "TEXT")]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ConsumptionCategory {
    Purchase,
    #[sqlx(rename = "slot-win")]
    #[serde(rename = "slot-win")]
    SlotWin,
}

impl ConsumptionCategory {
    /// Reward points for `amount`, truncated toward zero.
    pub fn reward_points(&self, amount: Decimal) -> Result<i64, Error> {
        let raw = match self {
            ConsumptionCategory::Purchase => amount * PURCHASE_REWARD_RATE,
            ConsumptionCategory::SlotWin => amount,
        };
        raw.floor()
            .to_i64()
            .ok_or_else(|| Error::Validation(format!("amount {} is out of range", amount)))
    }
}

impl fmt::Display for ConsumptionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsumptionCategory::Purchase => write!(f, "purchase"),
            ConsumptionCategory::SlotWin => write!(f, "slot-win"),
        }
    }
}

impl FromStr for ConsumptionCategory {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "purchase" => Ok(ConsumptionCategory::Purchase),
            "slot-win" => Ok(ConsumptionCategory::SlotWin),
            _ => Err(format!("Unknown consumption category: {}", s)),
        }
    }
}

/// A purchase (or slot payout) that credits reward points.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, sqlx::FromRow)]
pub struct ConsumptionRecord {
    pub consumption_id: Uuid,
    pub member_id: Uuid,
    pub amount: Decimal,
    pub sold_item: String,
    pub category: ConsumptionCategory,
    pub sales_time: DateTime<Utc>,
    pub reward_points: i64,
    pub expiry_date: DateTime<Utc>,
}

impl ConsumptionRecord {
    /// Builds a record with its derived `reward_points` and `expiry_date`.
    /// The amount is rounded to cents first, so the reward matches the stored
    /// value. Negative and oversized amounts are rejected.
    pub fn new(
        member_id: Uuid,
        amount: Decimal,
        sold_item: &str,
        category: ConsumptionCategory,
        sales_time: DateTime<Utc>,
    ) -> Result<Self, Error> {
        let amount = amount.round_dp(AMOUNT_SCALE);
        if amount < Decimal::ZERO {
            return Err(Error::Validation(format!(
                "amount must not be negative (got {})",
                amount
            )));
        }
        if amount > MAX_AMOUNT {
            return Err(Error::Validation(format!(
                "amount {} exceeds the maximum of {}",
                amount, MAX_AMOUNT
            )));
        }
        let reward_points = category.reward_points(amount)?;
        Ok(Self {
            consumption_id: Uuid::new_v4(),
            member_id,
            amount,
            sold_item: sold_item.to_string(),
            category,
            sales_time,
            reward_points,
            expiry_date: sales_time + Duration::days(POINTS_VALID_DAYS),
        })
    }

    pub fn purchase(
        member_id: Uuid,
        amount: Decimal,
        sold_item: &str,
        sales_time: DateTime<Utc>,
    ) -> Result<Self, Error> {
        Self::new(member_id, amount, sold_item, ConsumptionCategory::Purchase, sales_time)
    }

    /// Routes slot winnings back through the reward pipeline at face value.
    pub fn slot_win(
        member_id: Uuid,
        win_points: i64,
        sold_item: &str,
        played_at: DateTime<Utc>,
    ) -> Result<Self, Error> {
        Self::new(
            member_id,
            Decimal::from(win_points),
            sold_item,
            ConsumptionCategory::SlotWin,
            played_at,
        )
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiry_date <= now
    }
}
