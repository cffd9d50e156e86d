// File: memberpoints-core/src/services/ledger_service.rs

use std::sync::Arc;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;
use memberpoints_common::models::{
    ConsumptionRecord, LedgerBatch, LedgerTotals, Member, RedemptionRecord, SlotMachineRecord,
};
use memberpoints_common::traits::repository_traits::{
    ConsumptionRepository, LedgerRepository, RedemptionRepository, SlotRecordRepository,
};
use crate::Error;
use crate::services::member_service::MemberService;

const PROFILE_HISTORY_LIMIT: i64 = 50;

#[derive(Debug, Clone, Serialize)]
pub struct RedeemOutcome {
    pub redemption: RedemptionRecord,
    pub current_points: i64,
}

/// Everything the member profile page shows.
#[derive(Debug, Clone, Serialize)]
pub struct MemberProfile {
    pub member: Member,
    pub consumptions: Vec<ConsumptionRecord>,
    pub redemptions: Vec<RedemptionRecord>,
    pub slot_plays: Vec<SlotMachineRecord>,
    pub totals: LedgerTotals,
    pub available_points: i64,
}

pub struct LedgerService {
    ledger_repo: Arc<dyn LedgerRepository + Send + Sync>,
    consumption_repo: Arc<dyn ConsumptionRepository + Send + Sync>,
    redemption_repo: Arc<dyn RedemptionRepository + Send + Sync>,
    slot_repo: Arc<dyn SlotRecordRepository + Send + Sync>,
    member_service: Arc<MemberService>,
}

impl LedgerService {
    pub fn new(
        ledger_repo: Arc<dyn LedgerRepository + Send + Sync>,
        consumption_repo: Arc<dyn ConsumptionRepository + Send + Sync>,
        redemption_repo: Arc<dyn RedemptionRepository + Send + Sync>,
        slot_repo: Arc<dyn SlotRecordRepository + Send + Sync>,
        member_service: Arc<MemberService>,
    ) -> Self {
        Self {
            ledger_repo,
            consumption_repo,
            redemption_repo,
            slot_repo,
            member_service,
        }
    }

    /// Derived balance; zero for a member with no records.
    pub async fn available_points(&self, member_id: Uuid) -> Result<i64, Error> {
        self.ledger_repo.available_points(member_id).await
    }

    pub async fn ledger_totals(&self, member_id: Uuid) -> Result<LedgerTotals, Error> {
        self.ledger_repo.ledger_totals(member_id).await
    }

    /// Records a purchase made now and credits its reward points.
    pub async fn add_consumption(
        &self,
        member_id: Uuid,
        amount: Decimal,
        sold_item: &str,
    ) -> Result<ConsumptionRecord, Error> {
        self.member_service.get_member(member_id).await?;
        let sold_item = sold_item.trim();
        if sold_item.is_empty() {
            return Err(Error::Validation("sold_item must not be empty".into()));
        }

        let rec = ConsumptionRecord::purchase(member_id, amount, sold_item, Utc::now())?;
        self.consumption_repo.insert_consumption(&rec).await?;
        info!(
            "Consumption for member {}: amount={} item='{}' reward_points={}",
            member_id, rec.amount, rec.sold_item, rec.reward_points
        );
        Ok(rec)
    }

    /// Spends `points` on `item`. The balance check and the debit are one atomic
    /// ledger commit.
    pub async fn redeem(
        &self,
        member_id: Uuid,
        points: i64,
        item: Option<&str>,
    ) -> Result<RedeemOutcome, Error> {
        let redemption = RedemptionRecord::new(member_id, points, item)?;
        self.member_service.get_member(member_id).await?;

        let batch = LedgerBatch::new().with_redemption(redemption.clone());
        let current_points = match self.ledger_repo.apply_conditional(member_id, points, &batch).await {
            Ok(balance) => balance,
            Err(Error::InsufficientPoints { available, required }) => {
                warn!(
                    "Redemption refused for member {}: available={}, required={}",
                    member_id, available, required
                );
                return Err(Error::InsufficientPoints { available, required });
            }
            Err(e) => return Err(e),
        };

        info!(
            "Member {} redeemed {} points for '{}' (balance now {})",
            member_id, points, redemption.redeemed_item, current_points
        );
        Ok(RedeemOutcome { redemption, current_points })
    }

    pub async fn profile(&self, member_id: Uuid) -> Result<MemberProfile, Error> {
        let member = self.member_service.get_member(member_id).await?;
        let consumptions = self.consumption_repo.list_consumptions_for_member(member_id).await?;
        let redemptions = self
            .redemption_repo
            .list_redemptions_for_member(member_id, PROFILE_HISTORY_LIMIT)
            .await?;
        let slot_plays = self
            .slot_repo
            .list_slot_records_for_member(member_id, PROFILE_HISTORY_LIMIT)
            .await?;
        let totals = self.ledger_repo.ledger_totals(member_id).await?;

        Ok(MemberProfile {
            member,
            consumptions,
            redemptions,
            slot_plays,
            available_points: totals.available(),
            totals,
        })
    }
}
