// File: memberpoints-core/src/services/slot_service.rs

use std::sync::Arc;
use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;
use memberpoints_common::models::redemption::SLOT_BET_ITEM;
use memberpoints_common::models::{
    ConsumptionRecord, LedgerBatch, RedemptionRecord, SlotMachineRecord, SlotVariant,
};
use memberpoints_common::traits::repository_traits::LedgerRepository;
use crate::Error;
use crate::services::member_service::MemberService;
use crate::slot::reels::{REEL_COUNT, REEL_LENGTH};
use crate::slot::{
    GridOutcome, LineWin, ReelSymbol, SlotGrid, SymbolDraw, evaluate_grid, reel_payout,
};

/// `sold_item` of the consumption row that credits a grid win.
pub const SLOT_WIN_ITEM: &str = "slot win";

#[derive(Debug, Clone, Serialize)]
pub struct ReelSpinResult {
    pub reel_sequences: [[ReelSymbol; REEL_LENGTH]; REEL_COUNT],
    pub final_symbols: [ReelSymbol; REEL_COUNT],
    pub win_amount: i64,
    pub current_points: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct GridSpinResult {
    pub grid: SlotGrid,
    pub wins: Vec<LineWin>,
    pub win_points: i64,
    pub message: String,
    pub current_points: i64,
}

pub struct SlotService {
    ledger_repo: Arc<dyn LedgerRepository + Send + Sync>,
    member_service: Arc<MemberService>,
    draw: Arc<dyn SymbolDraw>,
}

fn validate_bet(bet: i64) -> Result<(), Error> {
    if bet <= 0 {
        return Err(Error::Validation(format!("bet must be a positive integer (got {})", bet)));
    }
    Ok(())
}

fn grid_message(outcome: &GridOutcome) -> String {
    match outcome.wins.len() {
        0 => "No winning lines this time.".to_string(),
        1 => format!("1 winning line! You won {} points.", outcome.win_points),
        n => format!("{} winning lines! You won {} points.", n, outcome.win_points),
    }
}

impl SlotService {
    pub fn new(
        ledger_repo: Arc<dyn LedgerRepository + Send + Sync>,
        member_service: Arc<MemberService>,
        draw: Arc<dyn SymbolDraw>,
    ) -> Self {
        Self { ledger_repo, member_service, draw }
    }

    /// Fails fast before drawing. The authoritative check is repeated inside the
    /// ledger commit.
    async fn precheck(&self, member_id: Uuid, bet: i64) -> Result<(), Error> {
        validate_bet(bet)?;
        self.member_service.get_member(member_id).await?;
        let available = self.ledger_repo.available_points(member_id).await?;
        if available < bet {
            warn!("Spin refused for member {}: available={}, bet={}", member_id, available, bet);
            return Err(Error::InsufficientPoints { available, required: bet });
        }
        Ok(())
    }

    /// Three-reel game. The bet and the win are both carried by the slot record.
    pub async fn spin(&self, member_id: Uuid, bet: i64) -> Result<ReelSpinResult, Error> {
        self.precheck(member_id, bet).await?;

        let spin = self.draw.draw_reels();
        let final_symbols = spin.final_symbols();
        let win_amount = reel_payout(&final_symbols, bet);
        debug!("Reel spin for member {}: {} => {}", member_id, spin.encode_result(), win_amount);

        let record = SlotMachineRecord::new(
            member_id,
            SlotVariant::Reels,
            bet,
            spin.encode_result(),
            win_amount,
        );
        let batch = LedgerBatch::new().with_slot_record(record);
        let current_points = self.ledger_repo.apply_conditional(member_id, bet, &batch).await?;

        info!(
            "Member {} spun reels: bet={} win={} balance={}",
            member_id, bet, win_amount, current_points
        );
        Ok(ReelSpinResult {
            reel_sequences: spin.sequences,
            final_symbols,
            win_amount,
            current_points,
        })
    }

    /// 3x3 game. The bet is debited as a redemption and any win is credited as a
    /// slot-win consumption; the slot record is an audit entry.
    pub async fn spin_grid(&self, member_id: Uuid, bet: i64) -> Result<GridSpinResult, Error> {
        self.precheck(member_id, bet).await?;

        let debit = RedemptionRecord::new(member_id, bet, Some(SLOT_BET_ITEM))?;
        let grid = self.draw.draw_grid();
        let outcome = evaluate_grid(&grid, bet);
        debug!("Grid spin for member {}: {} => {}", member_id, grid.encode_result(), outcome.win_points);

        let mut batch = LedgerBatch::new().with_redemption(debit);
        if outcome.win_points > 0 {
            let credit = ConsumptionRecord::slot_win(member_id, outcome.win_points, SLOT_WIN_ITEM, Utc::now())?;
            batch = batch.with_consumption(credit);
        }
        batch = batch.with_slot_record(SlotMachineRecord::new(
            member_id,
            SlotVariant::Grid,
            bet,
            grid.encode_result(),
            outcome.win_points,
        ));

        let current_points = self.ledger_repo.apply_conditional(member_id, bet, &batch).await?;

        info!(
            "Member {} spun grid: bet={} lines={} win={} balance={}",
            member_id, bet, outcome.wins.len(), outcome.win_points, current_points
        );
        Ok(GridSpinResult {
            message: grid_message(&outcome),
            grid,
            win_points: outcome.win_points,
            wins: outcome.wins,
            current_points,
        })
    }
}
