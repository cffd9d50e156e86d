// File: memberpoints-core/tests/unit/support.rs

use std::sync::Arc;
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;
use memberpoints_common::models::{ConsumptionRecord, Member};
use memberpoints_common::traits::repository_traits::{ConsumptionRepository, MemberRepository};
use memberpoints_core::Error;
use memberpoints_core::services::{LedgerService, MemberService, SheetSyncService, SlotService};
use memberpoints_core::slot::reels::REEL_COUNT;
use memberpoints_core::slot::{GridSymbol, ReelSpin, ReelSymbol, SlotGrid, SymbolDraw};
use memberpoints_core::test_utils::memory::InMemoryStore;

/// Always lands on the same symbols.
pub struct FixedDraw {
    pub reels: [ReelSymbol; REEL_COUNT],
    pub grid: [[GridSymbol; 3]; 3],
}

impl FixedDraw {
    pub fn reels(reels: [ReelSymbol; REEL_COUNT]) -> Self {
        use GridSymbol::*;
        Self {
            reels,
            grid: [[Cherry, Lemon, Bell], [Lemon, Star, Cherry], [Bell, Cherry, Lemon]],
        }
    }

    pub fn grid(grid: [[GridSymbol; 3]; 3]) -> Self {
        use ReelSymbol::*;
        Self { reels: [Symbol1, Symbol2, Symbol3], grid }
    }
}

impl SymbolDraw for FixedDraw {
    fn draw_reels(&self) -> ReelSpin {
        ReelSpin::stopping_at(self.reels)
    }

    fn draw_grid(&self) -> SlotGrid {
        SlotGrid::new(self.grid)
    }
}

pub struct Harness {
    pub store: InMemoryStore,
    pub members: Arc<MemberService>,
    pub ledger: Arc<LedgerService>,
    pub slots: Arc<SlotService>,
    pub sync: Arc<SheetSyncService>,
}

pub fn harness(draw: FixedDraw) -> Harness {
    let store = InMemoryStore::new();
    let repo = Arc::new(store.clone());
    let members = Arc::new(MemberService::new(repo.clone()));
    let ledger = Arc::new(LedgerService::new(
        repo.clone(),
        repo.clone(),
        repo.clone(),
        repo.clone(),
        members.clone(),
    ));
    let slots = Arc::new(SlotService::new(repo.clone(), members.clone(), Arc::new(draw)));
    let sync = Arc::new(SheetSyncService::new(repo.clone(), repo.clone(), repo));
    Harness { store, members, ledger, slots, sync }
}

/// Creates a member and credits `points` through a purchase of `points * 10`.
pub async fn member_with_points(store: &InMemoryStore, username: &str, points: i64) -> Result<Member, Error> {
    let member = Member::new(username, Some(&format!("{}@example.com", username)));
    store.create_member(&member).await?;
    if points > 0 {
        let rec = ConsumptionRecord::purchase(
            member.member_id,
            Decimal::from(points * 10),
            "seed purchase",
            Utc::now(),
        )?;
        store.insert_consumption(&rec).await?;
    }
    Ok(member)
}

pub fn unknown_member() -> Uuid {
    Uuid::new_v4()
}
