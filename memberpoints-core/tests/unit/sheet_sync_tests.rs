// File: memberpoints-core/tests/unit/sheet_sync_tests.rs

use std::collections::HashMap;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use memberpoints_common::models::{ConsumptionCategory, ConsumptionRecord, Member, SyncStatus};
use memberpoints_common::traits::repository_traits::{ConsumptionRepository, MemberRepository};
use memberpoints_core::Error;
use memberpoints_core::sheets::{SheetLayout, SheetRow, SheetSource};
use memberpoints_core::slot::ReelSymbol::*;
use crate::support::{FixedDraw, Harness, harness};

struct FakeSheet {
    layout: SheetLayout,
    rows: Result<Vec<SheetRow>, String>,
}

impl FakeSheet {
    /// Rows placed on consecutive sheet rows starting at row 2.
    fn with_rows(rows: Vec<[&str; 4]>) -> Self {
        Self::with_numbered_rows(rows.into_iter().enumerate().map(|(i, r)| (i + 2, r)).collect())
    }

    fn with_numbered_rows(rows: Vec<(usize, [&str; 4])>) -> Self {
        let layout = SheetLayout::default();
        let rows = rows
            .into_iter()
            .map(|(number, [email, amount, item, time])| {
                SheetRow::new(
                    number,
                    HashMap::from([
                        (layout.email_column.clone(), email.to_string()),
                        (layout.amount_column.clone(), amount.to_string()),
                        (layout.item_column.clone(), item.to_string()),
                        (layout.time_column.clone(), time.to_string()),
                    ]),
                )
            })
            .collect();
        Self { layout, rows: Ok(rows) }
    }

    fn failing(message: &str) -> Self {
        Self { layout: SheetLayout::default(), rows: Err(message.to_string()) }
    }
}

#[async_trait]
impl SheetSource for FakeSheet {
    fn layout(&self) -> &SheetLayout {
        &self.layout
    }

    async fn fetch_rows(&self) -> Result<Vec<SheetRow>, Error> {
        self.rows.clone().map_err(Error::Sheets)
    }
}

async fn add_member(h: &Harness, username: &str, email: &str) -> Result<Member, Error> {
    let member = Member::new(username, Some(email));
    h.store.create_member(&member).await?;
    Ok(member)
}

#[tokio::test]
async fn test_sync_replaces_consumptions() -> Result<(), Error> {
    let h = harness(FixedDraw::reels([Symbol1, Symbol2, Symbol3]));
    let alice = add_member(&h, "alice", "alice@example.com").await?;
    let stale = ConsumptionRecord::purchase(alice.member_id, Decimal::from(9990), "old", Utc::now())?;
    h.store.insert_consumption(&stale).await?;

    let sheet = FakeSheet::with_rows(vec![
        [" alice@example.com ", "NT$1,250.00", "latte", "2025-01-15 18:30:00"],
        ["alice@example.com", "80", "", "2025-01-16T09:00:00+08:00"],
    ]);
    let report = h.sync.sync(&sheet).await;

    assert_eq!(report.status, SyncStatus::Success);
    assert_eq!(report.inserted, 2);
    assert_eq!(report.skipped, 0);
    assert_eq!(report.replaced, 1);

    let mut recs = h.store.consumptions().await;
    recs.sort_by_key(|r| r.sales_time);
    assert_eq!(recs.len(), 2);
    assert_eq!(recs[0].amount, "1250.00".parse::<Decimal>().unwrap());
    assert_eq!(recs[0].reward_points, 125);
    assert_eq!(recs[0].category, ConsumptionCategory::Purchase);
    // Naive times are Asia/Taipei (UTC+8).
    assert_eq!(recs[0].sales_time, Utc.with_ymd_and_hms(2025, 1, 15, 10, 30, 0).unwrap());
    assert_eq!(recs[1].sold_item, "未知品項");
    assert_eq!(recs[1].reward_points, 8);
    assert_eq!(recs[1].sales_time, Utc.with_ymd_and_hms(2025, 1, 16, 1, 0, 0).unwrap());

    let logs = h.store.sync_logs().await;
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].status, SyncStatus::Success);
    Ok(())
}

#[tokio::test]
async fn test_sync_skips_unmatched_and_ambiguous_emails() -> Result<(), Error> {
    let h = harness(FixedDraw::reels([Symbol1, Symbol2, Symbol3]));
    add_member(&h, "alice", "alice@example.com").await?;
    add_member(&h, "twin1", "twin@example.com").await?;
    add_member(&h, "twin2", "twin@example.com").await?;

    let sheet = FakeSheet::with_rows(vec![
        ["ghost@example.com", "100", "tea", "2025-01-15 10:00"],
        ["twin@example.com", "100", "tea", "2025-01-15 10:00"],
        ["", "100", "tea", "2025-01-15 10:00"],
        ["alice@example.com", "100", "tea", "2025-01-15 10:00"],
    ]);
    let report = h.sync.sync(&sheet).await;

    assert_eq!(report.status, SyncStatus::Success);
    assert_eq!(report.inserted, 1);
    assert_eq!(report.skipped, 3);
    let message = report.message();
    assert!(message.contains("Row 2: no member with email ghost@example.com"));
    assert!(message.contains("Row 3: email twin@example.com matches 2 members"));
    assert!(message.contains("Row 4: no member email"));
    assert_eq!(h.store.consumptions().await.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_sync_unparseable_date_falls_back_to_now() -> Result<(), Error> {
    let h = harness(FixedDraw::reels([Symbol1, Symbol2, Symbol3]));
    add_member(&h, "alice", "alice@example.com").await?;

    let before = Utc::now();
    let sheet = FakeSheet::with_rows(vec![["alice@example.com", "300", "cake", "next tuesday"]]);
    let report = h.sync.sync(&sheet).await;
    let after = Utc::now();

    assert_eq!(report.inserted, 1);
    assert!(report.message().contains("unrecognised sales time 'next tuesday'"));
    let recs = h.store.consumptions().await;
    assert!(recs[0].sales_time >= before && recs[0].sales_time <= after);
    Ok(())
}

#[tokio::test]
async fn test_sync_reports_bad_amounts_without_failing() -> Result<(), Error> {
    let h = harness(FixedDraw::reels([Symbol1, Symbol2, Symbol3]));
    add_member(&h, "alice", "alice@example.com").await?;

    let sheet = FakeSheet::with_rows(vec![
        ["alice@example.com", "-50", "refund", "2025-01-15 10:00"],
        ["alice@example.com", "1.2.3", "typo", "2025-01-15 10:00"],
    ]);
    let report = h.sync.sync(&sheet).await;

    assert_eq!(report.status, SyncStatus::Success);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.inserted, 1);
    let recs = h.store.consumptions().await;
    assert_eq!(recs[0].amount, Decimal::ZERO);
    assert_eq!(recs[0].reward_points, 0);
    Ok(())
}

#[tokio::test]
async fn test_sync_oversized_amount_skips_only_that_row() -> Result<(), Error> {
    let h = harness(FixedDraw::reels([Symbol1, Symbol2, Symbol3]));
    add_member(&h, "alice", "alice@example.com").await?;

    let sheet = FakeSheet::with_rows(vec![
        ["alice@example.com", "100", "tea", "2025-01-15 10:00"],
        ["alice@example.com", "12,345,678,901", "yacht", "2025-01-15 10:00"],
    ]);
    let report = h.sync.sync(&sheet).await;

    assert_eq!(report.status, SyncStatus::Success);
    assert_eq!(report.inserted, 1);
    assert_eq!(report.skipped, 1);
    assert!(report.message().contains("Row 3: error:"));
    let recs = h.store.consumptions().await;
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].sold_item, "tea");
    Ok(())
}

#[tokio::test]
async fn test_sync_amounts_are_stored_in_cents() -> Result<(), Error> {
    let h = harness(FixedDraw::reels([Symbol1, Symbol2, Symbol3]));
    add_member(&h, "alice", "alice@example.com").await?;

    let sheet = FakeSheet::with_rows(vec![["alice@example.com", "9.999", "tea", "2025-01-15 10:00"]]);
    h.sync.sync(&sheet).await;

    let recs = h.store.consumptions().await;
    assert_eq!(recs[0].amount, "10.00".parse::<Decimal>().unwrap());
    assert_eq!(recs[0].reward_points, 1);
    Ok(())
}

#[tokio::test]
async fn test_sync_notes_use_sheet_row_numbers() -> Result<(), Error> {
    let h = harness(FixedDraw::reels([Symbol1, Symbol2, Symbol3]));

    // Sheet row 2 was blank and never reached the sync.
    let sheet = FakeSheet::with_numbered_rows(vec![
        (3, ["ghost@example.com", "100", "tea", "2025-01-15 10:00"]),
    ]);
    let report = h.sync.sync(&sheet).await;

    assert_eq!(report.notes, vec!["Row 3: no member with email ghost@example.com, row skipped.".to_string()]);
    Ok(())
}

#[tokio::test]
async fn test_sync_fetch_failure_keeps_existing_records() -> Result<(), Error> {
    let h = harness(FixedDraw::reels([Symbol1, Symbol2, Symbol3]));
    let alice = add_member(&h, "alice", "alice@example.com").await?;
    let kept = ConsumptionRecord::purchase(alice.member_id, Decimal::from(100), "kept", Utc::now())?;
    h.store.insert_consumption(&kept).await?;

    let report = h.sync.sync(&FakeSheet::failing("quota exceeded")).await;

    assert_eq!(report.status, SyncStatus::Failure);
    assert!(report.message().contains("quota exceeded"));
    assert_eq!(h.store.consumptions().await, vec![kept]);

    let logs = h.sync.recent_logs(10).await?;
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].status, SyncStatus::Failure);
    assert!(logs[0].message.as_deref().unwrap_or_default().contains("quota exceeded"));
    Ok(())
}
