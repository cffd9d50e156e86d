// File: memberpoints-core/tests/unit/slot_service_tests.rs

use memberpoints_common::models::{ConsumptionCategory, SlotVariant};
use memberpoints_core::Error;
use memberpoints_core::slot::GridSymbol::*;
use memberpoints_core::slot::ReelSymbol::{self, Symbol1, Symbol2, Symbol3, Wild};
use crate::support::{FixedDraw, harness, member_with_points, unknown_member};

async fn reel_win(finals: [ReelSymbol; 3], bet: i64) -> Result<(i64, i64), Error> {
    let h = harness(FixedDraw::reels(finals));
    let member = member_with_points(&h.store, "player", 100).await?;
    let result = h.slots.spin(member.member_id, bet).await?;
    Ok((result.win_amount, result.current_points))
}

#[tokio::test]
async fn test_reel_payouts() -> Result<(), Error> {
    assert_eq!(reel_win([Wild, Wild, Wild], 10).await?, (100, 190));
    assert_eq!(reel_win([Symbol2, Symbol2, Symbol2], 10).await?, (50, 140));
    assert_eq!(reel_win([Wild, Wild, Symbol1], 10).await?, (30, 120));
    assert_eq!(reel_win([Wild, Symbol1, Symbol2], 10).await?, (20, 110));
    assert_eq!(reel_win([Symbol1, Symbol2, Symbol3], 10).await?, (0, 90));
    Ok(())
}

#[tokio::test]
async fn test_reel_spin_records_the_play() -> Result<(), Error> {
    let h = harness(FixedDraw::reels([Wild, Symbol1, Symbol2]));
    let member = member_with_points(&h.store, "player", 100).await?;

    let result = h.slots.spin(member.member_id, 25).await?;
    assert_eq!(result.final_symbols, [Wild, Symbol1, Symbol2]);
    for (reel, last) in result.reel_sequences.iter().zip(result.final_symbols) {
        assert_eq!(reel[11], last);
    }

    let records = h.store.slot_records().await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].variant, SlotVariant::Reels);
    assert_eq!(records[0].bet, 25);
    assert_eq!(records[0].win_points, 50);
    assert_eq!(records[0].grid_result, "wild / symbol1 / symbol2");
    assert!(h.store.redemptions().await.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_spin_with_bet_above_balance_writes_nothing() -> Result<(), Error> {
    let h = harness(FixedDraw::reels([Wild, Wild, Wild]));
    let member = member_with_points(&h.store, "broke", 5).await?;

    let res = h.slots.spin(member.member_id, 10).await;
    assert!(matches!(res, Err(Error::InsufficientPoints { available: 5, required: 10 })));
    let res = h.slots.spin_grid(member.member_id, 10).await;
    assert!(matches!(res, Err(Error::InsufficientPoints { available: 5, required: 10 })));

    assert!(h.store.slot_records().await.is_empty());
    assert!(h.store.redemptions().await.is_empty());
    assert_eq!(h.ledger.available_points(member.member_id).await?, 5);
    Ok(())
}

#[tokio::test]
async fn test_spin_rejects_bad_bet_and_unknown_member() -> Result<(), Error> {
    let h = harness(FixedDraw::reels([Wild, Wild, Wild]));
    let member = member_with_points(&h.store, "player", 100).await?;

    assert!(matches!(h.slots.spin(member.member_id, 0).await, Err(Error::Validation(_))));
    assert!(matches!(h.slots.spin_grid(member.member_id, -1).await, Err(Error::Validation(_))));
    assert!(matches!(h.slots.spin(unknown_member(), 10).await, Err(Error::NotFound(_))));
    Ok(())
}

#[tokio::test]
async fn test_grid_win_settles_through_redemption_and_consumption() -> Result<(), Error> {
    let h = harness(FixedDraw::grid([
        [Seven, Seven, Seven],
        [Cherry, Lemon, Bell],
        [Lemon, Bell, Cherry],
    ]));
    let member = member_with_points(&h.store, "player", 100).await?;

    let result = h.slots.spin_grid(member.member_id, 10).await?;
    assert_eq!(result.win_points, 50);
    assert_eq!(result.wins.len(), 1);
    assert_eq!(result.current_points, 140);
    assert_eq!(result.message, "1 winning line! You won 50 points.");

    let redemptions = h.store.redemptions().await;
    assert_eq!(redemptions.len(), 1);
    assert_eq!(redemptions[0].points_used, 10);
    assert_eq!(redemptions[0].redeemed_item, "slot bet");

    let credits: Vec<_> = h
        .store
        .consumptions()
        .await
        .into_iter()
        .filter(|c| c.category == ConsumptionCategory::SlotWin)
        .collect();
    assert_eq!(credits.len(), 1);
    assert_eq!(credits[0].reward_points, 50);

    let audit = h.store.slot_records().await;
    assert_eq!(audit.len(), 1);
    assert_eq!(audit[0].variant, SlotVariant::Grid);
    assert_eq!(audit[0].win_points, 50);

    // The audit row must not count again.
    assert_eq!(h.ledger.available_points(member.member_id).await?, 140);
    Ok(())
}

#[tokio::test]
async fn test_grid_loss_only_debits_the_bet() -> Result<(), Error> {
    let h = harness(FixedDraw::grid([
        [Cherry, Lemon, Bell],
        [Lemon, Star, Cherry],
        [Bell, Cherry, Lemon],
    ]));
    let member = member_with_points(&h.store, "player", 100).await?;

    let result = h.slots.spin_grid(member.member_id, 10).await?;
    assert_eq!(result.win_points, 0);
    assert!(result.wins.is_empty());
    assert_eq!(result.message, "No winning lines this time.");
    assert_eq!(result.current_points, 90);

    assert_eq!(h.store.consumptions().await.len(), 1);
    assert_eq!(h.store.slot_records().await.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_grid_lines_stack() -> Result<(), Error> {
    let h = harness(FixedDraw::grid([
        [Cherry, Lemon, Bell],
        [Cherry, Cherry, Cherry],
        [Cherry, Bell, Lemon],
    ]));
    let member = member_with_points(&h.store, "player", 100).await?;

    let result = h.slots.spin_grid(member.member_id, 10).await?;
    assert_eq!(result.wins.len(), 2);
    assert_eq!(result.win_points, 40);
    assert_eq!(result.message, "2 winning lines! You won 40 points.");
    assert_eq!(result.current_points, 130);
    Ok(())
}
