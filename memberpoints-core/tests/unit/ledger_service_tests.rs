// File: memberpoints-core/tests/unit/ledger_service_tests.rs

use rust_decimal::Decimal;
use memberpoints_common::models::{ConsumptionCategory, LedgerTotals};
use memberpoints_core::Error;
use memberpoints_core::slot::ReelSymbol::*;
use crate::support::{FixedDraw, harness, member_with_points, unknown_member};

#[tokio::test]
async fn test_new_member_has_zero_points() -> Result<(), Error> {
    let h = harness(FixedDraw::reels([Symbol1, Symbol2, Symbol3]));
    let member = member_with_points(&h.store, "newbie", 0).await?;

    assert_eq!(h.ledger.available_points(member.member_id).await?, 0);
    assert_eq!(h.ledger.ledger_totals(member.member_id).await?, LedgerTotals::default());
    Ok(())
}

#[tokio::test]
async fn test_add_consumption_credits_ten_percent() -> Result<(), Error> {
    let h = harness(FixedDraw::reels([Symbol1, Symbol2, Symbol3]));
    let member = member_with_points(&h.store, "alice", 0).await?;

    let rec = h
        .ledger
        .add_consumption(member.member_id, "155.50".parse::<Decimal>().unwrap(), "  latte ")
        .await?;
    assert_eq!(rec.category, ConsumptionCategory::Purchase);
    assert_eq!(rec.reward_points, 15);
    assert_eq!(rec.sold_item, "latte");
    assert_eq!(h.ledger.available_points(member.member_id).await?, 15);
    Ok(())
}

#[tokio::test]
async fn test_add_consumption_rounds_amount_to_cents() -> Result<(), Error> {
    let h = harness(FixedDraw::reels([Symbol1, Symbol2, Symbol3]));
    let member = member_with_points(&h.store, "alice", 0).await?;

    let rec = h
        .ledger
        .add_consumption(member.member_id, "9.999".parse::<Decimal>().unwrap(), "tea")
        .await?;
    assert_eq!(rec.amount, "10.00".parse::<Decimal>().unwrap());
    assert_eq!(rec.reward_points, 1);
    assert_eq!(h.store.consumptions().await[0], rec);

    let huge = h
        .ledger
        .add_consumption(member.member_id, "10000000000".parse::<Decimal>().unwrap(), "island")
        .await;
    assert!(matches!(huge, Err(Error::Validation(_))));
    Ok(())
}

#[tokio::test]
async fn test_add_consumption_rejects_bad_input() -> Result<(), Error> {
    let h = harness(FixedDraw::reels([Symbol1, Symbol2, Symbol3]));
    let member = member_with_points(&h.store, "alice", 0).await?;

    let negative = h.ledger.add_consumption(member.member_id, Decimal::from(-5), "tea").await;
    assert!(matches!(negative, Err(Error::Validation(_))));

    let no_item = h.ledger.add_consumption(member.member_id, Decimal::from(5), "   ").await;
    assert!(matches!(no_item, Err(Error::Validation(_))));

    let nobody = h.ledger.add_consumption(unknown_member(), Decimal::from(5), "tea").await;
    assert!(matches!(nobody, Err(Error::NotFound(_))));

    assert!(h.store.consumptions().await.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_redeem_debits_balance() -> Result<(), Error> {
    let h = harness(FixedDraw::reels([Symbol1, Symbol2, Symbol3]));
    let member = member_with_points(&h.store, "bob", 100).await?;

    let outcome = h.ledger.redeem(member.member_id, 40, Some("mug")).await?;
    assert_eq!(outcome.current_points, 60);
    assert_eq!(outcome.redemption.redeemed_item, "mug");

    let outcome = h.ledger.redeem(member.member_id, 60, None).await?;
    assert_eq!(outcome.current_points, 0);
    assert_eq!(outcome.redemption.redeemed_item, "unspecified");
    Ok(())
}

#[tokio::test]
async fn test_redeem_more_than_available_writes_nothing() -> Result<(), Error> {
    let h = harness(FixedDraw::reels([Symbol1, Symbol2, Symbol3]));
    let member = member_with_points(&h.store, "bob", 30).await?;

    let res = h.ledger.redeem(member.member_id, 31, Some("hoodie")).await;
    match res {
        Err(Error::InsufficientPoints { available, required }) => {
            assert_eq!(available, 30);
            assert_eq!(required, 31);
        }
        other => panic!("expected InsufficientPoints, got {:?}", other),
    }
    assert!(h.store.redemptions().await.is_empty());

    let zero = h.ledger.redeem(member.member_id, 0, None).await;
    assert!(matches!(zero, Err(Error::Validation(_))));
    Ok(())
}

#[tokio::test]
async fn test_concurrent_redemptions_never_overdraw() -> Result<(), Error> {
    let h = harness(FixedDraw::reels([Symbol1, Symbol2, Symbol3]));
    let member = member_with_points(&h.store, "carol", 50).await?;

    let mut handles = Vec::new();
    for _ in 0..10 {
        let ledger = h.ledger.clone();
        let id = member.member_id;
        handles.push(tokio::spawn(async move { ledger.redeem(id, 10, None).await }));
    }
    let mut ok = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            ok += 1;
        }
    }

    assert_eq!(ok, 5);
    assert_eq!(h.ledger.available_points(member.member_id).await?, 0);
    Ok(())
}

#[tokio::test]
async fn test_profile_collects_history_and_totals() -> Result<(), Error> {
    let h = harness(FixedDraw::reels([Wild, Wild, Wild]));
    let member = member_with_points(&h.store, "dave", 100).await?;

    h.ledger.redeem(member.member_id, 20, Some("sticker")).await?;
    h.slots.spin(member.member_id, 10).await?;

    let profile = h.ledger.profile(member.member_id).await?;
    assert_eq!(profile.member.username, "dave");
    assert_eq!(profile.consumptions.len(), 1);
    assert_eq!(profile.redemptions.len(), 1);
    assert_eq!(profile.slot_plays.len(), 1);
    assert_eq!(
        profile.totals,
        LedgerTotals { consumption_rewards: 100, slot_wins: 100, redemptions: 20, slot_bets: 10 }
    );
    assert_eq!(profile.available_points, 170);

    assert!(matches!(h.ledger.profile(unknown_member()).await, Err(Error::NotFound(_))));
    Ok(())
}
