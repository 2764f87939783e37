mod common;

use crate::common::*;
use matching_core::prelude::*;
use rand::Rng;

#[test]
fn massive_order_insertion_keeps_every_order_resting_when_non_crossing() {
    let (engine, rx) = Engine::new(200_000);
    let token = CancellationToken::new();

    for i in 0..100_000u64 {
        let order = make_limit_order(i, Side::Buy, 1_000 - (i % 1_000), 10, 1_000_000 - i);
        engine.add_order(order, &token).unwrap();
    }

    let created = drain_events(&rx)
        .into_iter()
        .filter(|e| matches!(e, Event::Created { .. }))
        .count();
    assert_eq!(created, 100_000);
}

#[test]
fn massive_order_cancellation_does_not_panic_on_already_consumed_ids() {
    let (engine, rx) = Engine::new(200_000);
    let token = CancellationToken::new();

    for i in 0..50_000u64 {
        let order = make_limit_order(i, Side::Sell, 1_000 + (i % 500), 10, 2_000_000 + i);
        engine.add_order(order, &token).unwrap();
    }
    let _ = drain_events(&rx);

    let mut rng = rand::thread_rng();
    for _ in 0..25_000 {
        let id = rng.gen_range(0..50_000u64);
        // Some ids will already have been cancelled by an earlier iteration;
        // that must surface as `OrderNotFound`, never a panic.
        let _ = engine.cancel_order(id, &token);
    }
}

#[test]
fn massive_crossing_matches_leave_no_crossed_residual() {
    let (engine, rx) = Engine::new(400_000);
    let token = CancellationToken::new();

    for i in 0..30_000u64 {
        let sell = make_limit_order(i, Side::Sell, 1_000 + (i % 500), 10, 3_000_000 + i);
        engine.add_order(sell, &token).unwrap();
    }
    for i in 30_000..60_000u64 {
        let buy = make_limit_order(i, Side::Buy, 2_000, 10, 4_000_000 + i);
        engine.add_order(buy, &token).unwrap();
    }

    let trades = drain_events(&rx)
        .into_iter()
        .filter(|e| matches!(e, Event::TradeGenerated { .. }))
        .count();
    assert!(trades > 0, "an aggressively priced buy wave should cross resting sells");
}
