use matching_core::prelude::*;
use std::time::{Duration, Instant};

/// Quickly builds a limit order for benchmarking, `age_millis` counting
/// backwards from "now" so callers can express relative time priority.
pub fn make_limit_order(id: OrderID, side: Side, price: Price, amount: Quantity, age_millis: u64) -> Order {
    Order {
        id,
        user: id,
        side,
        price,
        amount,
        timestamp: Instant::now() - Duration::from_millis(age_millis),
    }
}
