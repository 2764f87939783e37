use matching_core::prelude::*;
use std::time::{Duration, Instant};

/// Builds a limit order with a timestamp offset so tests can control
/// relative ordering without depending on wall-clock timing.
///
/// `age_millis` counts backwards from "now": a larger value is an earlier
/// order (useful for constructing explicit time-priority scenarios), a
/// smaller value a later one, mirroring the teacher's `ts` parameter.
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

/// Snapshot of one side of the book for assertions, tail (top of book) last.
pub fn book_state(book: &Book, side: Side) -> Vec<(OrderID, Quantity)> {
    book.iter(side).map(|o| (o.id, o.amount)).collect()
}

/// Drains every event currently buffered on `rx` without blocking.
pub fn drain_events(rx: &crossbeam::channel::Receiver<Event>) -> Vec<Event> {
    rx.try_iter().collect()
}

/// Renders every event to its output line, dropping suppressed ones, in order.
pub fn render_lines(events: &[Event]) -> Vec<String> {
    events.iter().filter_map(|e| e.render()).collect()
}
