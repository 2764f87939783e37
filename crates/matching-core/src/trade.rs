use crate::order::{OrderID, Price, Quantity, UserID};
use std::time::Instant;

/// A single match between a taker and a maker order.
///
/// Trades are emitted once and never stored on the book (spec.md §3).
#[derive(Clone, Debug)]
pub struct Trade {
    pub taker_order_id: OrderID,
    pub maker_order_id: OrderID,
    pub buy_order_id: OrderID,
    pub sell_order_id: OrderID,
    pub buy_user: UserID,
    pub sell_user: UserID,
    pub price: Price,
    pub amount: Quantity,
    pub timestamp: Instant,
}
