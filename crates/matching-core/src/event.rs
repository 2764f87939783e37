use crate::order::{Order, Price, Quantity, Side};
use crate::trade::Trade;

/// Discriminated events the [`crate::engine::Engine`] emits, in the exact
/// order it produces them (spec.md §2, §4.4, §4.5).
///
/// Every variant carries only data; the only behavior attached to the type
/// is [`Event::render`], the output-encoding contract of spec.md §6.3. There
/// is no extensibility requirement at runtime (spec.md §9 "Polymorphism over
/// events and transactions"), so this stays a closed enum rather than a
/// trait object.
#[derive(Clone, Debug)]
pub enum Event {
    /// A new order was inserted onto the book (spec.md §4.4.1 step 3).
    Created { order: Order },
    /// A resting order was removed by its owner's request (spec.md §4.4.2).
    Cancelled { order: Order },
    /// A resting order was consumed, fully or partially, during matching
    /// (spec.md §4.4.1 step 2). `full` distinguishes complete consumption
    /// (the maker's entry is gone) from a partial fill (`order` carries the
    /// residual amount that stays on the book).
    Filled { order: Order, full: bool },
    /// A trade executed between a taker and a maker (spec.md §4.1).
    TradeGenerated { trade: Trade },
    /// The top-of-book price/quantity on `side` changed (spec.md §4.4.1
    /// step 4). `level` is `None` when the side became empty.
    TopOfBookChange {
        side: Side,
        level: Option<(Price, Quantity)>,
    },
}

impl Event {
    /// Renders the event per spec.md §6.3, or `None` to suppress it.
    ///
    /// `Filled` (spec's `OrderFilled`/`OrderUpdated`) is always suppressed;
    /// the other four variants produce exactly one line each.
    pub fn render(&self) -> Option<String> {
        match self {
            Event::Created { order } => Some(format!("A, {}, {}", order.user, order.id)),
            Event::Cancelled { order } => Some(format!("A, {}, {}", order.user, order.id)),
            Event::Filled { .. } => None,
            Event::TradeGenerated { trade } => Some(format!(
                "T, {}, {}, {}, {}, {}, {}",
                trade.buy_user,
                trade.buy_order_id,
                trade.sell_user,
                trade.sell_order_id,
                trade.price,
                trade.amount
            )),
            Event::TopOfBookChange { side, level } => match level {
                Some((price, qty)) if *qty > 0 => {
                    Some(format!("B, {}, {}, {}", side.letter(), price, qty))
                }
                _ => Some(format!("B, {}, -, -", side.letter())),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::{OrderID, Side};
    use std::time::Instant;

    fn order(id: OrderID, side: Side, price: Price, amount: Quantity) -> Order {
        Order {
            id,
            user: 7,
            side,
            price,
            amount,
            timestamp: Instant::now(),
        }
    }

    #[test]
    fn created_and_cancelled_render_identically_shaped_lines() {
        let o = order(3, Side::Buy, 10, 5);
        assert_eq!(
            Event::Created { order: o.clone() }.render(),
            Some("A, 7, 3".to_string())
        );
        assert_eq!(
            Event::Cancelled { order: o }.render(),
            Some("A, 7, 3".to_string())
        );
    }

    #[test]
    fn filled_is_always_suppressed() {
        let o = order(3, Side::Buy, 10, 5);
        assert_eq!(
            Event::Filled {
                order: o.clone(),
                full: true
            }
            .render(),
            None
        );
        assert_eq!(
            Event::Filled {
                order: o,
                full: false
            }
            .render(),
            None
        );
    }

    #[test]
    fn top_of_book_change_empty_side_renders_dashes() {
        let event = Event::TopOfBookChange {
            side: Side::Sell,
            level: None,
        };
        assert_eq!(event.render(), Some("B, S, -, -".to_string()));
    }

    #[test]
    fn top_of_book_change_with_level_renders_price_and_qty() {
        let event = Event::TopOfBookChange {
            side: Side::Buy,
            level: Some((11, 80)),
        };
        assert_eq!(event.render(), Some("B, B, 11, 80".to_string()));
    }

    #[test]
    fn trade_generated_orders_buyer_then_seller() {
        let trade = Trade {
            taker_order_id: 3,
            maker_order_id: 102,
            buy_order_id: 3,
            sell_order_id: 102,
            buy_user: 1,
            sell_user: 2,
            price: 11,
            amount: 20,
            timestamp: Instant::now(),
        };
        assert_eq!(
            Event::TradeGenerated { trade }.render(),
            Some("T, 1, 3, 2, 102, 11, 20".to_string())
        );
    }
}
