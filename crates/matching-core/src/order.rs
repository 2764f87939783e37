use std::time::Instant;

/// Identifier assigned by the producer; unique within an engine's lifetime.
pub type OrderID = u64;

/// Opaque identifier carried for reporting only; never interpreted by the core.
pub type UserID = u64;

/// Resting or incoming quantity, in whatever unit the caller defines for the symbol.
pub type Quantity = u64;

/// Limit price, in whatever unit the caller defines for the symbol.
pub type Price = u64;

/// Which side of the book an order rests on.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Side {
    /// The order wants to acquire the asset; matches against resting sells.
    Buy,
    /// The order wants to dispose of the asset; matches against resting buys.
    Sell,
}

impl Side {
    /// The side that this side crosses against.
    pub fn opposite(self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }

    /// First character of the uppercased side name, used by the output encoding (spec §6.3).
    pub fn letter(self) -> char {
        match self {
            Side::Buy => 'B',
            Side::Sell => 'S',
        }
    }
}

/// A single resting or incoming order.
///
/// `amount` is always the residual quantity, never the original (spec.md §3
/// invariant 5) — it is decremented in place as fills occur.
#[derive(Clone, Debug)]
pub struct Order {
    pub id: OrderID,
    pub user: UserID,
    pub side: Side,
    pub price: Price,
    pub amount: Quantity,
    pub timestamp: Instant,
}

impl Order {
    /// Book ordering predicate (spec.md §4.2).
    ///
    /// Both orders must share a side; comparing across sides is a programmer
    /// error, not a recoverable condition, so this panics rather than
    /// returning a `Result`.
    pub fn less_than(&self, other: &Order) -> bool {
        assert_eq!(
            self.side, other.side,
            "Order::less_than called on orders of different sides"
        );
        match self.side {
            Side::Buy => {
                self.price < other.price
                    || (self.price == other.price && self.timestamp > other.timestamp)
            }
            Side::Sell => {
                self.price > other.price
                    || (self.price == other.price && self.timestamp > other.timestamp)
            }
        }
    }

    /// Matches `self` (the incoming/taker order) against `other` (the
    /// resting/maker order), per spec.md §4.1.
    ///
    /// The trade always executes at the maker's (`other`'s) price. Returns
    /// `(None, None)` when the two orders do not cross or are not opposite
    /// sides.
    pub fn match_order(&self, other: &Order) -> (Option<Order>, Option<Trade>) {
        if self.side == other.side {
            return (None, None);
        }
        let (buyer, seller) = match self.side {
            Side::Buy => (self, other),
            Side::Sell => (other, self),
        };
        if buyer.price < seller.price {
            return (None, None);
        }

        let trade_price = other.price;
        let trade_amount = self.amount.min(other.amount);
        let (buy_order_id, sell_order_id, buy_user, sell_user) = match self.side {
            Side::Buy => (self.id, other.id, self.user, other.user),
            Side::Sell => (other.id, self.id, other.user, self.user),
        };
        let trade = Trade {
            taker_order_id: self.id,
            maker_order_id: other.id,
            buy_order_id,
            sell_order_id,
            buy_user,
            sell_user,
            price: trade_price,
            amount: trade_amount,
            timestamp: Instant::now(),
        };

        if self.amount == other.amount {
            return (None, Some(trade));
        }
        if self.amount > other.amount {
            let residual = Order {
                id: self.id,
                user: self.user,
                side: self.side,
                price: self.price,
                amount: self.amount - other.amount,
                timestamp: self.timestamp,
            };
            return (Some(residual), Some(trade));
        }
        let residual = Order {
            id: other.id,
            user: other.user,
            side: other.side,
            price: other.price,
            amount: other.amount - self.amount,
            timestamp: other.timestamp,
        };
        (Some(residual), Some(trade))
    }
}

use crate::trade::Trade;
