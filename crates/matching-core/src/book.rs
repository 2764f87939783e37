use crate::order::{Order, OrderID, Price, Quantity, Side};
use std::collections::HashMap;

/// The resting-order store for one symbol (spec.md §4.3).
///
/// Each side is kept as a `Vec<Order>` ordered so the *tail* is the most
/// aggressive order (top of book) and ties are broken by earliest timestamp
/// appearing closest to the tail. A `HashMap` gives O(1) side lookup by id;
/// locating and removing the order within its side is still a linear scan,
/// which is the tradeoff spec.md §4.3 calls out explicitly as acceptable for
/// this single-producer, single-symbol design.
#[derive(Default)]
pub struct Book {
    buys: Vec<Order>,
    sells: Vec<Order>,
    index: HashMap<OrderID, Side>,
}

impl Book {
    /// Creates an empty book.
    pub fn new() -> Self {
        Self::default()
    }

    fn side_vec(&self, side: Side) -> &Vec<Order> {
        match side {
            Side::Buy => &self.buys,
            Side::Sell => &self.sells,
        }
    }

    fn side_vec_mut(&mut self, side: Side) -> &mut Vec<Order> {
        match side {
            Side::Buy => &mut self.buys,
            Side::Sell => &mut self.sells,
        }
    }

    /// The most aggressive resting order on `side`, if any.
    pub fn top(&self, side: Side) -> Option<&Order> {
        self.side_vec(side).last()
    }

    /// Sum of `amount` over every resting order at `side`'s top price level.
    ///
    /// Returns `None` when the side is empty. Used by the engine to compute
    /// the aggregate quantity carried on a `TopOfBookChange` event (spec.md
    /// §4.4.1 step 4).
    pub fn top_level_quantity(&self, side: Side) -> Option<(Price, Quantity)> {
        let orders = self.side_vec(side);
        let top_price = orders.last()?.price;
        let total = orders
            .iter()
            .rev()
            .take_while(|order| order.price == top_price)
            .map(|order| order.amount)
            .sum();
        Some((top_price, total))
    }

    /// Whether `order_id` currently rests on either side.
    pub fn contains(&self, order_id: OrderID) -> bool {
        self.index.contains_key(&order_id)
    }

    /// The side `order_id` currently rests on, if any.
    pub fn side_of(&self, order_id: OrderID) -> Option<Side> {
        self.index.get(&order_id).copied()
    }

    /// Appends `order` to its side and bubbles it left while its predecessor
    /// compares `Less` than it (spec.md §4.3).
    ///
    /// Precondition: no order with `order.id` is currently resting. Violating
    /// this would silently orphan the previous entry's index mapping, so it
    /// is checked with a debug assertion rather than repeated defensively.
    pub fn insert(&mut self, order: Order) {
        debug_assert!(
            !self.index.contains_key(&order.id),
            "Book::insert called with an id already resting"
        );
        let side = order.side;
        let id = order.id;
        let orders = self.side_vec_mut(side);
        orders.push(order);
        let mut i = orders.len() - 1;
        while i > 0 && orders[i].less_than(&orders[i - 1]) {
            orders.swap(i, i - 1);
            i -= 1;
        }
        self.index.insert(id, side);
    }

    /// Removes and returns the order with `order_id`, scanning from the tail
    /// (most aggressive first), preserving the relative order of the
    /// remainder (spec.md §4.3).
    pub fn remove_by_id(&mut self, order_id: OrderID) -> Option<(Order, Side)> {
        let side = *self.index.get(&order_id)?;
        let orders = self.side_vec_mut(side);
        let pos = orders
            .iter()
            .enumerate()
            .rev()
            .find(|(_, order)| order.id == order_id)
            .map(|(i, _)| i)?;
        let order = orders.remove(pos);
        self.index.remove(&order_id);
        Some((order, side))
    }

    /// Empties both sides and the id index; does not emit events (spec.md §4.4.3).
    pub fn flush(&mut self) {
        self.buys.clear();
        self.sells.clear();
        self.index.clear();
    }

    /// Iterator over the resting orders on `side`, tail (top of book) last.
    pub fn iter(&self, side: Side) -> impl Iterator<Item = &Order> {
        self.side_vec(side).iter()
    }

    /// Number of resting orders on `side`.
    pub fn len(&self, side: Side) -> usize {
        self.side_vec(side).len()
    }

    /// Whether the book has no resting orders on either side.
    pub fn is_empty(&self) -> bool {
        self.buys.is_empty() && self.sells.is_empty()
    }
}
