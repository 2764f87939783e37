use crate::order::{Order, OrderID, UserID};

/// The four transaction variants accepted by [`crate::engine::Engine::process`]
/// (spec.md §6.1).
///
/// `matching-io`'s parser is what actually produces these from the CSV-like
/// wire format (spec.md §6.2); the engine only needs the variants themselves.
#[derive(Clone, Debug)]
pub enum Transaction {
    /// A new limit order for a given symbol.
    NewOrder { symbol: String, order: Order },
    /// A request to cancel a resting order on behalf of a user.
    CancelOrder { user: UserID, order_id: OrderID },
    /// Wipe every resting order on the book.
    FlushAll,
    /// The upstream parser could not make sense of a record; terminal.
    ParseError { err: String },
}
