//! Price/time-priority limit-order matching engine core.
//!
//! This crate is the CORE described by the matching-engine specification:
//! the order and trade value types, the resting-order book and its ordering
//! invariants, the matching algorithm, and the transaction-processing state
//! machine that drives them. It does not parse input, render output, log,
//! or expose a CLI — those are external collaborators (`matching-io`,
//! `matching-cli`).

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

pub mod book;
pub mod cancel;
pub mod engine;
pub mod error;
pub mod event;
pub mod order;
pub mod trade;
pub mod transaction;

/// Re-exports the types most callers need in one place.
pub mod prelude {
    pub use crate::book::Book;
    pub use crate::cancel::CancellationToken;
    pub use crate::engine::{Engine, DEFAULT_EVENT_BUFFER};
    pub use crate::error::EngineError;
    pub use crate::event::Event;
    pub use crate::order::{Order, OrderID, Price, Quantity, Side, UserID};
    pub use crate::trade::Trade;
    pub use crate::transaction::Transaction;
}
