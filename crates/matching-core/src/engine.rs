use crate::book::Book;
use crate::cancel::CancellationToken;
use crate::error::EngineError;
use crate::event::Event;
use crate::order::{Order, OrderID, Price, Quantity, Side};
use crate::transaction::Transaction;
use crossbeam::channel::{bounded, Receiver, Sender, TrySendError};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Mutex;

/// Default bounded capacity of the event stream (spec.md §4.4).
pub const DEFAULT_EVENT_BUFFER: usize = 10;

const STATE_OPEN: u8 = 0;
const STATE_CLOSED: u8 = 1;

/// The transaction-processing state machine of spec.md §4.4.
///
/// Owns one [`Book`] behind a single exclusive lock (spec.md §5's
/// "cooperative single-writer" model) and the sending half of a bounded
/// channel acting as the event stream (spec.md §4.5). All mutation happens
/// under the lock; events produced during one call are buffered locally and
/// drained onto the channel before the lock is released, so transactions
/// from different callers never interleave their events (spec.md §9,
/// the "buffer events locally per transaction" design note).
pub struct Engine {
    book: Mutex<Book>,
    sender: Sender<Event>,
    state: AtomicU8,
}

impl Engine {
    /// Creates an open engine with the given event-stream capacity, and
    /// returns the receiving half. The engine is the sole owner of the
    /// sending half; there is exactly one consumer of the receiver
    /// (spec.md §5 "shared resources").
    pub fn new(event_buffer: usize) -> (Self, Receiver<Event>) {
        let (sender, receiver) = bounded(event_buffer);
        let engine = Engine {
            book: Mutex::new(Book::new()),
            sender,
            state: AtomicU8::new(STATE_OPEN),
        };
        (engine, receiver)
    }

    /// Creates an open engine with [`DEFAULT_EVENT_BUFFER`] capacity.
    pub fn with_default_buffer() -> (Self, Receiver<Event>) {
        Self::new(DEFAULT_EVENT_BUFFER)
    }

    fn ensure_open(&self) -> Result<(), EngineError> {
        if self.state.load(Ordering::Acquire) != STATE_OPEN {
            return Err(EngineError::EngineNotStarted);
        }
        Ok(())
    }

    /// Dispatches on the transaction variant (spec.md §6.1).
    pub fn process(&self, transaction: Transaction, token: &CancellationToken) -> Result<(), EngineError> {
        match transaction {
            Transaction::NewOrder { order, .. } => self.add_order(order, token),
            Transaction::CancelOrder { order_id, .. } => self.cancel_order(order_id, token),
            Transaction::FlushAll => self.flush(token),
            Transaction::ParseError { err } => Err(EngineError::ParseError(err)),
        }
    }

    /// Signals the event stream closed. Idempotent (spec.md §4.4.4).
    pub fn close(&self) {
        self.state.store(STATE_CLOSED, Ordering::Release);
    }

    /// Implements spec.md §4.4.1.
    pub fn add_order(&self, mut incoming: Order, token: &CancellationToken) -> Result<(), EngineError> {
        self.ensure_open()?;
        if token.is_cancelled() {
            return Err(EngineError::Cancelled);
        }
        if incoming.amount == 0 {
            return Err(EngineError::InvalidOrderAmount);
        }

        let mut events: Vec<Event> = Vec::new();
        {
            let mut book = self.book.lock().expect("engine book mutex poisoned");

            if book.contains(incoming.id) {
                return Err(EngineError::DuplicateOrderId(incoming.id));
            }

            let buy_before = book.top_level_quantity(Side::Buy);
            let sell_before = book.top_level_quantity(Side::Sell);

            let opposite = incoming.side.opposite();
            loop {
                let Some(maker) = book.top(opposite).cloned() else {
                    break;
                };
                let (residual, trade) = incoming.match_order(&maker);
                match (residual, trade) {
                    (None, None) => break,
                    (None, Some(trade)) => {
                        events.push(Event::TradeGenerated { trade });
                        book.remove_by_id(maker.id);
                        events.push(Event::Filled {
                            order: maker,
                            full: true,
                        });
                        incoming.amount = 0;
                        break;
                    }
                    (Some(residual), Some(trade)) => {
                        events.push(Event::TradeGenerated { trade });
                        book.remove_by_id(maker.id);
                        if residual.side == incoming.side {
                            events.push(Event::Filled {
                                order: maker,
                                full: true,
                            });
                            incoming = residual;
                            continue;
                        } else {
                            book.insert(residual.clone());
                            events.push(Event::Filled {
                                order: residual,
                                full: false,
                            });
                            incoming.amount = 0;
                            break;
                        }
                    }
                    (Some(_), None) => unreachable!("Order::match_order never returns a lone residual"),
                }
            }

            if incoming.amount > 0 {
                book.insert(incoming.clone());
                events.push(Event::Created { order: incoming });
            }

            if let Some(event) = top_of_book_event(&book, Side::Buy, &buy_before) {
                events.push(event);
            }
            if let Some(event) = top_of_book_event(&book, Side::Sell, &sell_before) {
                events.push(event);
            }

            self.drain(events, token)?;
        }
        Ok(())
    }

    /// Implements spec.md §4.4.2.
    pub fn cancel_order(&self, order_id: OrderID, token: &CancellationToken) -> Result<(), EngineError> {
        self.ensure_open()?;
        if token.is_cancelled() {
            return Err(EngineError::Cancelled);
        }

        let mut events: Vec<Event> = Vec::new();
        {
            let mut book = self.book.lock().expect("engine book mutex poisoned");

            let Some(side) = book.side_of(order_id) else {
                return Err(EngineError::OrderNotFound(order_id));
            };
            let before = book.top_level_quantity(side);
            let (order, _) = book
                .remove_by_id(order_id)
                .expect("order_id was just confirmed resting via side_of");

            events.push(Event::Cancelled { order });

            if let Some(event) = top_of_book_event(&book, side, &before) {
                events.push(event);
            }

            self.drain(events, token)?;
        }
        Ok(())
    }

    /// Implements spec.md §4.4.3. Emits no events.
    pub fn flush(&self, token: &CancellationToken) -> Result<(), EngineError> {
        self.ensure_open()?;
        if token.is_cancelled() {
            return Err(EngineError::Cancelled);
        }
        let mut book = self.book.lock().expect("engine book mutex poisoned");
        book.flush();
        Ok(())
    }

    fn drain(&self, events: Vec<Event>, token: &CancellationToken) -> Result<(), EngineError> {
        for event in events {
            self.send_one(event, token)?;
        }
        Ok(())
    }

    fn send_one(&self, event: Event, token: &CancellationToken) -> Result<(), EngineError> {
        let mut pending = event;
        loop {
            match self.sender.try_send(pending) {
                Ok(()) => return Ok(()),
                Err(TrySendError::Disconnected(_)) => return Err(EngineError::EventStreamClosed),
                Err(TrySendError::Full(returned)) => {
                    if token.is_cancelled() {
                        return Err(EngineError::Cancelled);
                    }
                    pending = returned;
                    std::thread::yield_now();
                }
            }
        }
    }
}

/// Computes the spec.md §4.4.1 step-4 `TopOfBookChange` for `side`, if the
/// top level changed between `before` (the pre-transaction snapshot of the
/// top price and its aggregate quantity) and the book's current top level.
///
/// Comparing the aggregate, not just the single tail order, matters because
/// an order can be added or removed *behind* the top (same price, earlier
/// timestamp stays closer to the tail per §4.2) without displacing which
/// order is the tail — but the level's resting quantity still changed, and
/// §8 S5 requires that to surface as a `TopOfBookChange`.
fn top_of_book_event(book: &Book, side: Side, before: &Option<(Price, Quantity)>) -> Option<Event> {
    let after = book.top_level_quantity(side);
    if *before == after {
        return None;
    }
    Some(Event::TopOfBookChange { side, level: after })
}
