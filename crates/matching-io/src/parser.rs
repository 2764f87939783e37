//! The line-oriented transaction parser (spec.md §6.1–§6.2).
//!
//! One record per line, `#`-prefixed comments and blank lines ignored,
//! whitespace trimmed per field. A record that cannot be parsed produces a
//! `Transaction::ParseError` and halts the stream: the original Go parser
//! this was distilled from sends one error record and returns, closing its
//! channel, rather than skipping the bad line (see `original_source`'s
//! `pkg/io/parser.go`), and spec.md §6.4 treats a non-parseable stream as
//! fatal to the whole batch.

use matching_core::prelude::{Order, Side, Transaction};
use std::io::{BufRead, Lines};
use std::time::{Duration, Instant};

/// Hands out strictly increasing [`Instant`]s so that orders parsed from
/// the same batch always compare by time priority the way they appear in
/// the input (spec.md §9 "Timestamp monotonicity").
///
/// `Instant::now()` is already monotonic, but successive calls on a coarse
/// clock can return the same value; this nudges forward by a nanosecond
/// when that happens so ties never occur between lines parsed in sequence.
pub struct MonotonicClock {
    last: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self { last: Instant::now() }
    }

    pub fn next(&mut self) -> Instant {
        let now = Instant::now();
        let next = if now > self.last { now } else { self.last + Duration::from_nanos(1) };
        self.last = next;
        next
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_u64(field: &str, what: &str) -> Result<u64, String> {
    field
        .parse::<u64>()
        .map_err(|_| format!("problem parsing {what}: {field:?}"))
}

/// Parses a single line into a transaction, or `None` for a comment/blank
/// line that produces no transaction at all.
pub fn parse_line(line: &str, clock: &mut MonotonicClock) -> Option<Transaction> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }

    let fields: Vec<&str> = trimmed.split(',').map(str::trim).collect();
    match fields[0] {
        "N" => Some(parse_new_order(&fields, clock)),
        "C" => Some(parse_cancel(&fields)),
        "F" => Some(Transaction::FlushAll),
        _ => Some(Transaction::ParseError {
            err: format!("invalid line: {trimmed:?}"),
        }),
    }
}

fn parse_new_order(fields: &[&str], clock: &mut MonotonicClock) -> Transaction {
    if fields.len() != 7 {
        return Transaction::ParseError {
            err: format!("invalid create order line, want 7 fields, got {}: {:?}", fields.len(), fields),
        };
    }
    let user = match parse_u64(fields[1], "user ID in create order") {
        Ok(v) => v,
        Err(err) => return Transaction::ParseError { err },
    };
    let symbol = fields[2].to_string();
    let price = match parse_u64(fields[3], "price in create order") {
        Ok(v) => v,
        Err(err) => return Transaction::ParseError { err },
    };
    let amount = match parse_u64(fields[4], "amount in create order") {
        Ok(v) => v,
        Err(err) => return Transaction::ParseError { err },
    };
    let side = match fields[5] {
        "B" => Side::Buy,
        "S" => Side::Sell,
        other => {
            return Transaction::ParseError {
                err: format!("invalid side in create order: {other:?}"),
            }
        }
    };
    let id = match parse_u64(fields[6], "order ID in create order") {
        Ok(v) => v,
        Err(err) => return Transaction::ParseError { err },
    };

    Transaction::NewOrder {
        symbol,
        order: Order {
            id,
            user,
            side,
            price,
            amount,
            timestamp: clock.next(),
        },
    }
}

fn parse_cancel(fields: &[&str]) -> Transaction {
    if fields.len() != 3 {
        return Transaction::ParseError {
            err: format!("invalid cancel order line, want 3 fields, got {}: {:?}", fields.len(), fields),
        };
    }
    let user = match parse_u64(fields[1], "user ID in cancel order") {
        Ok(v) => v,
        Err(err) => return Transaction::ParseError { err },
    };
    let order_id = match parse_u64(fields[2], "order ID in cancel order") {
        Ok(v) => v,
        Err(err) => return Transaction::ParseError { err },
    };
    Transaction::CancelOrder { user, order_id }
}

/// Parses every line from `reader` into transactions, in order. Stops
/// yielding (as if the stream closed) immediately after the first
/// `ParseError`, matching spec.md §6.2/§6.4: a non-parseable line is fatal
/// to the whole batch, not just that record.
pub fn parse_transactions<R: BufRead>(reader: R, clock: &mut MonotonicClock) -> TransactionIter<'_, R> {
    TransactionIter {
        lines: reader.lines(),
        clock,
        halted: false,
    }
}

pub struct TransactionIter<'c, R> {
    lines: Lines<R>,
    clock: &'c mut MonotonicClock,
    halted: bool,
}

impl<'c, R: BufRead> Iterator for TransactionIter<'c, R> {
    type Item = Transaction;

    fn next(&mut self) -> Option<Transaction> {
        if self.halted {
            return None;
        }
        loop {
            let line = match self.lines.next() {
                Some(Ok(line)) => line,
                Some(Err(err)) => {
                    self.halted = true;
                    return Some(Transaction::ParseError {
                        err: format!("problem reading line: {err}"),
                    });
                }
                None => return None,
            };

            if let Some(transaction) = parse_line(&line, self.clock) {
                if matches!(transaction, Transaction::ParseError { .. }) {
                    self.halted = true;
                }
                return Some(transaction);
            }
        }
    }
}
