//! The command-line surface spec.md §1 excludes from the core: wiring a
//! file of line-oriented transactions (spec.md §6.1–§6.2) through a
//! `matching_core::Engine`, and the resulting events back out through
//! `matching_io`'s renderer (spec.md §6.3), with the exit-code contract of
//! §6.4 (a non-parseable stream is fatal; a per-transaction rejection is
//! logged and the batch continues).

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use crossbeam::channel::Receiver;
use matching_core::prelude::*;
use matching_io::{parse_transactions, render_event, MonotonicClock};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::PathBuf;
use tracing::{error, info, warn};

/// Runs one symbol's matching engine over a file of transactions.
#[derive(Parser, Debug)]
#[command(author, version, about = "Single-symbol limit-order matching engine")]
pub struct Args {
    /// Path to the line-oriented transaction file (spec.md §6.2).
    pub input: PathBuf,

    /// Capacity of the engine's event stream (spec.md §4.4).
    #[arg(long, default_value_t = DEFAULT_EVENT_BUFFER)]
    pub event_buffer: usize,

    /// Enable debug-level logging.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Processes `args.input` to completion, writing rendered event lines to
/// `out` in arrival order.
///
/// Returns `Err` only for a fatal condition (spec.md §6.4): the input file
/// could not be opened, or the transaction stream contained a
/// `ParseError`. Per-transaction rejections (duplicate id, zero amount,
/// unknown id) are logged as warnings and do not fail the run.
pub fn run<W: Write>(args: &Args, out: &mut W) -> Result<()> {
    let file = File::open(&args.input)
        .with_context(|| format!("opening transaction file {:?}", args.input))?;
    let reader = BufReader::new(file);
    let mut clock = MonotonicClock::new();
    let (engine, rx) = Engine::new(args.event_buffer);
    let token = CancellationToken::new();

    info!(path = ?args.input, "processing transaction batch");

    let mut processed = 0u64;
    let mut rejected = 0u64;

    for transaction in parse_transactions(reader, &mut clock) {
        if let Transaction::ParseError { err } = &transaction {
            error!(%err, "fatal parse error, terminating batch");
            drain(&rx, out)?;
            engine.close();
            return Err(anyhow!("parse error: {err}"));
        }

        match engine.process(transaction, &token) {
            Ok(()) => processed += 1,
            Err(err) => {
                warn!(error = %err, "transaction rejected");
                rejected += 1;
            }
        }
        drain(&rx, out)?;
    }

    engine.close();
    info!(processed, rejected, "transaction batch complete");
    Ok(())
}

fn drain<W: Write>(rx: &Receiver<Event>, out: &mut W) -> Result<()> {
    for event in rx.try_iter() {
        if let Some(line) = render_event(&event) {
            writeln!(out, "{line}").context("writing event line to output")?;
        }
    }
    Ok(())
}
