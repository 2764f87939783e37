//! The external collaborators spec.md §1 names but excludes from the core:
//! the line-oriented transaction parser (§6.1–§6.2) and the event-output
//! renderer (§6.3). Both depend on `matching_core`'s types; neither owns a
//! critical section, a socket, or a process exit code — that is
//! `matching-cli`'s job.

pub mod parser;
pub mod render;

pub use parser::{parse_transactions, MonotonicClock};
pub use render::render_event;
