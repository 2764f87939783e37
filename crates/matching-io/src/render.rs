//! The event-output renderer (spec.md §6.3).
//!
//! The rendering rule itself lives on [`matching_core::prelude::Event`] so
//! the core stays the single source of truth for which variants produce a
//! line and which are suppressed; this module is just the boundary that
//! hands the renderer's sink (`matching-cli`) a free function to call
//! without importing the core's `Event` directly.

use matching_core::prelude::Event;

/// Renders `event` to its output line, or `None` to suppress it.
pub fn render_event(event: &Event) -> Option<String> {
    event.render()
}
