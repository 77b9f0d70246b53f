//! Internal diagnostics for failures that must not reach the caller

use std::fmt;
use tracing::subscriber::NoSubscriber;

/// Report a recovered runtime failure (rotation, attribution, write).
///
/// Routed through `tracing` when the process has a subscriber, otherwise
/// written straight to stderr so the report is never silently lost.
pub(crate) fn report(args: fmt::Arguments<'_>) {
    if has_subscriber() {
        tracing::warn!("{}", args);
    } else {
        eprintln!("sinklog: {}", args);
    }
}

fn has_subscriber() -> bool {
    tracing::dispatcher::get_default(|dispatch| !dispatch.is::<NoSubscriber>())
}
