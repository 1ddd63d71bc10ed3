//! Tracing and logging (shared setup).

/// Initialize process-wide observability (tracing/logging).
///
/// Filter comes from `RUST_LOG` (default `info`); output format from
/// `JEWELBILL_LOG_FORMAT`. Safe to call multiple times.
pub fn init() {
    tracing::init();
}

/// Tracing configuration (filters, output format).
pub mod tracing;

pub use self::tracing::{init_with, LogFormat, LOG_FORMAT_VAR};
