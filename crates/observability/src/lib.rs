//! Tracing and logging setup shared by StockDesk binaries.

/// Initialize process-wide observability (tracing/logging).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Tracing configuration (filters, layers).
pub mod tracing;

/// Guard decision logging.
pub mod guard;

pub use guard::TracingGuardObserver;
