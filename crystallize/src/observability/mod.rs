//! Tracing setup for experiment runs.
//!
//! Context overrides, treatment application, and replicate runs all log
//! through `tracing`; this module wires up a subscriber for binaries and
//! test harnesses that want to see them.

use tracing_subscriber::{fmt, EnvFilter};

/// Initializes a global tracing subscriber with env-filter support.
///
/// Filter via `RUST_LOG` (e.g. `RUST_LOG=crystallize=debug`); defaults to
/// `info`. Safe to call more than once — later calls are no-ops.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
