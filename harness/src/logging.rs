//! Diagnostic logging for the `grade` binary.
//!
//! Stdout carries the ledger and nothing else, so every event goes to stderr.
//! Probe failure reasons are logged at `debug`; the learner never sees them
//! unless they raise the filter.

use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Filter directive variable checked before `RUST_LOG`.
pub const LOG_ENV: &str = "COURSEGRADE_LOG";
/// Directive used when neither variable is set.
pub const DEFAULT_DIRECTIVE: &str = "warn";

/// Build the event filter: `COURSEGRADE_LOG`, then `RUST_LOG`, then `warn`.
#[must_use]
pub fn env_filter() -> EnvFilter {
    match std::env::var(LOG_ENV) {
        Ok(directive) => EnvFilter::try_new(&directive).unwrap_or_else(|err| {
            eprintln!("invalid {LOG_ENV} directive ({err}); defaulting to {DEFAULT_DIRECTIVE}");
            EnvFilter::new(DEFAULT_DIRECTIVE)
        }),
        Err(_) => {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
        }
    }
}

/// Install the stderr subscriber. A second call is a no-op.
pub fn init_tracing() {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);
    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt_layer)
        .try_init()
        .ok();
}
