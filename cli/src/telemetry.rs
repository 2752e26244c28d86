//! Tracing setup for the `gradebook` binary.
//!
//! - GRADEBOOK_LOG sets the filter (e.g. "debug" or "warn,gradebook_core=debug").
//! - GRADEBOOK_LOG_FORMAT=json switches to JSON lines.
//!
//! Logs go to stderr so table output and the TUI stay clean.

use tracing_subscriber::EnvFilter;

pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("GRADEBOOK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    match std::env::var("GRADEBOOK_LOG_FORMAT").as_deref() {
        Ok("json") => {
            builder.json().init();
        }
        _ => {
            builder.init();
        }
    }
}
