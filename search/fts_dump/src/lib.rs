//! Inspection tool for the full-text tokenizer.
//!
//! Tokenizes files and prints their token stream, marker table, or summary
//! statistics. Files are read as raw bytes and must already be UTF-8; no
//! charset conversion happens here.

mod error;
mod options;
mod report;

use std::sync::Once;

pub use error::DumpError;
pub use options::{parse_options, Command, DumpOptions};
pub use report::{render, run, run_file, FileReport};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=fts_dump=debug` or `RUST_LOG=fts_tokenizer=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true).with_writer(std::io::stderr))
                .with(filter)
                .init();
        }
    });
}
