//! errsift driver.
//!
//! Turns a command line into a [`sift_check::CheckConfig`] and a
//! [`sift_check::LoadRequest`], loads a typed program dump, checks it and
//! prints the report.
//!
//! ```text
//! args -> parse_args -> Options -> JsonProgramLoader -> analyze -> emitter
//! ```

mod cli;
mod driver;
mod loader;

#[cfg(test)]
mod fixture;

pub use cli::{parse_args, CliError, Format, Options, USAGE};
pub use driver::{run, DriverError};
pub use loader::JsonProgramLoader;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=sift_check=debug` or `RUST_LOG=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}
