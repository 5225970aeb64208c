//! Log setup for the CLI.
//!
//! `RUST_LOG` picks the filter (default `info`), e.g.
//! `RUST_LOG=rack_core=debug`.

use tracing_subscriber::{fmt, EnvFilter};

pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
