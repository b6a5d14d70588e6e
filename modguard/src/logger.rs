//! Logger setup for the `modguard` binary.
//!
//! Logs go to stderr so that reports on stdout stay machine-readable.

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Initializes `env_logger`. An explicit `level` overrides `RUST_LOG`;
/// otherwise `RUST_LOG` applies, defaulting to `warn`.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.target(Target::Stderr).format_timestamp(None);
    let _ = builder.try_init();
}
