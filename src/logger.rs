//! Logger setup shared by the `chain_stats` binary and tests

use std::sync::Once;

use env_logger::Builder;
use log::LevelFilter;

/// Guards the one-time logger installation
static INIT: Once = Once::new();

/// Installs an `env_logger` at `Info`, overridable through `RUST_LOG`.
///
/// Safe to call repeatedly; only the first call installs the logger.
pub fn initialize_logger() {
    INIT.call_once_force(|_| {
        let mut builder = Builder::new();

        builder
            .filter_level(LevelFilter::Info)
            .filter_module("chainmap", LevelFilter::Info)
            .format_timestamp_millis()
            .parse_default_env();

        // Err only means a global logger is already set; keep that one.
        let _ = builder.try_init();
    });
}
