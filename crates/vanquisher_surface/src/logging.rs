//! Logging utilities
//!
//! The library logs through the `log` facade; binaries call
//! [`init_with_level`] once at startup to install `env_logger`.

/// Initialize logging with a default level, still overridable by `RUST_LOG`
pub fn init_with_level(level: log::LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}
