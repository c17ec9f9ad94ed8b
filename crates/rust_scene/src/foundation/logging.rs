//! Logging utilities

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system
///
/// Honors `RUST_LOG` and falls back to `info`. Calling it more than once is
/// harmless; later calls leave the first logger in place.
pub fn init() {
    let env = env_logger::Env::default().default_filter_or("info");
    if env_logger::Builder::from_env(env).try_init().is_err() {
        log::debug!("Logger already initialized");
    }
}
