//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system
///
/// `default_filter` is used unless `RUST_LOG` is set. Returns `false` when a
/// logger was already installed (tests, embedding hosts).
pub fn init(default_filter: &str) -> bool {
    let env = env_logger::Env::default().default_filter_or(default_filter);
    env_logger::Builder::from_env(env).try_init().is_ok()
}
