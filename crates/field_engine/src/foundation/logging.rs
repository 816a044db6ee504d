//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system
///
/// Defaults to the `info` level; `RUST_LOG` overrides it as usual.
pub fn init() {
    let env = env_logger::Env::default().default_filter_or("info");
    // A second init (tests, embedding) is harmless, so the error is ignored
    let _ = env_logger::Builder::from_env(env).try_init();
}
