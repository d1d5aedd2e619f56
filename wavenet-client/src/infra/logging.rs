use env_logger::{Builder, Target};
use log::LevelFilter;

/// Install the process logger.
///
/// `RUST_LOG` wins when set; otherwise warnings globally and debug output
/// for this crate. Calling it again is harmless.
pub fn init_logger() {
    let result = if std::env::var("RUST_LOG").is_ok() {
        Builder::from_default_env().try_init()
    } else {
        Builder::new()
            .target(Target::Stdout)
            .filter_level(LevelFilter::Warn)
            .filter_module("wavenet_client", LevelFilter::Debug)
            .try_init()
    };

    if result.is_err() {
        log::debug!("Logger already initialized");
    }
}
