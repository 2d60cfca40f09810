//! Core infrastructure: error handling, cell types and crate-wide constants.

pub mod constants;
pub mod error;
pub mod types;

use std::sync::Once;

static LOGGER_INIT: Once = Once::new();

/// Install the `env_logger` backend for the `log` facade.
///
/// Safe to call repeatedly; only the first call has an effect, and an
/// already-installed logger from the host application is left alone.
pub(crate) fn initialize_logging() {
    LOGGER_INIT.call_once(|| {
        // Try to initialize env_logger, ignore if already initialized
        let _ = env_logger::try_init();
    });
}
