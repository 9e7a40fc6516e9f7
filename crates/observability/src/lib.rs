//! Process-wide logging setup.

/// Tracing configuration (filters, formatting).
pub mod tracing;

pub use self::tracing::LogFormat;

/// Initialize process-wide tracing with the format taken from the
/// environment (`TALLY_LOG_FORMAT`).
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    tracing::init(LogFormat::from_env());
}
