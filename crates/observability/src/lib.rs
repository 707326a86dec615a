//! Process-wide logging setup shared by the stockroom binaries.

/// Tracing subscriber configuration (filters, formatters).
pub mod tracing;

pub use self::tracing::LogFormat;

/// Initialize tracing/logging with the given output format.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init(format: LogFormat) {
    tracing::init(format);
}
