//! Tracing/logging setup shared by storefront binaries.

/// Initialize process-wide tracing with the default format (JSON).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(tracing::LogFormat::Json);
}

/// Tracing configuration (filters, layers).
pub mod tracing;
