//! Chart document boundary model.

/// Animation timing and shared titles.
pub mod config;
/// The JSON document read by the CLI and sessions.
pub mod document;
