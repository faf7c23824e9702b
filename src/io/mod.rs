//! Input/output: configuration, errors, command line and previews

/// Command-line interface and batch runner
pub mod cli;
/// Constants and generation configuration
pub mod configuration;
/// Error types
pub mod error;
/// PNG preview export
pub mod image;
/// Terminal progress display
pub mod progress;
