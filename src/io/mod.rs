//! Input/output operations, configuration and error handling

/// Command-line interface and pipeline driver
pub mod cli;
/// Pipeline constants and defaults
pub mod configuration;
/// Optional contact sheets of intermediate artifacts
pub mod diagnostics;
/// Error types and context helpers
pub mod error;
/// Image discovery, decoding and export
pub mod image;
/// Map file reading
pub mod map;
/// Progress display for image loading
pub mod progress;
