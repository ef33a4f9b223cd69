//! Input/output operations and error handling

/// Command-line interface and batch file processing
pub mod cli;
/// Default values and tunable constants
pub mod configuration;
/// Error types
pub mod error;
/// CSV import and export of point patterns
pub mod pattern_file;
/// Terminal progress display
pub mod progress;
/// JSON reconstruction reports
pub mod report;
