//! Error types for reconstruction setup and file operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all reconstruction operations
#[derive(Debug)]
pub enum ReconstructionError {
    /// Configuration parameter validation failed
    ///
    /// Raised before any run starts, so no partial results exist.
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Observed pattern or window cannot be used as reconstruction input
    InvalidPattern {
        /// Description of what's wrong with the pattern
        reason: String,
    },

    /// A row of a pattern file could not be parsed
    PatternFormat {
        /// Path of the pattern file
        path: PathBuf,
        /// One-based line number of the offending record
        line: u64,
        /// Description of the parse failure
        reason: String,
    },

    /// Failed to write results to disk
    Export {
        /// Path where export was attempted
        path: PathBuf,
        /// Description of the failure
        reason: String,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for ReconstructionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidPattern { reason } => {
                write!(f, "Invalid point pattern: {reason}")
            }
            Self::PatternFormat { path, line, reason } => {
                write!(
                    f,
                    "Malformed pattern file '{}' at line {line}: {reason}",
                    path.display()
                )
            }
            Self::Export { path, reason } => {
                write!(f, "Failed to export to '{}': {reason}", path.display())
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for ReconstructionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for reconstruction results
pub type Result<T> = std::result::Result<T, ReconstructionError>;

impl From<std::io::Error> for ReconstructionError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

impl From<csv::Error> for ReconstructionError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map_or(0, csv::Position::line);
        Self::PatternFormat {
            path: PathBuf::from("<unknown>"),
            line,
            reason: err.to_string(),
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> ReconstructionError {
    ReconstructionError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid pattern error
pub fn invalid_pattern(reason: &impl ToString) -> ReconstructionError {
    ReconstructionError::InvalidPattern {
        reason: reason.to_string(),
    }
}

/// Attach a path to an error raised without one
///
/// `From` conversions cannot know which file was being processed, so callers
/// in the file layer re-label the error once the path is known.
pub fn at_path(error: ReconstructionError, path: impl Into<PathBuf>) -> ReconstructionError {
    match error {
        ReconstructionError::PatternFormat { line, reason, .. } => {
            ReconstructionError::PatternFormat {
                path: path.into(),
                line,
                reason,
            }
        }
        ReconstructionError::FileSystem {
            operation, source, ..
        } => ReconstructionError::FileSystem {
            path: path.into(),
            operation,
            source,
        },
        ReconstructionError::Export { reason, .. } => ReconstructionError::Export {
            path: path.into(),
            reason,
        },
        other => other,
    }
}
