//! Error types for rule extraction, solving and output

use std::fmt;
use std::path::PathBuf;

/// Main error type for all generation operations
#[derive(Debug)]
pub enum AlgorithmError {
    /// Example pattern cannot be turned into adjacency rules
    ///
    /// Occurs when the pattern is empty or its rows are not all the same length
    InvalidPattern {
        /// Description of what's wrong with the pattern
        reason: String,
    },

    /// Every generation attempt ended in a contradiction
    GenerationFailed {
        /// Number of attempts made before giving up
        attempts: usize,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Grid access outside the grid dimensions
    ///
    /// Neighbor iteration is bounds-checked, so this indicates a logic fault
    OutOfBounds {
        /// Requested position (row, col)
        position: [usize; 2],
        /// Grid dimensions (rows, cols)
        dimensions: (usize, usize),
    },

    /// Failed to save a generated preview to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
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

impl fmt::Display for AlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPattern { reason } => {
                write!(f, "Invalid example pattern: {reason}")
            }
            Self::GenerationFailed { attempts } => {
                write!(
                    f,
                    "Generation failed: every one of {attempts} attempts hit a contradiction"
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::OutOfBounds {
                position,
                dimensions,
            } => {
                write!(
                    f,
                    "Position ({}, {}) is outside the {}x{} grid",
                    position[0], position[1], dimensions.0, dimensions.1
                )
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
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

impl std::error::Error for AlgorithmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for generation results
pub type Result<T> = std::result::Result<T, AlgorithmError>;

impl From<std::io::Error> for AlgorithmError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> AlgorithmError {
    AlgorithmError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid pattern error
pub fn invalid_pattern(reason: &impl ToString) -> AlgorithmError {
    AlgorithmError::InvalidPattern {
        reason: reason.to_string(),
    }
}

/// Create an out-of-bounds error for a grid of the given dimensions
pub const fn out_of_bounds(position: [usize; 2], dimensions: (usize, usize)) -> AlgorithmError {
    AlgorithmError::OutOfBounds {
        position,
        dimensions,
    }
}
