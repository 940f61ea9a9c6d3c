//! Error types for sample loading, estimation, and figure rendering

use std::fmt;
use std::path::PathBuf;

/// Main error type for all estimation and rendering operations
#[derive(Debug)]
pub enum EstimationError {
    /// Sample data doesn't meet estimation requirements
    InvalidSamples {
        /// Description of what's wrong with the samples
        reason: String,
    },

    /// A token in a sample file could not be parsed as a number
    SampleParse {
        /// Path to the sample file
        path: PathBuf,
        /// 1-based line number of the offending token
        line: usize,
        /// The token that failed to parse
        token: String,
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

    /// Failed to render a chart to disk
    ChartRender {
        /// Path where the chart was being written
        path: PathBuf,
        /// Description of the backend failure
        reason: String,
    },

    /// Failed to encode the search animation
    AnimationExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image encoding error
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

    /// Numerical computation produced invalid result
    Computation {
        /// Name of the computation that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for EstimationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSamples { reason } => {
                write!(f, "Invalid samples: {reason}")
            }
            Self::SampleParse { path, line, token } => {
                write!(
                    f,
                    "Failed to parse '{token}' as a number ({}:{line})",
                    path.display()
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ChartRender { path, reason } => {
                write!(f, "Failed to render chart '{}': {reason}", path.display())
            }
            Self::AnimationExport { path, source } => {
                write!(
                    f,
                    "Failed to export animation to '{}': {source}",
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
            Self::Computation { operation, reason } => {
                write!(f, "Computation error in {operation}: {reason}")
            }
        }
    }
}

impl std::error::Error for EstimationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::AnimationExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for estimation results
pub type Result<T> = std::result::Result<T, EstimationError>;

impl From<std::io::Error> for EstimationError {
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
) -> EstimationError {
    EstimationError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a computation error
pub fn computation_error(operation: &'static str, reason: &impl ToString) -> EstimationError {
    EstimationError::Computation {
        operation,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{EstimationError, invalid_parameter};
    use std::path::PathBuf;

    #[test]
    fn test_display_includes_parameter_details() {
        let err = invalid_parameter("seed", &0, &"must be non-zero");
        let rendered = err.to_string();
        assert!(rendered.contains("seed"));
        assert!(rendered.contains("must be non-zero"));
    }

    #[test]
    fn test_sample_parse_reports_location() {
        let err = EstimationError::SampleParse {
            path: PathBuf::from("readings.txt"),
            line: 3,
            token: "17x".to_string(),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("readings.txt:3"));
        assert!(rendered.contains("17x"));
    }

    #[test]
    fn test_file_system_error_preserves_source() {
        use std::error::Error;

        let err = EstimationError::FileSystem {
            path: PathBuf::from("figures"),
            operation: "create directory",
            source: std::io::Error::other("denied"),
        };
        assert!(err.source().is_some());
    }
}
