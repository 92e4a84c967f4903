//! Error types and context management for mosaic operations

use std::fmt;
use std::path::{Path, PathBuf};

/// Which of the two classified image pools an operation needed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolKind {
    /// Images from the distinctive cluster, placed on filled cells
    Primary,
    /// All remaining images, placed on empty cells
    Secondary,
}

impl fmt::Display for PoolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => write!(f, "primary"),
            Self::Secondary => write!(f, "secondary"),
        }
    }
}

/// Main error type for all mosaic operations
#[derive(Debug)]
pub enum MosaicError {
    /// Map text contained no lines, or normalized to a grid without columns
    EmptyInput,

    /// Clustering could not produce an assignment
    ///
    /// Raised for degenerate input (no samples, more clusters than samples)
    /// and for numeric failures such as non-finite sample values.
    Clustering {
        /// Description of the failure
        reason: String,
    },

    /// A pool the density grid draws from has no images
    EmptyPool {
        /// The pool that was empty
        pool: PoolKind,
        /// Number of grid cells that required an image from it
        cells: usize,
    },

    /// Required command-line arguments were not supplied
    MissingArgument {
        /// Usage text shown to the user
        usage: String,
    },

    /// Failed to load a source image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save an image to disk
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

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },
}

impl fmt::Display for MosaicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "Map input contains no usable lines"),
            Self::Clustering { reason } => write!(f, "Clustering failed: {reason}"),
            Self::EmptyPool { pool, cells } => {
                write!(
                    f,
                    "The {pool} image pool is empty but {cells} grid cells require it"
                )
            }
            Self::MissingArgument { usage } => {
                write!(f, "Missing required arguments\n{usage}")
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
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
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
        }
    }
}

impl std::error::Error for MosaicError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for mosaic results
pub type Result<T> = std::result::Result<T, MosaicError>;

/// Attaches the offending path to errors converted without one
pub trait WithContext<T> {
    /// Replace the placeholder path of I/O and image errors
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path applied
    fn with_path(self, path: &Path) -> Result<T>;

    /// Replace the placeholder path and name the file system operation
    ///
    /// # Errors
    ///
    /// Propagates the original error with path and operation applied
    fn with_operation(self, path: &Path, operation: &'static str) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<MosaicError>,
{
    fn with_path(self, path: &Path) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            match &mut error {
                MosaicError::ImageLoad { path: p, .. }
                | MosaicError::ImageExport { path: p, .. }
                | MosaicError::FileSystem { path: p, .. } => {
                    *p = path.to_path_buf();
                }
                _ => {}
            }
            error
        })
    }

    fn with_operation(self, path: &Path, operation: &'static str) -> Result<T> {
        self.with_path(path).map_err(|mut error| {
            if let MosaicError::FileSystem { operation: op, .. } = &mut error {
                *op = operation;
            }
            error
        })
    }
}

impl From<image::ImageError> for MosaicError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for MosaicError {
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
) -> MosaicError {
    MosaicError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a clustering error
pub fn clustering_error(reason: &impl ToString) -> MosaicError {
    MosaicError::Clustering {
        reason: reason.to_string(),
    }
}
