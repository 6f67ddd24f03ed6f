//! Error types for benchmark runs

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for benchmark operations
pub type Result<T> = std::result::Result<T, BenchError>;

/// Error taxonomy of the harness
///
/// Faults inside an image-processing primitive are deliberately absent: the
/// primitives return plain values and a genuine fault panics.
#[derive(Error, Debug)]
pub enum BenchError {
    /// Task name or input file was not supplied
    #[error("Missing required arguments: {0}")]
    MissingArgument(String),

    /// Task name is not part of the catalog
    #[error("Invalid task '{0}'")]
    UnknownTask(String),

    /// Input image could not be decoded, or decoded to an empty buffer
    #[error("Failed to load image: {}", path.display())]
    ImageLoad { path: PathBuf, reason: String },

    /// Invalid configuration or parameters
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Input/output errors while reporting
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BenchError {
    /// Create a new missing argument error from the names of the absent arguments
    pub fn missing_arguments(names: &[&str]) -> Self {
        Self::MissingArgument(names.join(", "))
    }

    /// Create a new unknown task error
    pub fn unknown_task<S: Into<String>>(task: S) -> Self {
        Self::UnknownTask(task.into())
    }

    /// Create image loading error with the underlying decoder reason
    pub fn image_load<P: AsRef<Path>, S: Into<String>>(path: P, reason: S) -> Self {
        Self::ImageLoad {
            path: path.as_ref().to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Create a new invalid configuration error
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create configuration error with valid ranges
    pub fn config_value_error<T: std::fmt::Display>(
        parameter: &str,
        value: T,
        valid_range: &str,
    ) -> Self {
        Self::InvalidConfig(format!(
            "Invalid {}: {} (valid range: {})",
            parameter, value, valid_range
        ))
    }

    /// Underlying decoder reason for image load failures
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::ImageLoad { reason, .. } => Some(reason),
            _ => None,
        }
    }
}
