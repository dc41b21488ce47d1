//! Error type shared by the whole pipeline.

use std::path::{Path, PathBuf};

/// Result alias used throughout the crate
pub type CurveResult<T> = Result<T, CurveError>;

/// Everything that can go wrong while building curves or writing their output.
///
/// Drawing itself never fails; errors only arise at construction and when
/// committing a finished document or image.
#[derive(thiserror::Error, Debug)]
pub enum CurveError {
    /// Malformed input geometry (non-finite coordinates, zero segments)
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// The rendered output could not be encoded or written to its destination
    #[error("export failed for {}: {source}", .path.display())]
    ExportFailed {
        /// Destination the output was meant for
        path: PathBuf,
        /// Underlying cause
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The configuration could not be read or parsed
    #[error("config error: {0}")]
    Config(String),
}

impl CurveError {
    /// Shorthand for [`CurveError::InvalidGeometry`]
    pub fn invalid_geometry(msg: impl Into<String>) -> Self {
        Self::InvalidGeometry(msg.into())
    }

    /// Shorthand for [`CurveError::ExportFailed`]
    pub fn export_failed(
        path: impl AsRef<Path>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::ExportFailed {
            path: path.as_ref().to_path_buf(),
            source: source.into(),
        }
    }

    /// Shorthand for [`CurveError::Config`]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
