//! Error types for the annotation pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for annotation operations.
pub type Result<T> = std::result::Result<T, AnnotatorError>;

/// Errors that abort an annotation run.
#[derive(Debug, Error)]
pub enum AnnotatorError {
    #[error("IO error at {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to load image {}: {}", .path.display(), .source)]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Path does not have enough levels to get the dataset subfolder: {}", .0.display())]
    InvalidDatasetPath(PathBuf),

    #[error("Path has no file name: {}", .0.display())]
    MissingFileName(PathBuf),

    #[error("Annotation window error: {0}")]
    Window(String),
}

impl AnnotatorError {
    /// Wrap an IO error together with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AnnotatorError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<minifb::Error> for AnnotatorError {
    fn from(err: minifb::Error) -> Self {
        AnnotatorError::Window(err.to_string())
    }
}
