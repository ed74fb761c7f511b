//! Error types for trajectory playback and persistence.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for trajectory operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Trajectory or settings file does not exist or cannot be accessed
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Object index outside the trajectory collection
    #[error("Object index {index} out of bounds (count: {count})")]
    ObjectOutOfBounds { index: usize, count: usize },

    /// A command needs a selected object and none is selected
    #[error("No object selected")]
    NothingSelected,

    /// Settings file exists but could not be understood
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an "other" error from a string.
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Map an I/O error on `path` to [`Error::FileNotFound`] when that is what it is.
    pub fn from_io(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound(path.into())
        } else {
            Self::Io(err)
        }
    }
}

/// Result type alias for trajectory operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = Error::NothingSelected;
        assert!(e.to_string().contains("selected"));

        let e = Error::ObjectOutOfBounds { index: 5, count: 3 };
        assert!(e.to_string().contains("5"));
        assert!(e.to_string().contains("3"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "test");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_from_io_not_found() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = Error::from_io(io_err, "missing.txt");
        match err {
            Error::FileNotFound(p) => assert_eq!(p, PathBuf::from("missing.txt")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
