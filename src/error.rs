use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for annotator operations.
pub type Result<T> = std::result::Result<T, AnnotatorError>;

/// Error variants surfaced by the annotator.
///
/// There is no variant for malformed docblocks: the parser treats them as
/// empty.
#[derive(Debug, Error)]
pub enum AnnotatorError {
    /// The class identifier does not name a class that can be found.
    #[error("class '{class}' could not be resolved")]
    Resolution {
        /// The identifier as given by the caller.
        class: String,
    },

    /// Reading or writing a source file failed.
    #[error("failed to access '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file could not be read or is invalid.
    #[error("invalid configuration '{path}': {message}")]
    Config { path: PathBuf, message: String },
}

impl AnnotatorError {
    pub fn resolution(class: impl Into<String>) -> Self {
        Self::Resolution {
            class: class.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
