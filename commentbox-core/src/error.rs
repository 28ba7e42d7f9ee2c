/// Structured error types for commentbox-core.
///
/// Library consumers get composable `thiserror` errors; the CLI wraps them
/// in `anyhow` for reporting.
use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::model::ValidationErrors;
use crate::service::ServiceError;

/// Main error type for widget operations
#[derive(Error, Debug)]
pub enum WidgetError {
    /// Submission rejected before any network call
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    /// The remote comment service failed or refused the request
    #[error("comment service error: {0}")]
    Service(#[from] ServiceError),

    /// The page is missing an element the widget depends on
    #[error("missing page element #{id}")]
    MissingElement { id: String },

    /// Configuration error
    #[error("configuration error in {path:?}: {reason}")]
    Config { path: PathBuf, reason: String },

    /// I/O operation failed
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

/// Result type alias for commentbox-core operations
pub type Result<T> = std::result::Result<T, WidgetError>;

impl WidgetError {
    pub fn missing_element(id: impl Into<String>) -> Self {
        Self::MissingElement { id: id.into() }
    }

    pub fn config(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
