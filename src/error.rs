// src/error.rs

//! Unified error handling for the bulletin monitor.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for monitor operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// HTTP client error not tied to a specific request
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request never produced a response (DNS, connect, TLS)
    #[error("error fetching {url}: {message}")]
    Fetch { url: String, message: String },

    /// Server answered with something other than 200
    #[error("unexpected status code {status} from {url}")]
    UnexpectedStatus { url: String, status: u16 },

    /// Response body could not be read to the end
    #[error("failed to read response body from {url}: {message}")]
    Body { url: String, message: String },

    /// Snapshot file could not be read or written
    #[error("snapshot file {}: {}", path.display(), source)]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Gateway rejected or never received the notification
    #[error("notification error: {0}")]
    Notify(String),

    /// An error wrapped with the step that produced it
    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<AppError>,
    },
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a transport-level fetch error.
    pub fn fetch(url: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Fetch {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// Create an unexpected status error.
    pub fn unexpected_status(url: impl Into<String>, status: u16) -> Self {
        Self::UnexpectedStatus {
            url: url.into(),
            status,
        }
    }

    /// Create a body read error.
    pub fn body(url: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Body {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// Create a snapshot storage error.
    pub fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }

    /// Create a notification send error.
    pub fn notify(message: impl fmt::Display) -> Self {
        Self::Notify(message.to_string())
    }

    /// Status code carried by this error, looking through context wrappers.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { status, .. } => Some(*status),
            Self::Context { source, .. } => source.status(),
            _ => None,
        }
    }
}

/// Attach call-site context to an error while propagating it.
pub trait ResultExt<T> {
    fn context(self, context: &str) -> Result<T>;
}

impl<T, E: Into<AppError>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: &str) -> Result<T> {
        self.map_err(|e| AppError::Context {
            context: context.to_string(),
            source: Box::new(e.into()),
        })
    }
}
