//! Common error types used throughout reelshelf.
//!
//! Every catalog failure funnels into [`Error`], which carries enough context
//! for the HTTP layer to derive a status code via [`Error::http_status`].

use std::fmt;
use std::path::PathBuf;

/// Unified error type for catalog resolution.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested show, season, variant, or item does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of entity (e.g. "show", "media").
        entity: String,
        /// The identifier that was looked up.
        id: String,
    },

    /// The directory exists but holds nothing eligible to list.
    #[error("No {entity} found in {id}")]
    EmptyListing {
        /// What was expected (e.g. "episodes").
        entity: String,
        /// The logical location that came up empty.
        id: String,
    },

    /// A caller-supplied path segment was rejected by the sanitizer.
    #[error("Invalid {entity} segment {segment:?}: {reason}")]
    InvalidPath {
        /// The kind of entity the segment was meant to address.
        entity: String,
        /// The raw segment as received.
        segment: String,
        /// Why it was rejected. Never shown to callers.
        reason: String,
    },

    /// A directory under the media root could not be read.
    #[error("Scan error at {}: {source}", .path.display())]
    Scan {
        /// The directory that failed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Map this error to an HTTP status code.
    ///
    /// Rejected paths report 404 so they cannot be told apart from missing entries.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::NotFound { .. } | Self::EmptyListing { .. } | Self::InvalidPath { .. } => 404,
            Self::Scan { .. } | Self::Internal(_) => 500,
        }
    }

    /// Create a new NotFound error.
    pub fn not_found(entity: impl Into<String>, id: impl fmt::Display) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Create a new EmptyListing error.
    pub fn empty_listing(entity: impl Into<String>, id: impl fmt::Display) -> Self {
        Self::EmptyListing {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Create a new InvalidPath error.
    pub fn invalid_path(
        entity: impl Into<String>,
        segment: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidPath {
            entity: entity.into(),
            segment: segment.into(),
            reason: reason.into(),
        }
    }

    /// Create a new Scan error for `path`.
    pub fn scan(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Scan {
            path: path.into(),
            source,
        }
    }

    /// Create a new Internal error.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }

    /// Downgrade a scan failure to NotFound.
    ///
    /// Leaf requests (a single show, season, or variant) report unreadable
    /// directories as missing; catalog-wide requests keep the server fault.
    pub fn into_leaf(self, entity: &str, id: impl fmt::Display) -> Self {
        match self {
            Self::Scan { .. } => Self::not_found(entity, id),
            other => other,
        }
    }

    /// True for every variant a caller sees as "not found".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::InvalidPath { .. })
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
