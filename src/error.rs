//! Unified error handling for the energyua crate
//!
//! Every failure that leaves the fetch/parse pipeline is one of two kinds:
//!
//! - [`ErrorKind::Communication`] - the page could not be retrieved
//!   (connection refused, DNS failure, timeout, non-success status)
//! - [`ErrorKind::General`] - anything else that went wrong unexpectedly
//!
//! Missing configuration (no region or group selected) is not an error; the
//! client logs a warning and leaves its state untouched.
//!
//! # Usage
//!
//! ```rust,ignore
//! use energyua::error::{Error, ErrorKind};
//!
//! fn report(err: &Error) {
//!     match err.kind() {
//!         ErrorKind::Communication => tracing::error!("{err}"),
//!         ErrorKind::General => tracing::error!(error = ?err, "unexpected failure"),
//!     }
//! }
//! ```

use thiserror::Error;

pub use crate::utils::error::FetchError;

/// Closed classification of pipeline failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Network-level failure at the page fetcher boundary
    Communication,
    /// Any other unexpected failure during fetch or parse
    General,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Communication => "communication",
            Self::General => "general",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unified error type for the energyua crate
#[derive(Error, Debug)]
pub enum Error {
    /// The page could not be fetched
    #[error("Error fetching page - {0}")]
    Communication(#[source] FetchError),

    /// Unexpected failure with context
    #[error("Unexpected failure - {context}")]
    General {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl Error {
    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Communication(_) => ErrorKind::Communication,
            Self::General { .. } => ErrorKind::General,
        }
    }

    /// Communication failures are worth another attempt on the next poll
    pub fn is_recoverable(&self) -> bool {
        self.kind() == ErrorKind::Communication
    }

    /// Create a general error with context
    pub fn general(context: impl Into<String>) -> Self {
        Self::General {
            context: context.into(),
            source: None,
        }
    }

    /// Create a general error with context and source
    pub fn with_source(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::General {
            context: context.into(),
            source: Some(Box::new(source)),
        }
    }
}

impl From<FetchError> for Error {
    fn from(err: FetchError) -> Self {
        if err.is_network() {
            Self::Communication(err)
        } else {
            Self::with_source("page could not be processed", err)
        }
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
