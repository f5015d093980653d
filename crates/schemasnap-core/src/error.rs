//! Error types for the rendering pipeline.
//!
//! # Error Handling Strategy
//!
//! Rendering is atomic: there is no local recovery anywhere in the pipeline,
//! and a failed render yields no partial schema. Two types cover the surface:
//!
//! - [`QueryError`]: raised by a [`crate::executor::QueryExecutor`]
//!   implementation for any execution fault (syntax error, connectivity loss,
//!   permission denial). The driver's error is preserved as the source so
//!   callers can walk the chain.
//!
//! - [`RenderError`]: everything the pipeline itself can raise, wrapping
//!   `QueryError` transparently. Row-shape problems (a catalog column the
//!   pipeline relies on going missing or changing type) fail loudly through
//!   [`RenderError::MissingAttribute`] rather than producing a document with
//!   silently dropped fields.
//!
//! The one exception to fail-fast is parameter-to-procedure linking, where
//! rows for unlisted routines are skipped with a warning; see the stored
//! procedure renderer.

use thiserror::Error;

/// Failure surfaced by a query executor.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct QueryError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl QueryError {
    /// Creates a query error from a bare message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a query error that keeps the underlying driver error as its
    /// source.
    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// The executor's human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Error raised while rendering a schema document.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A catalog query failed. Never retried; the in-flight render aborts.
    #[error(transparent)]
    Query(#[from] QueryError),

    /// An object-kind selector matched neither recognized value.
    ///
    /// The pipeline itself only ever uses the two [`crate::catalog::ObjectKind`]
    /// variants, so this is reachable only through the string-parsing surface.
    #[error("unrecognized object kind `{0}`, expected `table` or `view`")]
    UnrecognizedObjectKind(String),

    /// A catalog row lacks an attribute the pipeline requires, or holds a
    /// non-string value where a name is expected.
    #[error("{context} row has a missing or non-string `{attribute}` attribute")]
    MissingAttribute {
        /// The attribute that was expected, under its normalized key.
        attribute: &'static str,
        /// Which row shape was being read.
        context: &'static str,
    },

    /// `SELECT DATABASE()` returned NULL and no explicit name was configured.
    #[error("no database selected on the connection and no explicit database name was given")]
    NoActiveDatabase,
}
