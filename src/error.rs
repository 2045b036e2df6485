//! Typed errors for the article library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.
//!
//! Only fatal validation failures escape the public entry points.
//! Recoverable field violations and rejected child entities are resolved
//! internally and surface as `tracing` diagnostics.

use thiserror::Error;

use crate::schema::Violations;

/// Errors that can occur while constructing or normalizing articles.
#[derive(Debug, Error)]
pub enum ArticleError {
    /// A required field is empty or malformed; the article is unusable.
    #[error("validation failed: {0}")]
    Validation(Violations),

    /// Strict collection construction hit an invalid entity.
    #[error("entity rejected: {0}")]
    Rejected(Violations),

    /// A Map-form key held a value of the wrong type.
    #[error("invalid value for key '{key}': expected {expected}")]
    Decode {
        key: String,
        expected: &'static str,
    },
}

/// Errors reported by an external extraction source.
///
/// These never propagate out of the merge: a failed source simply
/// contributes no fields.
#[derive(Debug, Error)]
pub enum ExtractorError {
    /// The source could not make sense of the markup.
    #[error("unreadable markup: {0}")]
    Html(String),

    /// The source ran but found nothing useful.
    #[error("no content extracted")]
    NoContent,

    /// Source-specific failure.
    #[error("extractor error: {0}")]
    Other(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Result type alias for article operations.
pub type Result<T> = std::result::Result<T, ArticleError>;
