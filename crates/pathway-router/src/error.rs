//! Error types for routing.

use thiserror::Error;

/// Router-specific errors.
///
/// Dispatch never surfaces these: an unsupported method or a missing route
/// is resolved by the router's fallbacks. They are returned by the helper
/// surfaces that validate input up front, such as parsing a [`Method`]
/// or compiling a [`Pattern`].
///
/// [`Method`]: crate::Method
/// [`Pattern`]: crate::Pattern
#[derive(Debug, Error)]
pub enum RouterError {
    /// The method token is not one of GET, POST, PUT or DELETE.
    #[error("unsupported method: {0}")]
    UnsupportedMethod(String),

    /// The route pattern is not a valid regular expression.
    #[error("invalid path pattern `{pattern}`: {source}")]
    InvalidPattern {
        /// The pattern as written by the caller.
        pattern: String,
        /// The compile error reported by the regex engine.
        #[source]
        source: regex::Error,
    },
}

/// Result type alias for router operations.
pub type Result<T> = std::result::Result<T, RouterError>;
