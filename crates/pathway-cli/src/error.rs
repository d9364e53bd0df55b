//! Error types for the command-line front end.

use std::path::PathBuf;

use pathway_router::RouterError;

/// Errors raised while loading or validating a route file.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// The route file could not be read.
    #[error("Failed to read route file '{path}': {source}")]
    Io {
        /// Path to the route file.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The route file is not valid JSON for the expected layout.
    #[error("Failed to parse route file: {0}")]
    Parse(#[from] serde_json::Error),

    /// A route entry names an unsupported method or an invalid pattern.
    #[error("Invalid {section} entry #{index}: {source}")]
    InvalidEntry {
        /// Either `routes` or `before`.
        section: &'static str,
        /// Zero-based position within the section.
        index: usize,
        /// What the router rejected.
        #[source]
        source: RouterError,
    },
}

/// Result type for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
