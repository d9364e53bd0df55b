//! Path normalization and pattern matching.

use regex::Regex;
use tracing::warn;

use crate::error::{Result, RouterError};
use crate::request::Params;

/// Normalizes a route pattern under an optional base path.
///
/// Leading and trailing slashes are stripped from both parts, which are then
/// joined and rooted with a single `/`.
///
/// # Example
///
/// ```
/// use pathway_router::normalize_pattern;
///
/// assert_eq!(normalize_pattern("", "users/"), "/users");
/// assert_eq!(normalize_pattern("/api/", "/users"), "/api/users");
/// assert_eq!(normalize_pattern("api", "/"), "/api");
/// ```
#[must_use]
pub fn normalize_pattern(base: &str, pattern: &str) -> String {
    let pattern = pattern.trim_matches('/');
    let base = base.trim_matches('/');
    if base.is_empty() {
        return format!("/{pattern}");
    }
    let joined = format!("{base}/{pattern}");
    format!("/{}", joined.trim_matches('/'))
}

/// Resolves a raw request path for matching.
///
/// Everything from the first `?` onward is dropped and the remainder gets a
/// single leading `/` and no trailing `/`. The root resolves to `/`.
#[must_use]
pub fn resolve_path(path: &str) -> String {
    let path = path.split_once('?').map_or(path, |(before, _)| before);
    format!("/{}", path.trim_matches('/'))
}

/// A compiled route pattern.
///
/// The pattern is a regular-expression fragment anchored against the whole
/// path, so `/user/([0-9]+)` matches `/user/42` but not `/user/42/edit`.
#[derive(Debug, Clone)]
pub struct Pattern {
    /// The pattern as stored on the route.
    source: String,
    /// Compiled regex, `None` if the fragment failed to compile.
    regex: Option<Regex>,
}

impl Pattern {
    /// Compiles a pattern.
    ///
    /// # Example
    ///
    /// ```
    /// use pathway_router::Pattern;
    ///
    /// let pattern = Pattern::new("/posts/([0-9]+)/comments/([0-9]+)").unwrap();
    /// let params = pattern.captures("/posts/12/comments/7").unwrap();
    /// assert_eq!(params.get(0), Some("12"));
    /// assert_eq!(params.get(1), Some("7"));
    /// ```
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(&format!("^(?:{pattern})$")).map_err(|source| {
            RouterError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            }
        })?;
        Ok(Self {
            source: pattern.to_string(),
            regex: Some(regex),
        })
    }

    /// Compiles a pattern, falling back to one that never matches.
    pub(crate) fn lenient(pattern: &str) -> Self {
        Self::new(pattern).unwrap_or_else(|err| {
            warn!(error = %err, "Route pattern will never match");
            Self {
                source: pattern.to_string(),
                regex: None,
            }
        })
    }

    /// Returns the pattern string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns `false` if the pattern failed to compile.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.regex.is_some()
    }

    /// Matches a resolved path, returning the captured parameters.
    ///
    /// Each group yields its matched text cut off where the following group
    /// starts, with surrounding `/` trimmed. A group that did not
    /// participate yields `None`. A pattern without groups yields empty
    /// params on a match.
    #[must_use]
    pub fn captures(&self, path: &str) -> Option<Params> {
        let caps = self.regex.as_ref()?.captures(path)?;
        let groups: Vec<Option<regex::Match<'_>>> = caps.iter().skip(1).collect();

        let values = groups
            .iter()
            .enumerate()
            .map(|(index, group)| {
                let group = (*group)?;
                let text = group.as_str();
                // A following group that matched earlier in the path leaves
                // nothing of this one.
                let end = groups
                    .get(index + 1)
                    .copied()
                    .flatten()
                    .map_or(text.len(), |next| {
                        next.start().saturating_sub(group.start()).min(text.len())
                    });
                Some(text[..end].trim_matches('/').to_string())
            })
            .collect::<Vec<_>>();

        Some(Params::from(values))
    }
}
