//! HTTP methods and positional route parameters.

use std::fmt;
use std::str::FromStr;

use crate::error::RouterError;

/// The HTTP methods a router can dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET method
    Get,
    /// POST method
    Post,
    /// PUT method
    Put,
    /// DELETE method
    Delete,
}

impl Method {
    /// Every supported method, in table order.
    pub const ALL: [Self; 4] = [Self::Get, Self::Post, Self::Put, Self::Delete];

    /// Returns the method as an uppercase string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Get => 0,
            Self::Post => 1,
            Self::Put => 2,
            Self::Delete => 3,
        }
    }
}

impl FromStr for Method {
    type Err = RouterError;

    /// Parses a method token, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            _ => Err(RouterError::UnsupportedMethod(s.to_string())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Splits a pipe-separated method list such as `"GET|post"` into tokens.
///
/// Tokens are returned unvalidated and in order; callers parse each one as
/// they go.
pub fn split_methods(methods: &str) -> impl Iterator<Item = &str> {
    methods.split('|')
}

/// Parameters captured from a matched path, in capture-group order.
///
/// A group that did not take part in the match is `None`, which is distinct
/// from a group that matched an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    values: Vec<Option<String>>,
}

impl Params {
    /// Creates an empty parameter list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of capture groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` when the pattern had no capture groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Gets the value of the group at `index`.
    ///
    /// Returns `None` for an out-of-range index and for a group that did not
    /// participate in the match.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.values.get(index).and_then(Option::as_deref)
    }

    /// Returns `true` if the group at `index` participated in the match.
    #[must_use]
    pub fn is_present(&self, index: usize) -> bool {
        matches!(self.values.get(index), Some(Some(_)))
    }

    /// Parses the group at `index` as a specific type.
    pub fn parse<T: FromStr>(&self, index: usize) -> Option<T> {
        self.get(index).and_then(|v| v.parse().ok())
    }

    /// Returns an iterator over the parameters.
    pub fn iter(&self) -> impl Iterator<Item = Option<&str>> {
        self.values.iter().map(Option::as_deref)
    }

    /// Returns the parameters as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Option<String>] {
        &self.values
    }

    /// Consumes the list, returning the underlying values.
    #[must_use]
    pub fn into_vec(self) -> Vec<Option<String>> {
        self.values
    }
}

impl From<Vec<Option<String>>> for Params {
    fn from(values: Vec<Option<String>>) -> Self {
        Self { values }
    }
}
