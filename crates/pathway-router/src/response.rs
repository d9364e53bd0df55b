//! The observable result of dispatching one request.

/// Status assigned when no route matched or a matched target is unbound.
pub const NOT_FOUND: u16 = 404;

/// Status assigned when the request method is not supported.
pub const METHOD_NOT_ALLOWED: u16 = 405;

/// Outcome of [`Router::run`](crate::Router::run).
///
/// The router only assigns a status when a fallback fires; otherwise status
/// handling is left to the invoked handlers and `status` is `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dispatch {
    /// The last status assigned by a fallback.
    pub status: Option<u16>,
    /// Number of before hooks that matched.
    pub before_invoked: usize,
    /// Number of method routes that matched.
    pub routes_matched: usize,
}

impl Dispatch {
    /// Returns `true` if the 404 fallback fired.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status == Some(NOT_FOUND)
    }

    /// Returns `true` if the 405 fallback fired.
    #[must_use]
    pub fn is_method_not_allowed(&self) -> bool {
        self.status == Some(METHOD_NOT_ALLOWED)
    }
}
