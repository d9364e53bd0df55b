//! Before hooks run ahead of the method routes.

use crate::path::Pattern;
use crate::request::Method;
use crate::router::Target;

/// A hook invoked before route dispatch when its method and pattern match.
///
/// Hooks for every method share one list on the router; the method tag is
/// checked at dispatch time. Every matching hook runs and none can stop the
/// route phase.
#[derive(Debug, Clone)]
pub struct BeforeRoute {
    /// Method this hook applies to.
    pub method: Method,
    /// Normalized path pattern.
    pub pattern: Pattern,
    /// What to invoke on a match.
    pub target: Target,
}

impl BeforeRoute {
    /// Returns `true` if this hook applies to `method`.
    #[must_use]
    pub fn applies_to(&self, method: Method) -> bool {
        self.method == method
    }
}
