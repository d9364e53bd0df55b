//! Main router implementation.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::middleware::BeforeRoute;
use crate::path::{normalize_pattern, resolve_path, Pattern};
use crate::request::{split_methods, Method, Params};
use crate::response::{Dispatch, METHOD_NOT_ALLOWED, NOT_FOUND};

/// A route handler, called with the parameters captured from the path.
pub type Handler = Arc<dyn Fn(&Params) + Send + Sync>;

/// A 404 or 405 fallback.
pub type Fallback = Arc<dyn Fn() + Send + Sync>;

/// What a route invokes when it matches.
#[derive(Clone)]
pub enum Target {
    /// A callable handler.
    Handler(Handler),
    /// A handler that cannot be invoked, such as a name that resolved to
    /// nothing. Matching it triggers the 404 fallback.
    Unbound(String),
}

impl Target {
    /// Wraps a closure as a target.
    pub fn handler<F>(handler: F) -> Self
    where
        F: Fn(&Params) + Send + Sync + 'static,
    {
        Self::Handler(Arc::new(handler))
    }

    /// Creates a target that cannot be invoked.
    pub fn unbound(name: impl Into<String>) -> Self {
        Self::Unbound(name.into())
    }

    /// Returns `true` if the target holds a callable handler.
    #[must_use]
    pub const fn is_invokable(&self) -> bool {
        matches!(self, Self::Handler(_))
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Handler(_) => f.write_str("Handler(..)"),
            Self::Unbound(name) => f.debug_tuple("Unbound").field(name).finish(),
        }
    }
}

/// A method route.
#[derive(Debug, Clone)]
pub struct Route {
    /// Normalized path pattern.
    pub pattern: Pattern,
    /// What to invoke on a match.
    pub target: Target,
}

/// The router.
///
/// Routes are kept in one ordered list per method. Dispatch runs every
/// matching before hook, then every matching route of the request method,
/// both in registration order. Registration consumes and returns the router,
/// so a router is built once and then shared for dispatch.
pub struct Router {
    /// Base path, stored without surrounding slashes.
    base_path: String,
    /// Method routes, indexed by [`Method::index`].
    routes: [Vec<Route>; 4],
    /// Before hooks for all methods.
    before_routes: Vec<BeforeRoute>,
    not_found: Option<Fallback>,
    not_allowed: Option<Fallback>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("base_path", &self.base_path)
            .field("routes", &self.routes)
            .field("before_routes", &self.before_routes)
            .field("not_found", &self.not_found.is_some())
            .field("not_allowed", &self.not_allowed.is_some())
            .finish()
    }
}

impl Router {
    /// Creates a new empty router rooted at `/`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_base("")
    }

    /// Creates a router whose patterns all live under `base_path`.
    ///
    /// ```
    /// use pathway_router::{Method, Router};
    ///
    /// let router = Router::with_base("/api/").get("users", |_| {});
    /// assert_eq!(router.base_path(), "api");
    /// assert_eq!(router.routes(Method::Get)[0].pattern.as_str(), "/api/users");
    /// ```
    #[must_use]
    pub fn with_base(base_path: &str) -> Self {
        Self {
            base_path: base_path.trim_matches('/').to_string(),
            routes: Default::default(),
            before_routes: Vec::new(),
            not_found: None,
            not_allowed: None,
        }
    }

    /// Returns the base path without surrounding slashes.
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Returns the routes registered for `method`, in dispatch order.
    #[must_use]
    pub fn routes(&self, method: Method) -> &[Route] {
        &self.routes[method.index()]
    }

    /// Returns the before hooks, in dispatch order.
    #[must_use]
    pub fn before_routes(&self) -> &[BeforeRoute] {
        &self.before_routes
    }

    /// Adds a GET route.
    #[must_use]
    pub fn get<F>(self, pattern: &str, handler: F) -> Self
    where
        F: Fn(&Params) + Send + Sync + 'static,
    {
        self.route(Method::Get, pattern, handler)
    }

    /// Adds a POST route.
    #[must_use]
    pub fn post<F>(self, pattern: &str, handler: F) -> Self
    where
        F: Fn(&Params) + Send + Sync + 'static,
    {
        self.route(Method::Post, pattern, handler)
    }

    /// Adds a PUT route.
    #[must_use]
    pub fn put<F>(self, pattern: &str, handler: F) -> Self
    where
        F: Fn(&Params) + Send + Sync + 'static,
    {
        self.route(Method::Put, pattern, handler)
    }

    /// Adds a DELETE route.
    #[must_use]
    pub fn delete<F>(self, pattern: &str, handler: F) -> Self
    where
        F: Fn(&Params) + Send + Sync + 'static,
    {
        self.route(Method::Delete, pattern, handler)
    }

    /// Adds a route for an already validated method.
    #[must_use]
    pub fn route<F>(mut self, method: Method, pattern: &str, handler: F) -> Self
    where
        F: Fn(&Params) + Send + Sync + 'static,
    {
        let pattern = self.compile(pattern);
        self.push_route(method, pattern, Target::handler(handler));
        self
    }

    /// Adds a route for a method token such as `"get"`.
    ///
    /// An unsupported token fires the 405 fallback and registers nothing.
    #[must_use]
    pub fn register<F>(self, method: &str, pattern: &str, handler: F) -> Self
    where
        F: Fn(&Params) + Send + Sync + 'static,
    {
        self.register_target(method, pattern, Target::handler(handler))
    }

    /// Adds a route with an explicit target for a single method token.
    ///
    /// A pipe-separated list is not a method token and is rejected like any
    /// other unsupported method.
    #[must_use]
    pub fn register_target(mut self, method: &str, pattern: &str, target: Target) -> Self {
        match method.parse::<Method>() {
            Ok(method) => {
                let pattern = self.compile(pattern);
                self.push_route(method, pattern, target);
            }
            Err(err) => {
                warn!(error = %err, pattern, "Route registration aborted");
                Self::fire(self.not_allowed.as_ref(), METHOD_NOT_ALLOWED);
            }
        }
        self
    }

    /// Adds the same route for several methods, e.g. `"GET|POST"`.
    ///
    /// Methods are registered left to right. The first unsupported token
    /// fires the 405 fallback and stops registration; methods listed
    /// before it stay registered.
    #[must_use]
    pub fn register_multiple<F>(self, methods: &str, pattern: &str, handler: F) -> Self
    where
        F: Fn(&Params) + Send + Sync + 'static,
    {
        self.register_multiple_target(methods, pattern, Target::handler(handler))
    }

    /// Adds the same target for several methods.
    #[must_use]
    pub fn register_multiple_target(mut self, methods: &str, pattern: &str, target: Target) -> Self {
        let pattern = self.compile(pattern);
        for token in split_methods(methods) {
            match token.parse::<Method>() {
                Ok(method) => self.push_route(method, pattern.clone(), target.clone()),
                Err(err) => {
                    warn!(error = %err, pattern = pattern.as_str(), "Route registration aborted");
                    Self::fire(self.not_allowed.as_ref(), METHOD_NOT_ALLOWED);
                    break;
                }
            }
        }
        self
    }

    /// Adds a before hook for several methods, e.g. `"GET|POST"`.
    ///
    /// Unsupported tokens are handled as in [`Router::register_multiple`].
    #[must_use]
    pub fn before<F>(self, methods: &str, pattern: &str, handler: F) -> Self
    where
        F: Fn(&Params) + Send + Sync + 'static,
    {
        self.before_target(methods, pattern, Target::handler(handler))
    }

    /// Adds a before hook with an explicit target.
    #[must_use]
    pub fn before_target(mut self, methods: &str, pattern: &str, target: Target) -> Self {
        let pattern = self.compile(pattern);
        for token in split_methods(methods) {
            match token.parse::<Method>() {
                Ok(method) => self.before_routes.push(BeforeRoute {
                    method,
                    pattern: pattern.clone(),
                    target: target.clone(),
                }),
                Err(err) => {
                    warn!(error = %err, pattern = pattern.as_str(), "Before hook registration aborted");
                    Self::fire(self.not_allowed.as_ref(), METHOD_NOT_ALLOWED);
                    break;
                }
            }
        }
        self
    }

    /// Sets the function invoked when no route matches.
    #[must_use]
    pub fn not_found<F>(mut self, fallback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.not_found = Some(Arc::new(fallback));
        self
    }

    /// Sets the function invoked for unsupported methods.
    #[must_use]
    pub fn not_allowed<F>(mut self, fallback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.not_allowed = Some(Arc::new(fallback));
        self
    }

    /// Dispatches one request.
    ///
    /// `path` is the raw request path and may carry a query string. Handlers
    /// run synchronously on the calling thread; a panicking handler unwinds
    /// through this call.
    pub fn run(&self, method: &str, path: &str) -> Dispatch {
        let mut dispatch = Dispatch::default();

        let Ok(method) = method.parse::<Method>() else {
            warn!(method, "Unsupported request method");
            self.trigger_not_allowed(&mut dispatch);
            return dispatch;
        };
        let path = resolve_path(path);
        debug!(%method, path = %path, "Dispatching request");

        for hook in self.before_routes.iter().filter(|h| h.applies_to(method)) {
            if let Some(params) = hook.pattern.captures(&path) {
                debug!(pattern = hook.pattern.as_str(), "Before hook matched");
                dispatch.before_invoked += 1;
                self.invoke(&hook.target, &params, &mut dispatch);
            }
        }

        for route in self.routes(method) {
            if let Some(params) = route.pattern.captures(&path) {
                debug!(pattern = route.pattern.as_str(), "Route matched");
                self.invoke(&route.target, &params, &mut dispatch);
                dispatch.routes_matched += 1;
            }
        }

        if dispatch.routes_matched == 0 {
            debug!(%method, path = %path, "No route matched");
            self.trigger_not_found(&mut dispatch);
        }

        dispatch
    }

    fn compile(&self, pattern: &str) -> Pattern {
        Pattern::lenient(&normalize_pattern(&self.base_path, pattern))
    }

    fn push_route(&mut self, method: Method, pattern: Pattern, target: Target) {
        self.routes[method.index()].push(Route { pattern, target });
    }

    fn invoke(&self, target: &Target, params: &Params, dispatch: &mut Dispatch) {
        match target {
            Target::Handler(handler) => handler(params),
            Target::Unbound(name) => {
                warn!(handler = %name, "Matched target is not invokable");
                self.trigger_not_found(dispatch);
            }
        }
    }

    fn trigger_not_found(&self, dispatch: &mut Dispatch) {
        dispatch.status = Some(NOT_FOUND);
        Self::fire(self.not_found.as_ref(), NOT_FOUND);
    }

    fn trigger_not_allowed(&self, dispatch: &mut Dispatch) {
        dispatch.status = Some(METHOD_NOT_ALLOWED);
        Self::fire(self.not_allowed.as_ref(), METHOD_NOT_ALLOWED);
    }

    fn fire(fallback: Option<&Fallback>, status: u16) {
        match fallback {
            Some(fallback) => fallback(),
            None => debug!(status, "No fallback configured"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    type Log = Arc<Mutex<Vec<String>>>;

    fn record(log: &Log, label: &'static str) -> impl Fn(&Params) + Send + Sync + 'static {
        let log = Arc::clone(log);
        move |params: &Params| {
            let args: Vec<&str> = params.iter().map(|p| p.unwrap_or("<none>")).collect();
            log.lock().unwrap().push(format!("{label}({})", args.join(",")));
        }
    }

    fn entries(log: &Log) -> Vec<String> {
        log.lock().unwrap().clone()
    }

    #[test]
    fn test_basic_routing() {
        let log = Log::default();
        let router = Router::new()
            .get("/", record(&log, "home"))
            .get("/user/([0-9]+)", record(&log, "user"));

        let res = router.run("GET", "/user/42");
        assert_eq!(res.status, None);
        assert_eq!(res.routes_matched, 1);
        assert_eq!(entries(&log), vec!["user(42)"]);

        router.run("get", "/");
        assert_eq!(entries(&log), vec!["user(42)", "home()"]);
    }

    #[test]
    fn test_routes_are_per_method() {
        let log = Log::default();
        let router = Router::new()
            .post("/items", record(&log, "create"))
            .put("/items/([0-9]+)", record(&log, "replace"))
            .delete("/items/([0-9]+)", record(&log, "remove"));

        assert!(router.run("GET", "/items").is_not_found());
        router.run("POST", "/items");
        router.run("PUT", "/items/3");
        router.run("DELETE", "/items/4");
        assert_eq!(entries(&log), vec!["create()", "replace(3)", "remove(4)"]);
    }

    #[test]
    fn test_not_found() {
        let log = Log::default();
        let hits = Arc::clone(&log);
        let router = Router::new()
            .get("/", record(&log, "home"))
            .not_found(move || hits.lock().unwrap().push("404".to_string()));

        let res = router.run("GET", "/nonexistent");
        assert_eq!(res.status, Some(404));
        assert_eq!(res.routes_matched, 0);
        assert_eq!(entries(&log), vec!["404"]);
    }

    #[test]
    fn test_method_not_allowed() {
        let log = Log::default();
        let hits = Arc::clone(&log);
        let router = Router::new()
            .get("/", record(&log, "home"))
            .before("GET|PATCH", "/.*", record(&log, "hook"))
            .not_allowed(move || hits.lock().unwrap().push("405".to_string()));

        let res = router.run("PATCH", "/");
        assert!(res.is_method_not_allowed());
        assert_eq!(res.before_invoked, 0);
        assert_eq!(entries(&log), vec!["405"]);
    }

    #[test]
    fn test_unset_fallbacks_are_no_ops() {
        let router = Router::new();
        assert_eq!(router.run("GET", "/").status, Some(404));
        assert_eq!(router.run("OPTIONS", "/").status, Some(405));
    }

    #[test]
    fn test_unsupported_registration_fires_not_allowed() {
        let log = Log::default();
        let hits = Arc::clone(&log);
        let router = Router::new()
            .not_allowed(move || hits.lock().unwrap().push("405".to_string()))
            .register("PATCH", "/items", record(&log, "patch"));

        assert_eq!(entries(&log), vec!["405"]);
        assert!(Method::ALL.iter().all(|m| router.routes(*m).is_empty()));
    }

    #[test]
    fn test_register_rejects_method_list() {
        let log = Log::default();
        let hits = Arc::clone(&log);
        let router = Router::new()
            .not_allowed(move || hits.lock().unwrap().push("405".to_string()))
            .register("GET|POST", "/x", record(&log, "x"));

        assert_eq!(entries(&log), vec!["405"]);
        assert!(Method::ALL.iter().all(|m| router.routes(*m).is_empty()));
    }

    #[test]
    fn test_register_multiple_keeps_methods_before_bad_token() {
        let log = Log::default();
        let router = Router::new().register_multiple("get|POST|head|PUT", "/form", record(&log, "form"));

        assert_eq!(router.routes(Method::Get).len(), 1);
        assert_eq!(router.routes(Method::Post).len(), 1);
        assert!(router.routes(Method::Put).is_empty());
    }

    #[test]
    fn test_unbound_target_is_not_found() {
        let log = Log::default();
        let hits = Arc::clone(&log);
        let router = Router::new()
            .register_target("GET", "/ghost", Target::unbound("missing"))
            .not_found(move || hits.lock().unwrap().push("404".to_string()));

        let res = router.run("GET", "/ghost");
        assert_eq!(res.status, Some(404));
        assert_eq!(res.routes_matched, 1);
        assert_eq!(entries(&log), vec!["404"]);
    }

    #[test]
    fn test_base_path_prefixes_patterns() {
        let log = Log::default();
        let router = Router::with_base("api")
            .get("/users", record(&log, "users"))
            .before("GET", "/users", record(&log, "hook"));

        assert_eq!(router.routes(Method::Get)[0].pattern.as_str(), "/api/users");
        assert_eq!(router.before_routes()[0].pattern.as_str(), "/api/users");
        assert_eq!(router.run("GET", "/api/users/?page=1").routes_matched, 1);
        assert!(router.run("GET", "/users").is_not_found());
        assert_eq!(entries(&log), vec!["hook()", "users()"]);
    }

    #[test]
    fn test_invalid_pattern_never_matches() {
        let log = Log::default();
        let router = Router::new().get("/broken/(", record(&log, "broken"));

        assert!(!router.routes(Method::Get)[0].pattern.is_valid());
        assert!(router.run("GET", "/broken/(").is_not_found());
        assert!(entries(&log).is_empty());
    }

    #[test]
    fn test_router_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Router>();
    }
}
