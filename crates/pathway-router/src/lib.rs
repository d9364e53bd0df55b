//! # pathway-router
//!
//! A small HTTP request router driven by regular-expression patterns.
//!
//! This crate provides:
//! - Per-method route tables for GET, POST, PUT and DELETE
//! - Anchored regex patterns with positional captures
//! - Before hooks that run ahead of the method routes
//! - Configurable 404 and 405 fallbacks
//! - An optional base path shared by every pattern
//!
//! ## Quick Start
//!
//! ```
//! use pathway_router::Router;
//!
//! let router = Router::new()
//!     .get("/", |_| println!("home"))
//!     .get("/user/([0-9]+)", |params| {
//!         println!("user {}", params.get(0).unwrap_or("?"));
//!     })
//!     .not_found(|| println!("nothing here"));
//!
//! let outcome = router.run("GET", "/user/42?tab=posts");
//! assert_eq!(outcome.routes_matched, 1);
//! assert_eq!(outcome.status, None);
//! ```
//!
//! ## Patterns
//!
//! A pattern is a regex fragment matched against the whole path. Each
//! capture group becomes one positional parameter, and a group that did
//! not participate in the match is `None`:
//!
//! ```
//! use pathway_router::Pattern;
//!
//! let pattern = Pattern::new("/post/([0-9]+)?/(comment)?").unwrap();
//! let params = pattern.captures("/post//comment").unwrap();
//! assert_eq!(params.get(0), None);
//! assert_eq!(params.get(1), Some("comment"));
//! ```
//!
//! ## Dispatch
//!
//! Every matching route runs, in registration order. There is no
//! first-match-wins rule:
//!
//! ```
//! use std::sync::{Arc, Mutex};
//! use pathway_router::Router;
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let (a, b) = (Arc::clone(&seen), Arc::clone(&seen));
//! let router = Router::new()
//!     .get("/a/(.*)", move |_| a.lock().unwrap().push("wildcard"))
//!     .get("/a/b", move |_| b.lock().unwrap().push("exact"));
//!
//! router.run("GET", "/a/b");
//! assert_eq!(*seen.lock().unwrap(), vec!["wildcard", "exact"]);
//! ```
//!
//! ## Before Hooks
//!
//! ```
//! use pathway_router::Router;
//!
//! let router = Router::new()
//!     .before("GET|POST", "/admin/.*", |_| println!("check session"))
//!     .get("/admin/dashboard", |_| println!("dashboard"));
//!
//! let outcome = router.run("GET", "/admin/dashboard");
//! assert_eq!(outcome.before_invoked, 1);
//! ```

mod error;
mod middleware;
mod path;
mod request;
mod response;
mod router;

pub use error::{Result, RouterError};
pub use middleware::BeforeRoute;
pub use path::{normalize_pattern, resolve_path, Pattern};
pub use request::{split_methods, Method, Params};
pub use response::{Dispatch, METHOD_NOT_ALLOWED, NOT_FOUND};
pub use router::{Fallback, Handler, Route, Router, Target};
