//! Builds a router from a route file and records what a dispatch invokes.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use pathway_router::{Params, Router, Target};
use serde::Serialize;
use tracing::info;

use crate::config::{RouteEntry, RouteFile};

/// The dispatch phase an invocation happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Before,
    Route,
    Fallback,
}

/// One handler or fallback call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invocation {
    pub phase: Phase,
    pub handler: String,
    pub params: Vec<Option<String>>,
}

/// The final line printed after a dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub method: String,
    pub path: String,
    pub status: Option<u16>,
    pub before_invoked: usize,
    pub routes_matched: usize,
}

type Log = Arc<Mutex<Vec<Invocation>>>;

/// A router whose handlers write to a shared invocation log.
pub struct Dispatcher {
    router: Router,
    log: Log,
}

impl Dispatcher {
    /// Registers every entry of `file`.
    ///
    /// `base_override` replaces the file's base path when given.
    pub fn new(file: &RouteFile, base_override: Option<&str>) -> Self {
        let log = Log::default();
        let base = base_override.unwrap_or(&file.base_path);

        let mut router = Router::with_base(base)
            .not_found(fallback(&log, "not_found"))
            .not_allowed(fallback(&log, "not_allowed"));
        for entry in &file.before {
            router = router.before_target(&entry.methods, &entry.pattern, target(&log, Phase::Before, entry));
        }
        for entry in &file.routes {
            router = router.register_multiple_target(
                &entry.methods,
                &entry.pattern,
                target(&log, Phase::Route, entry),
            );
        }

        // Registration-time fallbacks are not part of any dispatch.
        lock(&log).clear();

        Self { router, log }
    }

    /// Returns the underlying router.
    pub const fn router(&self) -> &Router {
        &self.router
    }

    /// Dispatches one request and returns what ran, in order.
    pub fn dispatch(&self, method: &str, path: &str) -> (Vec<Invocation>, Summary) {
        let outcome = self.router.run(method, path);
        let calls = std::mem::take(&mut *lock(&self.log));

        info!(
            method,
            path,
            status = ?outcome.status,
            invocations = calls.len(),
            "Request dispatched"
        );

        let summary = Summary {
            method: method.to_string(),
            path: path.to_string(),
            status: outcome.status,
            before_invoked: outcome.before_invoked,
            routes_matched: outcome.routes_matched,
        };
        (calls, summary)
    }
}

/// Locks the log, keeping calls recorded before a handler panicked.
fn lock(log: &Log) -> MutexGuard<'_, Vec<Invocation>> {
    log.lock().unwrap_or_else(PoisonError::into_inner)
}

fn target(log: &Log, phase: Phase, entry: &RouteEntry) -> Target {
    let Some(name) = entry.handler.clone() else {
        return Target::unbound(entry.pattern.clone());
    };
    let log = Arc::clone(log);
    Target::handler(move |params: &Params| {
        lock(&log).push(Invocation {
            phase,
            handler: name.clone(),
            params: params.as_slice().to_vec(),
        });
    })
}

fn fallback(log: &Log, name: &'static str) -> impl Fn() + Send + Sync + 'static {
    let log = Arc::clone(log);
    move || {
        lock(&log).push(Invocation {
            phase: Phase::Fallback,
            handler: name.to_string(),
            params: Vec::new(),
        });
    }
}
