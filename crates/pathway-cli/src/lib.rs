//! # pathway-cli
//!
//! Loads a JSON route table into a [`pathway_router::Router`] and dispatches
//! requests against it, reporting every handler and fallback invocation.
//! Handlers are named in the route file and simply record their calls, which
//! makes the binary useful for checking what a route table does before
//! wiring real handlers behind it.

pub mod config;
pub mod dispatcher;
pub mod error;

pub use config::{RouteEntry, RouteFile};
pub use dispatcher::{Dispatcher, Invocation, Phase, Summary};
pub use error::{CliError, Result};
