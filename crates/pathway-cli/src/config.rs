//! Route file loading and validation.
//!
//! A route file is JSON:
//!
//! ```json
//! {
//!   "base_path": "api",
//!   "before": [{ "methods": "GET|POST", "pattern": "/admin/.*", "handler": "auth" }],
//!   "routes": [{ "methods": "GET", "pattern": "/user/([0-9]+)", "handler": "show_user" }]
//! }
//! ```
//!
//! An entry without a handler registers an unbound target, which dispatches
//! as not found.

use std::path::Path;

use pathway_router::{normalize_pattern, split_methods, Method, Pattern};
use serde::Deserialize;

use crate::error::{CliError, Result};

/// One route or before-hook entry.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteEntry {
    /// Pipe-separated method list, e.g. `GET|POST`.
    pub methods: String,
    /// Regex pattern, relative to the base path.
    pub pattern: String,
    /// Handler name, if any.
    #[serde(default)]
    pub handler: Option<String>,
}

/// A parsed route file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteFile {
    /// Prefix applied to every pattern.
    #[serde(default)]
    pub base_path: String,
    /// Before hooks, in dispatch order.
    #[serde(default)]
    pub before: Vec<RouteEntry>,
    /// Method routes, in dispatch order.
    #[serde(default)]
    pub routes: Vec<RouteEntry>,
}

impl RouteFile {
    /// Parses a route file from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a route file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Checks every method token and pattern up front.
    ///
    /// The router itself tolerates both kinds of mistake at registration
    /// time, so this is the place to reject them loudly.
    pub fn validate(&self) -> Result<()> {
        let sections = [("before", &self.before), ("routes", &self.routes)];
        for (section, entries) in sections {
            for (index, entry) in entries.iter().enumerate() {
                let invalid = |source| CliError::InvalidEntry {
                    section,
                    index,
                    source,
                };
                for token in split_methods(&entry.methods) {
                    token.parse::<Method>().map_err(invalid)?;
                }
                Pattern::new(&normalize_pattern(&self.base_path, &entry.pattern))
                    .map_err(invalid)?;
            }
        }
        Ok(())
    }

    /// Number of entries across both sections.
    pub fn len(&self) -> usize {
        self.before.len() + self.routes.len()
    }

    /// Returns `true` if the file declares no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROUTES: &str = r#"{
        "base_path": "api",
        "before": [{ "methods": "GET|POST", "pattern": "/admin/.*", "handler": "auth" }],
        "routes": [
            { "methods": "GET", "pattern": "/user/([0-9]+)", "handler": "show_user" },
            { "methods": "delete", "pattern": "/user/([0-9]+)" }
        ]
    }"#;

    #[test]
    fn test_parse_route_file() {
        let file = RouteFile::from_json(ROUTES).unwrap();
        assert_eq!(file.base_path, "api");
        assert_eq!(file.before.len(), 1);
        assert_eq!(file.routes[0].handler.as_deref(), Some("show_user"));
        assert_eq!(file.routes[1].handler, None);
        assert_eq!(file.len(), 3);
        file.validate().unwrap();
    }

    #[test]
    fn test_empty_file_defaults() {
        let file = RouteFile::from_json("{}").unwrap();
        assert!(file.is_empty());
        assert_eq!(file.base_path, "");
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let err = RouteFile::from_json(r#"{ "route": [] }"#).unwrap_err();
        assert!(matches!(err, CliError::Parse(_)));
    }

    #[test]
    fn test_validate_rejects_bad_method() {
        let file = RouteFile::from_json(
            r#"{ "routes": [
                { "methods": "GET", "pattern": "/" },
                { "methods": "GET|PATCH", "pattern": "/x" }
            ] }"#,
        )
        .unwrap();
        let err = file.validate().unwrap_err();
        assert!(matches!(
            err,
            CliError::InvalidEntry { section: "routes", index: 1, .. }
        ));
    }

    #[test]
    fn test_validate_rejects_bad_pattern() {
        let file = RouteFile::from_json(
            r#"{ "before": [{ "methods": "GET", "pattern": "/x/(" }] }"#,
        )
        .unwrap();
        let err = file.validate().unwrap_err();
        assert!(matches!(
            err,
            CliError::InvalidEntry { section: "before", index: 0, .. }
        ));
    }

    #[test]
    fn test_demo_routes_are_valid() {
        let file = RouteFile::from_json(include_str!("../demos/routes.json")).unwrap();
        file.validate().unwrap();
        assert_eq!(file.routes.len(), 7);
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("routes.json");
        std::fs::write(&path, ROUTES).unwrap();
        assert_eq!(RouteFile::load(&path).unwrap().routes.len(), 2);

        let err = RouteFile::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));
    }
}
