//! Path configuration for the gateway.
//!
//! Defaults are the fixed relative locations the agency interface has always
//! used. Each one can be overridden from the environment or programmatically.

use std::path::{Path, PathBuf};

pub const CONFIG_FILE_ENV: &str = "AGENCY_CONFIG_FILE";
pub const ISSUE_FINDER_DIR_ENV: &str = "AGENCY_ISSUE_FINDER_DIR";
pub const CONNECTOR_DIR_ENV: &str = "AGENCY_CONNECTOR_DIR";
pub const TEMPLATES_DIR_ENV: &str = "AGENCY_TEMPLATES_DIR";

const DEFAULT_CONFIG_FILE: &str = "../config/agency_data.json";
const DEFAULT_ISSUE_FINDER_DIR: &str = "../agency_issue_finder/agencies";
const DEFAULT_CONNECTOR_DIR: &str = "../agencies";
const DEFAULT_TEMPLATES_DIR: &str = "../templates";

/// Locations of the catalog file and the asset directories.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GatewayConfig {
    /// JSON document with a top-level `agencies` array
    pub config_file: PathBuf,
    /// Directory holding `<acronym>_finder.py`
    pub issue_finder_dir: PathBuf,
    /// Directory holding `<acronym>_connector.py`
    pub connector_dir: PathBuf,
    /// Directory holding `<acronym>_ascii.txt`
    pub templates_dir: PathBuf,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            config_file: PathBuf::from(DEFAULT_CONFIG_FILE),
            issue_finder_dir: PathBuf::from(DEFAULT_ISSUE_FINDER_DIR),
            connector_dir: PathBuf::from(DEFAULT_CONNECTOR_DIR),
            templates_dir: PathBuf::from(DEFAULT_TEMPLATES_DIR),
        }
    }
}

impl GatewayConfig {
    /// Defaults, with any `AGENCY_*` environment variable taking precedence.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. Empty values are ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |key: &str, default: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(default))
        };

        Self {
            config_file: pick(CONFIG_FILE_ENV, DEFAULT_CONFIG_FILE),
            issue_finder_dir: pick(ISSUE_FINDER_DIR_ENV, DEFAULT_ISSUE_FINDER_DIR),
            connector_dir: pick(CONNECTOR_DIR_ENV, DEFAULT_CONNECTOR_DIR),
            templates_dir: pick(TEMPLATES_DIR_ENV, DEFAULT_TEMPLATES_DIR),
        }
    }

    /// Lays out all four locations under one root, the way the agency
    /// interface tree is organised on disk.
    pub fn rooted_at(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            config_file: root.join("config").join("agency_data.json"),
            issue_finder_dir: root.join("agency_issue_finder").join("agencies"),
            connector_dir: root.join("agencies"),
            templates_dir: root.join("templates"),
        }
    }

    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = path.into();
        self
    }

    pub fn with_issue_finder_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.issue_finder_dir = path.into();
        self
    }

    pub fn with_connector_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.connector_dir = path.into();
        self
    }

    pub fn with_templates_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.templates_dir = path.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_match_fixed_relative_layout() {
        let config = GatewayConfig::default();
        assert_eq!(config.config_file, PathBuf::from("../config/agency_data.json"));
        assert_eq!(
            config.issue_finder_dir,
            PathBuf::from("../agency_issue_finder/agencies")
        );
        assert_eq!(config.connector_dir, PathBuf::from("../agencies"));
        assert_eq!(config.templates_dir, PathBuf::from("../templates"));
    }

    #[test]
    fn lookup_overrides_only_set_keys() {
        let vars: HashMap<&str, &str> = [
            (CONFIG_FILE_ENV, "/srv/agency/data.json"),
            (TEMPLATES_DIR_ENV, "   "),
        ]
        .into_iter()
        .collect();

        let config = GatewayConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.config_file, PathBuf::from("/srv/agency/data.json"));
        // Blank values fall back to the default
        assert_eq!(config.templates_dir, PathBuf::from("../templates"));
        assert_eq!(config.connector_dir, PathBuf::from("../agencies"));
    }

    #[test]
    fn rooted_layout_and_builders() {
        let config = GatewayConfig::rooted_at("/opt/agency").with_connector_dir("/tmp/conn");
        assert_eq!(
            config.config_file,
            PathBuf::from("/opt/agency/config/agency_data.json")
        );
        assert_eq!(
            config.issue_finder_dir,
            PathBuf::from("/opt/agency/agency_issue_finder/agencies")
        );
        assert_eq!(config.connector_dir, PathBuf::from("/tmp/conn"));
        assert_eq!(config.templates_dir, PathBuf::from("/opt/agency/templates"));
    }
}
