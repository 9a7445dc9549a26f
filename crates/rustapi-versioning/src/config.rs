//! Versioning configuration
//!
//! Configuration is read from a TOML file (by default `config/api.toml`
//! relative to the project base). Every option is optional; a missing file
//! yields [`VersioningConfig::default`].
//!
//! ```toml
//! enabled = true
//! namespace = 'App\Http\Api'
//! prefix = "api"
//! middleware = ["api", "throttle"]
//! default_version = "v1"
//!
//! [versions.v1]
//! prefix = "legacy"
//! middleware = "deprecated"
//!
//! [versions.v3]
//! enabled = false
//! ```

use crate::error::{Result, VersioningError};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Default config file location, relative to the project base
pub const DEFAULT_CONFIG_PATH: &str = "config/api.toml";

/// Commented configuration file written by `api:publish`
pub const CONFIG_TEMPLATE: &str = include_str!("../config/api.toml");

/// Global API versioning configuration
///
/// Loaded once at startup and passed by reference to every component.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct VersioningConfig {
    /// Whether versioned routes are registered at all
    pub enabled: bool,
    /// Root namespace of the versioned API (e.g. `App\Http\Api`)
    pub namespace: String,
    /// Global URL prefix segments
    #[serde(deserialize_with = "segments")]
    pub prefix: Vec<String>,
    /// Middleware applied to every version
    #[serde(deserialize_with = "list")]
    pub middleware: Vec<String>,
    /// Per-version overrides keyed by version directory name
    pub versions: BTreeMap<String, VersionOverride>,
    /// Version additionally mounted at the bare prefix
    pub default_version: Option<String>,
    /// Name of the route file inside each version directory
    pub route_file: String,
    /// Extension of scaffolded source files
    pub extension: String,
    /// Directory of user stubs overriding the built-in ones
    pub stubs: Option<PathBuf>,
}

impl Default for VersioningConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            namespace: r"App\Http\Api".to_string(),
            prefix: vec!["api".to_string()],
            middleware: vec!["api".to_string()],
            versions: BTreeMap::new(),
            default_version: None,
            route_file: "routes.php".to_string(),
            extension: "php".to_string(),
            stubs: None,
        }
    }
}

impl VersioningConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Read and parse a configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| VersioningError::io(path, e))?;

        Self::from_toml_str(&content).map_err(|source| VersioningError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the configuration for a project
    ///
    /// An explicit path must exist. Without one, `config/api.toml` under
    /// `base` is used when present and defaults otherwise.
    pub fn load(base: impl AsRef<Path>, explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let path = base.as_ref().join(DEFAULT_CONFIG_PATH);
        if path.is_file() {
            tracing::debug!(path = %path.display(), "loading api versioning config");
            Self::from_file(&path)
        } else {
            tracing::debug!(path = %path.display(), "no api versioning config, using defaults");
            Ok(Self::default())
        }
    }

    /// Set the global URL prefix from a `/`-separated path
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = split_segments(prefix);
        self
    }

    /// Set the global middleware list
    pub fn with_middleware<I, S>(mut self, middleware: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.middleware = middleware.into_iter().map(Into::into).collect();
        self
    }

    /// Set the root namespace
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Add an override for a version
    pub fn with_version(mut self, name: impl Into<String>, settings: VersionOverride) -> Self {
        self.versions.insert(name.into(), settings);
        self
    }

    /// Set the default version
    pub fn with_default_version(mut self, version: impl Into<String>) -> Self {
        self.default_version = Some(version.into());
        self
    }

    /// Disable versioned routing entirely
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Override settings for a version, if any
    pub fn version(&self, name: &str) -> Option<&VersionOverride> {
        self.versions.get(name)
    }

    /// Default version, ignoring empty values
    pub fn default_version(&self) -> Option<&str> {
        self.default_version.as_deref().filter(|v| !v.is_empty())
    }
}

/// Per-version settings
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct VersionOverride {
    /// `Some(false)` disables the version; absent means enabled
    pub enabled: Option<bool>,
    /// Version URL segments replacing the version name
    #[serde(deserialize_with = "optional_segments")]
    pub prefix: Option<Vec<String>>,
    /// Middleware appended after the global middleware
    #[serde(deserialize_with = "optional_list")]
    pub middleware: Option<Vec<String>>,
}

impl VersionOverride {
    /// Settings that disable a version
    pub fn disabled() -> Self {
        Self {
            enabled: Some(false),
            ..Default::default()
        }
    }

    /// Set the version prefix from a `/`-separated path
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = Some(split_segments(prefix));
        self
    }

    /// Set version-specific middleware
    pub fn with_middleware<I, S>(mut self, middleware: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.middleware = Some(middleware.into_iter().map(Into::into).collect());
        self
    }

    /// Whether the version should be registered
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }
}

/// Split a `/`-separated path into its non-empty segments
pub fn split_segments(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// A value given either as a single string or as an array of strings
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    fn into_list(self) -> Vec<String> {
        let items = match self {
            OneOrMany::One(s) => vec![s],
            OneOrMany::Many(v) => v,
        };
        items.into_iter().filter(|s| !s.is_empty()).collect()
    }

    fn into_segments(self) -> Vec<String> {
        self.into_list()
            .iter()
            .flat_map(|s| split_segments(s))
            .collect()
    }
}

fn list<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Vec<String>, D::Error> {
    OneOrMany::deserialize(d).map(OneOrMany::into_list)
}

fn segments<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Vec<String>, D::Error> {
    OneOrMany::deserialize(d).map(OneOrMany::into_segments)
}

fn optional_list<'de, D: Deserializer<'de>>(
    d: D,
) -> std::result::Result<Option<Vec<String>>, D::Error> {
    Ok(Option::<OneOrMany>::deserialize(d)?.map(OneOrMany::into_list))
}

fn optional_segments<'de, D: Deserializer<'de>>(
    d: D,
) -> std::result::Result<Option<Vec<String>>, D::Error> {
    Ok(Option::<OneOrMany>::deserialize(d)?.map(OneOrMany::into_segments))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = VersioningConfig::from_toml_str("").unwrap();
        assert_eq!(config, VersioningConfig::default());
        assert!(config.enabled);
        assert_eq!(config.prefix, vec!["api"]);
        assert_eq!(config.middleware, vec!["api"]);
        assert_eq!(config.route_file, "routes.php");
    }

    #[test]
    fn test_published_template_matches_defaults() {
        let config = VersioningConfig::from_toml_str(CONFIG_TEMPLATE).unwrap();
        assert_eq!(config, VersioningConfig::default());
    }

    #[test]
    fn test_middleware_string_or_array() {
        let config = VersioningConfig::from_toml_str(
            r#"
middleware = "auth"

[versions.v1]
middleware = "deprecated"

[versions.v2]
middleware = ["api", "test"]
"#,
        )
        .unwrap();

        assert_eq!(config.middleware, vec!["auth"]);
        assert_eq!(
            config.version("v1").unwrap().middleware,
            Some(vec!["deprecated".to_string()])
        );
        assert_eq!(
            config.version("v2").unwrap().middleware,
            Some(vec!["api".to_string(), "test".to_string()])
        );
    }

    #[test]
    fn test_empty_middleware_names_are_dropped() {
        let config = VersioningConfig::from_toml_str(
            r#"
middleware = ""

[versions.v1]
middleware = ["", "throttle"]

[versions.v2]
middleware = ""
"#,
        )
        .unwrap();

        assert!(config.middleware.is_empty());
        assert_eq!(
            config.version("v1").unwrap().middleware,
            Some(vec!["throttle".to_string()])
        );
        assert_eq!(config.version("v2").unwrap().middleware, Some(vec![]));
    }

    #[test]
    fn test_prefix_is_split_into_segments() {
        let config = VersioningConfig::from_toml_str(
            r#"
prefix = "/services/api/"

[versions.v2]
prefix = "beta/v2"
"#,
        )
        .unwrap();

        assert_eq!(config.prefix, vec!["services", "api"]);
        assert_eq!(
            config.version("v2").unwrap().prefix,
            Some(vec!["beta".to_string(), "v2".to_string()])
        );
    }

    #[test]
    fn test_version_override_defaults_to_enabled() {
        let config = VersioningConfig::from_toml_str(
            r#"
[versions.v1]
prefix = "one"

[versions.v2]
enabled = false
"#,
        )
        .unwrap();

        let v1 = config.version("v1").unwrap();
        assert!(v1.is_enabled());
        assert_eq!(v1.middleware, None);
        assert!(!config.version("v2").unwrap().is_enabled());
    }

    #[test]
    fn test_empty_default_version_is_ignored() {
        let config = VersioningConfig::from_toml_str(r#"default_version = """#).unwrap();
        assert_eq!(config.default_version(), None);

        let config = VersioningConfig::default().with_default_version("v1");
        assert_eq!(config.default_version(), Some("v1"));
    }

    #[test]
    fn test_load_without_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = VersioningConfig::load(dir.path(), None).unwrap();
        assert_eq!(config, VersioningConfig::default());
    }

    #[test]
    fn test_load_reads_project_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("config")).unwrap();
        std::fs::write(
            dir.path().join(DEFAULT_CONFIG_PATH),
            "enabled = false\nprefix = \"v\"\n",
        )
        .unwrap();

        let config = VersioningConfig::load(dir.path(), None).unwrap();
        assert!(!config.enabled);
        assert_eq!(config.prefix, vec!["v"]);
    }

    #[test]
    fn test_load_explicit_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = VersioningConfig::load(dir.path(), Some(&missing)).unwrap_err();
        assert!(matches!(err, VersioningError::Io { .. }));
    }

    #[test]
    fn test_invalid_toml_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api.toml");
        std::fs::write(&path, "enabled = \"yes\"").unwrap();

        let err = VersioningConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, VersioningError::ConfigParse { .. }));
        assert!(err.to_string().contains("api.toml"));
    }
}
