//! Effective route configuration for a version
//!
//! Merges the global settings with a version's overrides. Everything here is
//! a pure function of the configuration; no filesystem access.

use crate::config::VersioningConfig;

/// Separator between namespace segments
pub const NAMESPACE_SEPARATOR: char = '\\';

/// Resource type used for route group namespaces
pub const CONTROLLERS: &str = "Controllers";

/// Routing parameters computed for one version group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveRouteConfig {
    /// Global middleware followed by version middleware
    pub middleware: Vec<String>,
    /// Controller namespace of the version
    pub namespace: String,
    /// URL prefix segments
    pub prefix: Vec<String>,
}

impl EffectiveRouteConfig {
    /// Prefix joined into a path (`api/v1`)
    pub fn prefix_path(&self) -> String {
        self.prefix.join("/")
    }
}

/// Outcome of resolving a version
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The version is registered with these parameters
    Enabled(EffectiveRouteConfig),
    /// The version is switched off in the configuration
    Disabled,
}

impl Resolution {
    /// The effective config, if the version is enabled
    pub fn enabled(self) -> Option<EffectiveRouteConfig> {
        match self {
            Resolution::Enabled(config) => Some(config),
            Resolution::Disabled => None,
        }
    }
}

/// Computes [`EffectiveRouteConfig`]s from a [`VersioningConfig`]
#[derive(Debug, Clone, Copy)]
pub struct VersionResolver<'a> {
    config: &'a VersioningConfig,
}

impl<'a> VersionResolver<'a> {
    /// Create a resolver over a configuration
    pub fn new(config: &'a VersioningConfig) -> Self {
        Self { config }
    }

    /// Resolve the routing parameters of `version`
    ///
    /// With `as_root` the version segment is left out of the prefix so the
    /// group is mounted at the bare global prefix.
    pub fn resolve(&self, version: &str, as_root: bool) -> Resolution {
        let settings = self.config.version(version);
        if settings.is_some_and(|s| !s.is_enabled()) {
            return Resolution::Disabled;
        }

        Resolution::Enabled(EffectiveRouteConfig {
            middleware: self.middleware(version),
            namespace: self.namespace(version, CONTROLLERS),
            prefix: self.prefix(version, as_root),
        })
    }

    /// Global middleware followed by the version's own
    pub fn middleware(&self, version: &str) -> Vec<String> {
        let mut middleware = self.config.middleware.clone();
        if let Some(extra) = self.config.version(version).and_then(|s| s.middleware.as_ref()) {
            middleware.extend(extra.iter().cloned());
        }
        middleware
    }

    /// Namespace of a resource type inside a version (`App\Http\Api\v1\Controllers`)
    ///
    /// An empty resource type yields the version namespace itself.
    pub fn namespace(&self, version: &str, resource: &str) -> String {
        let mut namespace = format!("{}{NAMESPACE_SEPARATOR}{version}", self.config.namespace);
        let resource = capitalize_words(resource);
        if !resource.is_empty() {
            namespace.push(NAMESPACE_SEPARATOR);
            namespace.push_str(&resource);
        }
        namespace
    }

    /// URL prefix segments of a version group
    pub fn prefix(&self, version: &str, as_root: bool) -> Vec<String> {
        let mut prefix = self.config.prefix.clone();
        if as_root {
            return prefix;
        }

        match self
            .config
            .version(version)
            .and_then(|s| s.prefix.as_ref())
            .filter(|p| !p.is_empty())
        {
            Some(segments) => prefix.extend(segments.iter().cloned()),
            None => prefix.push(version.to_string()),
        }
        prefix
    }
}

/// Upper-case the first letter of each whitespace-separated word
pub(crate) fn capitalize_words(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = c.is_whitespace();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VersionOverride;
    use proptest::prelude::*;

    fn enabled(resolution: Resolution) -> EffectiveRouteConfig {
        resolution.enabled().expect("version should be enabled")
    }

    #[test]
    fn test_version_with_override_middleware() {
        let config = VersioningConfig::default()
            .with_prefix("api")
            .with_middleware(["api"])
            .with_version("v1", VersionOverride::default().with_middleware(["api", "test"]));

        let resolved = enabled(VersionResolver::new(&config).resolve("v1", false));
        assert_eq!(resolved.prefix, vec!["api", "v1"]);
        assert_eq!(resolved.middleware, vec!["api", "api", "test"]);
        assert_eq!(resolved.namespace, r"App\Http\Api\v1\Controllers");
        assert_eq!(resolved.prefix_path(), "api/v1");
    }

    #[test]
    fn test_root_mount_drops_version_segment() {
        let config = VersioningConfig::default()
            .with_prefix("api")
            .with_version("v1", VersionOverride::default().with_prefix("legacy"));

        let resolved = enabled(VersionResolver::new(&config).resolve("v1", true));
        assert_eq!(resolved.prefix, vec!["api"]);
        assert_eq!(resolved.namespace, r"App\Http\Api\v1\Controllers");
    }

    #[test]
    fn test_override_prefix_replaces_version_segment() {
        let config = VersioningConfig::default()
            .with_prefix("api")
            .with_version("v2", VersionOverride::default().with_prefix("beta/two"));

        let resolver = VersionResolver::new(&config);
        assert_eq!(resolver.prefix("v2", false), vec!["api", "beta", "two"]);
    }

    #[test]
    fn test_empty_override_prefix_falls_back_to_version() {
        let config = VersioningConfig::default()
            .with_version("v2", VersionOverride::default().with_prefix(""));

        assert_eq!(
            VersionResolver::new(&config).prefix("v2", false),
            vec!["api", "v2"]
        );
    }

    #[test]
    fn test_empty_global_prefix() {
        let config = VersioningConfig::default().with_prefix("");
        let resolver = VersionResolver::new(&config);

        assert_eq!(resolver.prefix("v1", false), vec!["v1"]);
        assert!(resolver.prefix("v1", true).is_empty());
    }

    #[test]
    fn test_disabled_version() {
        let config = VersioningConfig::default().with_version("v1", VersionOverride::disabled());
        let resolver = VersionResolver::new(&config);

        assert_eq!(resolver.resolve("v1", false), Resolution::Disabled);
        assert_eq!(resolver.resolve("v1", true), Resolution::Disabled);
        assert!(matches!(resolver.resolve("v2", false), Resolution::Enabled(_)));
    }

    #[test]
    fn test_explicitly_enabled_version() {
        let config = VersioningConfig::default().with_version(
            "v1",
            VersionOverride {
                enabled: Some(true),
                ..Default::default()
            },
        );

        assert!(matches!(
            VersionResolver::new(&config).resolve("v1", false),
            Resolution::Enabled(_)
        ));
    }

    #[test]
    fn test_namespace_for_resource_types() {
        let config = VersioningConfig::default().with_namespace(r"Acme\Api");
        let resolver = VersionResolver::new(&config);

        assert_eq!(resolver.namespace("v3", "requests"), r"Acme\Api\v3\Requests");
        assert_eq!(resolver.namespace("v3", "Controllers"), r"Acme\Api\v3\Controllers");
        assert_eq!(resolver.namespace("v3", ""), r"Acme\Api\v3");
    }

    #[test]
    fn test_capitalize_words() {
        assert_eq!(capitalize_words("controllers"), "Controllers");
        assert_eq!(capitalize_words("form requests"), "Form Requests");
        assert_eq!(capitalize_words(""), "");
    }

    fn middleware_list() -> impl Strategy<Value = Vec<String>> {
        proptest::collection::vec(prop_oneof!["api", "auth", "test", "[a-z]{1,8}"], 0..6)
    }

    proptest! {
        #[test]
        fn prop_middleware_is_concatenation(global in middleware_list(), extra in middleware_list()) {
            let config = VersioningConfig::default()
                .with_middleware(global.clone())
                .with_version("v1", VersionOverride::default().with_middleware(extra.clone()));

            let resolved = VersionResolver::new(&config).resolve("v1", false).enabled().unwrap();
            let expected: Vec<String> = global.into_iter().chain(extra).collect();
            prop_assert_eq!(resolved.middleware, expected);
        }

        #[test]
        fn prop_prefix_properties(
            version in "[a-z0-9]{1,8}",
            prefix in proptest::collection::vec("[a-z]{1,6}", 0..4),
        ) {
            let config = VersioningConfig::default().with_prefix(&prefix.join("/"));
            let resolver = VersionResolver::new(&config);

            let root = resolver.resolve(&version, true).enabled().unwrap();
            prop_assert_eq!(&root.prefix, &config.prefix);

            let mut expected = config.prefix.clone();
            expected.push(version.clone());
            let nested = resolver.resolve(&version, false).enabled().unwrap();
            prop_assert_eq!(nested.prefix, expected);
        }

        #[test]
        fn prop_resolve_is_idempotent(version in "v[0-9]{1,3}", as_root in any::<bool>()) {
            let config = VersioningConfig::default()
                .with_version("v1", VersionOverride::default().with_prefix("one").with_middleware(["x"]));
            let resolver = VersionResolver::new(&config);

            prop_assert_eq!(resolver.resolve(&version, as_root), resolver.resolve(&version, as_root));
        }
    }
}
