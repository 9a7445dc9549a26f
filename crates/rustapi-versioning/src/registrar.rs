//! Route group registration
//!
//! At boot every discovered version becomes one route group. The registrar
//! does not talk to routing internals: it hands a [`RouteGroup`] and the
//! version's loaded route file to a [`Router`].
//!
//! # Example
//!
//! ```rust,ignore
//! use rustapi_versioning::{FsRouteFileLoader, RouteRegistrar, RouteTable, VersionDiscovery};
//!
//! let discovery = VersionDiscovery::for_project(".", &config);
//! let loader = FsRouteFileLoader::new(&config.route_file);
//! let mut table = RouteTable::new();
//!
//! RouteRegistrar::new(&config, &discovery, &loader).boot(&mut table)?;
//! ```

use crate::config::VersioningConfig;
use crate::discovery::VersionDiscovery;
use crate::error::{Result, VersioningError};
use crate::resolver::{EffectiveRouteConfig, Resolution, VersionResolver};
use std::path::{Path, PathBuf};

/// A route group request for one version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteGroup {
    /// Version the routes belong to
    pub version: String,
    /// Middleware applied to the group
    pub middleware: Vec<String>,
    /// Controller namespace
    pub namespace: String,
    /// URL prefix segments
    pub prefix: Vec<String>,
    /// Version directory holding the route file
    pub version_path: PathBuf,
    /// Whether this is the default version mounted without its segment
    pub root: bool,
}

impl RouteGroup {
    fn new(version: &str, config: EffectiveRouteConfig, version_path: PathBuf, root: bool) -> Self {
        Self {
            version: version.to_string(),
            middleware: config.middleware,
            namespace: config.namespace,
            prefix: config.prefix,
            version_path,
            root,
        }
    }

    /// Prefix joined into a path (`api/v1`)
    pub fn prefix_path(&self) -> String {
        self.prefix.join("/")
    }
}

/// Route definitions loaded from a version directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteFile {
    /// Location of the file
    pub path: PathBuf,
    /// File contents
    pub source: String,
}

/// Loads the route definitions of a version
pub trait RouteFileLoader {
    /// Load the route file inside `version_path`
    fn load(&self, version: &str, version_path: &Path) -> Result<RouteFile>;
}

/// Reads `<version_path>/<file_name>` from disk
#[derive(Debug, Clone)]
pub struct FsRouteFileLoader {
    file_name: String,
}

impl FsRouteFileLoader {
    /// Loader for route files with the given name
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }
}

impl RouteFileLoader for FsRouteFileLoader {
    fn load(&self, version: &str, version_path: &Path) -> Result<RouteFile> {
        let path = version_path.join(&self.file_name);
        if !path.is_file() {
            return Err(VersioningError::MissingRouteFile {
                version: version.to_string(),
                path,
            });
        }

        let source = std::fs::read_to_string(&path).map_err(|e| VersioningError::io(&path, e))?;
        Ok(RouteFile { path, source })
    }
}

/// Receives route groups from the registrar
pub trait Router {
    /// Register one group with its route definitions
    fn register_group(&mut self, group: RouteGroup, routes: RouteFile);
}

/// A router that records groups in registration order
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    groups: Vec<(RouteGroup, RouteFile)>,
}

impl RouteTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Registered groups in order
    pub fn groups(&self) -> impl Iterator<Item = &RouteGroup> {
        self.groups.iter().map(|(group, _)| group)
    }

    /// Registered groups paired with their route files
    pub fn iter(&self) -> impl Iterator<Item = (&RouteGroup, &RouteFile)> {
        self.groups.iter().map(|(group, routes)| (group, routes))
    }

    /// Number of registered groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether no group was registered
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl Router for RouteTable {
    fn register_group(&mut self, group: RouteGroup, routes: RouteFile) {
        self.groups.push((group, routes));
    }
}

/// What a boot did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootSummary {
    /// Versions registered under their own prefix
    pub registered: Vec<String>,
    /// Versions skipped because they are disabled
    pub disabled: Vec<String>,
    /// Version also mounted at the bare prefix
    pub root: Option<String>,
}

/// Registers every discovered version as a route group
#[derive(Debug)]
pub struct RouteRegistrar<'a, L> {
    config: &'a VersioningConfig,
    discovery: &'a VersionDiscovery,
    loader: &'a L,
}

impl<'a, L: RouteFileLoader> RouteRegistrar<'a, L> {
    /// Create a registrar
    pub fn new(config: &'a VersioningConfig, discovery: &'a VersionDiscovery, loader: &'a L) -> Self {
        Self {
            config,
            discovery,
            loader,
        }
    }

    /// Register all versions with `router`
    ///
    /// Disabled versions are skipped. A version whose route file is missing
    /// does not stop the others; all such failures are returned together as
    /// [`VersioningError::Registration`] once every version was attempted.
    pub fn boot<R: Router>(&self, router: &mut R) -> Result<BootSummary> {
        let mut summary = BootSummary::default();
        if !self.config.enabled {
            tracing::debug!("api versioning disabled");
            return Ok(summary);
        }

        let versions = self.discovery.list()?;
        if versions.is_empty() {
            tracing::debug!("no api versions found");
            return Ok(summary);
        }

        let mut failures = Vec::new();
        let mut failed = Vec::new();

        for version in &versions {
            match self.register(router, version, false) {
                Ok(true) => summary.registered.push(version.clone()),
                Ok(false) => summary.disabled.push(version.clone()),
                Err(e) => {
                    failures.push(e);
                    failed.push(version.as_str());
                }
            }
        }

        if let Some(default) = self.config.default_version() {
            // a version that already failed is reported once
            if versions.iter().any(|v| v == default) && !failed.contains(&default) {
                match self.register(router, default, true) {
                    Ok(true) => summary.root = Some(default.to_string()),
                    Ok(false) => {}
                    Err(e) => failures.push(e),
                }
            }
        }

        if !failures.is_empty() {
            return Err(VersioningError::Registration(failures));
        }

        tracing::info!(
            registered = summary.registered.len(),
            disabled = summary.disabled.len(),
            root = summary.root.as_deref().unwrap_or("-"),
            "api versions registered"
        );
        Ok(summary)
    }

    /// Register one group; `Ok(false)` when the version is disabled
    fn register<R: Router>(&self, router: &mut R, version: &str, as_root: bool) -> Result<bool> {
        let resolved = match VersionResolver::new(self.config).resolve(version, as_root) {
            Resolution::Enabled(resolved) => resolved,
            Resolution::Disabled => {
                tracing::debug!(version, "skipping disabled api version");
                return Ok(false);
            }
        };

        let version_path = self.discovery.version_path(version);
        let routes = self.loader.load(version, &version_path).map_err(|e| {
            tracing::warn!(version, error = %e, "api version not registered");
            e
        })?;

        let group = RouteGroup::new(version, resolved, version_path, as_root);
        tracing::debug!(
            version,
            prefix = %group.prefix_path(),
            namespace = %group.namespace,
            middleware = ?group.middleware,
            "registering api version group"
        );
        router.register_group(group, routes);
        Ok(true)
    }
}
