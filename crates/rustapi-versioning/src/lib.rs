//! # rustapi-versioning
//!
//! Folder-based API versioning for the RustAPI framework.
//!
//! Every directory below the api namespace root (by default `app/Http/Api`)
//! is one version of the api. At boot each version is registered as a route
//! group whose middleware, namespace and URL prefix combine the global
//! settings with the version's own overrides. A default version can be
//! mounted a second time at the bare prefix.
//!
//! ## Features
//!
//! - **Discovery**: versions are read from disk on every boot, no registry
//! - **Per-version settings**: enable/disable, URL prefix and extra middleware
//! - **Default version**: `/api/users` answers like `/api/v1/users`
//! - **Scaffolding**: new versions (`v1`, `v2`, ...) and resources from stubs
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rustapi_versioning::prelude::*;
//!
//! let config = VersioningConfig::load(".", None)?;
//! let discovery = VersionDiscovery::for_project(".", &config);
//! let loader = FsRouteFileLoader::new(&config.route_file);
//!
//! let mut routes = RouteTable::new();
//! let summary = RouteRegistrar::new(&config, &discovery, &loader).boot(&mut routes)?;
//!
//! for group in routes.groups() {
//!     println!("{} -> {}", group.prefix_path(), group.namespace);
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod discovery;
mod error;
pub mod naming;
pub mod registrar;
pub mod resolver;
pub mod scaffold;

pub use config::{VersionOverride, VersioningConfig};
pub use discovery::VersionDiscovery;
pub use error::{Result, VersioningError};
pub use naming::{next_version_name, VersionRequest};
pub use registrar::{
    BootSummary, FsRouteFileLoader, RouteFile, RouteFileLoader, RouteGroup, RouteRegistrar,
    RouteTable, Router,
};
pub use resolver::{EffectiveRouteConfig, Resolution, VersionResolver};
pub use scaffold::{NewVersion, ResourceKind, Scaffolder};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        BootSummary, FsRouteFileLoader, ResourceKind, RouteGroup, RouteRegistrar, RouteTable,
        Router, Scaffolder, VersionDiscovery, VersionOverride, VersionRequest, VersioningConfig,
        VersioningError,
    };
}
