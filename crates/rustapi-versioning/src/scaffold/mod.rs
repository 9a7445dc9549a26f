//! Scaffolding of versions and resources
//!
//! - [`Scaffolder::new_version`] creates a version directory with its base
//!   controller, base request and route file.
//! - [`Scaffolder::make_resource`] adds a controller or request class to an
//!   existing version.
//!
//! Directory creation is not atomic: a failure part-way leaves the
//! directories created so far in place. Concurrent invocations on the same
//! project are not coordinated.

mod stub;

pub use stub::{render, Stub, StubSet};

use crate::config::VersioningConfig;
use crate::discovery::VersionDiscovery;
use crate::error::{Result, VersioningError};
use crate::naming::VersionRequest;
use crate::resolver::{VersionResolver, NAMESPACE_SEPARATOR};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Kind of class generated by `api:make`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// Controller class
    Controller,
    /// Form request class
    Request,
}

impl ResourceKind {
    /// Lower-case name
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Controller => "controller",
            ResourceKind::Request => "request",
        }
    }

    /// Directory and namespace segment holding this kind
    pub fn directory(self) -> &'static str {
        match self {
            ResourceKind::Controller => "Controllers",
            ResourceKind::Request => "Requests",
        }
    }

    /// Base class every generated class extends
    pub fn parent_class(self) -> &'static str {
        match self {
            ResourceKind::Controller => "ApiController",
            ResourceKind::Request => "ApiRequest",
        }
    }

    fn parent_stub(self) -> Stub {
        match self {
            ResourceKind::Controller => Stub::ControllerParent,
            ResourceKind::Request => Stub::RequestParent,
        }
    }

    fn stub(self, resource: bool) -> Stub {
        match (self, resource) {
            (ResourceKind::Request, _) => Stub::Request,
            (ResourceKind::Controller, true) => Stub::Controller,
            (ResourceKind::Controller, false) => Stub::ControllerPlain,
        }
    }
}

impl FromStr for ResourceKind {
    type Err = VersioningError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "controller" => Ok(ResourceKind::Controller),
            "request" => Ok(ResourceKind::Request),
            other => Err(VersioningError::InvalidResource(format!(
                "unknown resource type `{other}`, expected `controller` or `request`"
            ))),
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A freshly created version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVersion {
    /// Version name
    pub name: String,
    /// Version directory
    pub path: PathBuf,
    /// Files written inside the directory
    pub files: Vec<PathBuf>,
}

/// Creates versions and resources from stubs
#[derive(Debug)]
pub struct Scaffolder<'a> {
    config: &'a VersioningConfig,
    discovery: &'a VersionDiscovery,
    stubs: StubSet,
}

impl<'a> Scaffolder<'a> {
    /// Scaffolder using the stub directory from the configuration
    pub fn new(config: &'a VersioningConfig, discovery: &'a VersionDiscovery) -> Self {
        Self {
            config,
            discovery,
            stubs: StubSet::new(config.stubs.clone()),
        }
    }

    /// Create a new version
    ///
    /// Fails when a version with the requested name already exists.
    pub fn new_version(&self, request: &VersionRequest) -> Result<NewVersion> {
        let requested = request.to_string();
        if self.discovery.exists(&requested)? {
            return Err(VersioningError::VersionAlreadyExists(requested));
        }

        let name = request.resolve(&self.discovery.names()?);
        validate_version_name(&name)?;

        let path = self.discovery.version_path(&name);
        create_dir(&path)?;

        let resolver = VersionResolver::new(self.config);
        let mut files = Vec::new();

        for kind in [ResourceKind::Controller, ResourceKind::Request] {
            let dir = path.join(kind.directory());
            create_dir(&dir)?;

            let values = placeholders(
                resolver.namespace(&name, kind.directory()),
                resolver.namespace(&name, kind.directory()),
                resolver.namespace(&name, ""),
                kind.parent_class(),
                &name,
            );
            let file = dir.join(self.file_name(kind.parent_class()));
            write(&file, &self.stubs.render(kind.parent_stub(), &values)?)?;
            files.push(file);
        }

        let values = placeholders(
            resolver.namespace(&name, ResourceKind::Controller.directory()),
            resolver.namespace(&name, ResourceKind::Controller.directory()),
            resolver.namespace(&name, ""),
            "",
            &name,
        );
        let routes = path.join(&self.config.route_file);
        write(&routes, &self.stubs.render(Stub::Routes, &values)?)?;
        files.push(routes);

        tracing::info!(version = %name, path = %path.display(), "created api version");
        Ok(NewVersion { name, path, files })
    }

    /// Generate a controller or request class inside an existing version
    ///
    /// `name` may contain `/` or `\` to place the class in a sub-namespace.
    /// Returns the path of the written file.
    pub fn make_resource(
        &self,
        kind: ResourceKind,
        name: &str,
        version: &str,
        resource: bool,
    ) -> Result<PathBuf> {
        if !self.discovery.exists(version)? {
            return Err(VersioningError::VersionNotFound(version.to_string()));
        }

        let (segments, class) = split_class_name(name)?;

        let resolver = VersionResolver::new(self.config);
        let base_namespace = resolver.namespace(version, kind.directory());
        let namespace = segments.iter().fold(base_namespace.clone(), |mut ns, segment| {
            ns.push(NAMESPACE_SEPARATOR);
            ns.push_str(segment);
            ns
        });

        let dir = segments
            .iter()
            .fold(self.discovery.version_path(version).join(kind.directory()), |p, s| p.join(s));
        let file = dir.join(self.file_name(class));
        if file.exists() {
            return Err(VersioningError::ResourceAlreadyExists {
                kind: kind.as_str(),
                path: file,
            });
        }

        let values = placeholders(
            namespace,
            base_namespace,
            resolver.namespace(version, ""),
            class,
            version,
        );
        let content = self.stubs.render(kind.stub(resource), &values)?;

        std::fs::create_dir_all(&dir).map_err(|source| VersioningError::DirectoryCreation {
            path: dir.clone(),
            source,
        })?;
        write(&file, &content)?;

        tracing::info!(%kind, version, path = %file.display(), "created api resource");
        Ok(file)
    }

    fn file_name(&self, class: &str) -> String {
        format!("{class}.{}", self.config.extension)
    }
}

fn placeholders(
    namespace: String,
    base_namespace: String,
    root_namespace: String,
    class: &str,
    version: &str,
) -> BTreeMap<&'static str, String> {
    BTreeMap::from([
        ("namespace", namespace),
        ("base_namespace", base_namespace),
        ("root_namespace", root_namespace),
        ("class", class.to_string()),
        ("version", version.to_string()),
    ])
}

/// Split `Admin/UserController` into its sub-namespace and class name
fn split_class_name(name: &str) -> Result<(Vec<&str>, &str)> {
    let mut segments: Vec<&str> = name
        .trim()
        .split(['/', NAMESPACE_SEPARATOR])
        .filter(|s| !s.is_empty())
        .collect();

    if let Some(bad) = segments.iter().find(|s| !is_identifier(s)) {
        return Err(VersioningError::InvalidResource(format!(
            "`{bad}` is not a valid class name segment"
        )));
    }

    let class = segments
        .pop()
        .ok_or_else(|| VersioningError::InvalidResource("class name is empty".to_string()))?;
    Ok((segments, class))
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}

fn validate_version_name(name: &str) -> Result<()> {
    if name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', NAMESPACE_SEPARATOR])
    {
        return Err(VersioningError::InvalidVersionName(name.to_string()));
    }
    Ok(())
}

fn create_dir(path: &Path) -> Result<()> {
    std::fs::create_dir(path).map_err(|source| VersioningError::DirectoryCreation {
        path: path.to_path_buf(),
        source,
    })
}

fn write(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).map_err(|e| VersioningError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_kind_parsing() {
        assert_eq!("controller".parse::<ResourceKind>().unwrap(), ResourceKind::Controller);
        assert_eq!(" Request ".parse::<ResourceKind>().unwrap(), ResourceKind::Request);
        assert_eq!("CONTROLLER".parse::<ResourceKind>().unwrap(), ResourceKind::Controller);
        assert!("model".parse::<ResourceKind>().is_err());
    }

    #[test]
    fn test_resource_kind_stub_selection() {
        assert_eq!(ResourceKind::Controller.stub(true), Stub::Controller);
        assert_eq!(ResourceKind::Controller.stub(false), Stub::ControllerPlain);
        assert_eq!(ResourceKind::Request.stub(true), Stub::Request);
        assert_eq!(ResourceKind::Request.stub(false), Stub::Request);
    }

    #[test]
    fn test_split_class_name() {
        assert_eq!(split_class_name("UserController").unwrap(), (vec![], "UserController"));
        assert_eq!(
            split_class_name(" Admin/UserController ").unwrap(),
            (vec!["Admin"], "UserController")
        );
        assert_eq!(
            split_class_name(r"Admin\Billing\InvoiceRequest").unwrap(),
            (vec!["Admin", "Billing"], "InvoiceRequest")
        );
        assert!(split_class_name("").is_err());
        assert!(split_class_name("  /  ").is_err());
        assert!(split_class_name("../User").is_err());
        assert!(split_class_name("9Lives").is_err());
    }

    #[test]
    fn test_validate_version_name() {
        assert!(validate_version_name("v1").is_ok());
        assert!(validate_version_name("beta").is_ok());
        assert!(validate_version_name("").is_err());
        assert!(validate_version_name("..").is_err());
        assert!(validate_version_name("a/b").is_err());
        assert!(validate_version_name(r"a\b").is_err());
    }
}
