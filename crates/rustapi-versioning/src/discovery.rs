//! Version directory discovery

use crate::config::VersioningConfig;
use crate::error::{Result, VersioningError};
use crate::resolver::NAMESPACE_SEPARATOR;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Map a namespace to its directory under `base` (`App\Http\Api` → `app/Http/Api`)
pub fn namespace_dir(base: impl AsRef<Path>, namespace: &str) -> PathBuf {
    namespace
        .split(NAMESPACE_SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .fold(base.as_ref().to_path_buf(), |path, segment| {
            path.join(if segment == "App" { "app" } else { segment })
        })
}

/// Lists version directories under the api namespace root
///
/// Nothing is cached: every call reads the current state of the disk.
#[derive(Debug, Clone)]
pub struct VersionDiscovery {
    root: PathBuf,
}

impl VersionDiscovery {
    /// Discovery rooted at an explicit directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Discovery for the configured namespace of a project
    pub fn for_project(base: impl AsRef<Path>, config: &VersioningConfig) -> Self {
        Self::new(namespace_dir(base, &config.namespace))
    }

    /// Namespace root, created empty when missing
    pub fn namespace_path(&self) -> Result<&Path> {
        if !self.root.exists() {
            tracing::debug!(path = %self.root.display(), "creating api namespace directory");
            std::fs::create_dir_all(&self.root).map_err(|source| {
                VersioningError::DirectoryCreation {
                    path: self.root.clone(),
                    source,
                }
            })?;
        }
        Ok(&self.root)
    }

    /// Directory of a version
    pub fn version_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Names of all version directories, ordered by name
    pub fn list(&self) -> Result<Vec<String>> {
        let root = self.namespace_path()?;

        let mut versions = Vec::new();
        for entry in WalkDir::new(root)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(root).to_path_buf();
                VersioningError::io(path, e.into())
            })?;

            // symlinked versions count, so check the target
            if entry.path().is_dir() {
                versions.push(entry.file_name().to_string_lossy().into_owned());
            }
        }

        Ok(versions)
    }

    /// Version names as a set, for name generation
    pub fn names(&self) -> Result<BTreeSet<String>> {
        Ok(self.list()?.into_iter().collect())
    }

    /// Whether a version directory exists
    pub fn exists(&self, name: &str) -> Result<bool> {
        Ok(self.list()?.iter().any(|v| v == name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_namespace_dir_maps_app() {
        let dir = namespace_dir("/srv/project", r"App\Http\Api");
        assert_eq!(dir, PathBuf::from("/srv/project/app/Http/Api"));

        let dir = namespace_dir("base", r"Acme\Api\");
        assert_eq!(dir, PathBuf::from("base/Acme/Api"));
    }

    #[test]
    fn test_missing_root_is_created() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("app/Http/Api");
        let discovery = VersionDiscovery::new(&root);

        assert!(discovery.list().unwrap().is_empty());
        assert!(root.is_dir());
    }

    #[test]
    fn test_lists_only_directories_by_name() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("v2")).unwrap();
        fs::create_dir(tmp.path().join("v1")).unwrap();
        fs::create_dir(tmp.path().join("custom")).unwrap();
        fs::create_dir_all(tmp.path().join("v1/Controllers")).unwrap();
        fs::write(tmp.path().join("v3"), "not a directory").unwrap();

        let discovery = VersionDiscovery::new(tmp.path());
        assert_eq!(discovery.list().unwrap(), vec!["custom", "v1", "v2"]);
        assert!(discovery.exists("v1").unwrap());
        assert!(!discovery.exists("v3").unwrap());
        assert!(!discovery.exists("Controllers").unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_version_is_listed() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("v1")).unwrap();
        std::os::unix::fs::symlink(tmp.path().join("v1"), tmp.path().join("v2")).unwrap();
        std::os::unix::fs::symlink(tmp.path().join("gone"), tmp.path().join("v3")).unwrap();

        let discovery = VersionDiscovery::new(tmp.path());
        assert_eq!(discovery.list().unwrap(), vec!["v1", "v2"]);
        assert!(discovery.exists("v2").unwrap());
    }

    #[test]
    fn test_reflects_current_disk_state() {
        let tmp = tempfile::tempdir().unwrap();
        let discovery = VersionDiscovery::new(tmp.path());
        assert!(!discovery.exists("v1").unwrap());

        fs::create_dir(tmp.path().join("v1")).unwrap();
        assert!(discovery.exists("v1").unwrap());
    }

    #[test]
    fn test_for_project_uses_config_namespace() {
        let tmp = tempfile::tempdir().unwrap();
        let config = VersioningConfig::default();
        let discovery = VersionDiscovery::for_project(tmp.path(), &config);

        assert_eq!(discovery.version_path("v1"), tmp.path().join("app/Http/Api/v1"));
    }
}
