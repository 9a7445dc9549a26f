//! Error types for API versioning

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while discovering, registering or scaffolding API versions
#[derive(Debug, Error)]
pub enum VersioningError {
    /// A version directory has no route file
    #[error("can not find routes file for api version `{version}` at {}", .path.display())]
    MissingRouteFile {
        /// Version whose group could not be registered
        version: String,
        /// Expected location of the route file
        path: PathBuf,
    },

    /// One or more version groups failed to register during boot
    #[error("failed to register {} api version group(s): {}", .0.len(), join_errors(.0))]
    Registration(Vec<VersioningError>),

    /// A version directory could not be created
    #[error("can not create api folder {}: {source}", .path.display())]
    DirectoryCreation {
        /// Directory that was being created
        path: PathBuf,
        /// Underlying filesystem failure
        #[source]
        source: io::Error,
    },

    /// The requested version already exists
    #[error("api version `{0}` already exists")]
    VersionAlreadyExists(String),

    /// The requested version does not exist
    #[error("api version `{0}` does not exist")]
    VersionNotFound(String),

    /// A version name can not be used as a directory name
    #[error("invalid api version name `{0}`")]
    InvalidVersionName(String),

    /// The file a resource would be written to already exists
    #[error("{kind} already exists at {}", .path.display())]
    ResourceAlreadyExists {
        /// Resource kind ("controller", "request")
        kind: &'static str,
        /// Existing file
        path: PathBuf,
    },

    /// A resource type or class name could not be used
    #[error("invalid resource: {0}")]
    InvalidResource(String),

    /// Generic filesystem failure
    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        /// Path being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// The configuration file could not be parsed
    #[error("invalid configuration in {}: {source}", .path.display())]
    ConfigParse {
        /// Config file location
        path: PathBuf,
        /// Parser error
        #[source]
        source: toml::de::Error,
    },

    /// A stub could not be rendered
    #[error("template error: {0}")]
    Template(#[from] tera::Error),
}

impl VersioningError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

fn join_errors(errors: &[VersioningError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type alias for versioning operations
pub type Result<T, E = VersioningError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_message_lists_failures() {
        let err = VersioningError::Registration(vec![
            VersioningError::MissingRouteFile {
                version: "v1".to_string(),
                path: PathBuf::from("app/Http/Api/v1/routes.php"),
            },
            VersioningError::MissingRouteFile {
                version: "v2".to_string(),
                path: PathBuf::from("app/Http/Api/v2/routes.php"),
            },
        ]);

        let message = err.to_string();
        assert!(message.starts_with("failed to register 2 api version group(s)"));
        assert!(message.contains("`v1`"));
        assert!(message.contains("`v2`"));
    }

    #[test]
    fn test_directory_creation_keeps_source() {
        let err = VersioningError::DirectoryCreation {
            path: PathBuf::from("app/Http/Api/v3"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };

        assert!(err.to_string().contains("denied"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
