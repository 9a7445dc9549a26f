//! Version name generation
//!
//! New versions are named `v<n>` where `n` is one more than the number of
//! sibling directories that already carry a version-shaped name. When that
//! name is taken (non-sequential or hand-made directories) the number is
//! bumped until a free name is found. The result is the lowest count-based
//! candidate, not necessarily the lowest free slot.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Sentinel requesting an automatically generated version name
pub const NEXT: &str = "NEXT";

/// Version requested by the user when creating a new version
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum VersionRequest {
    /// Generate the next free `v<n>` name
    #[default]
    Next,
    /// Use this exact name
    Named(String),
}

impl VersionRequest {
    /// Resolve the request to a concrete version name
    pub fn resolve(&self, existing: &BTreeSet<String>) -> String {
        match self {
            VersionRequest::Next => next_version_name(existing),
            VersionRequest::Named(name) => name.clone(),
        }
    }
}

impl FromStr for VersionRequest {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s == NEXT {
            VersionRequest::Next
        } else {
            VersionRequest::Named(s.to_string())
        })
    }
}

impl fmt::Display for VersionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionRequest::Next => f.write_str(NEXT),
            VersionRequest::Named(name) => f.write_str(name),
        }
    }
}

/// Whether a directory name looks like a generated version (`v` followed only by digits)
pub fn is_valid_version(name: &str) -> bool {
    name.strip_prefix('v')
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

/// Numeric part of a version-shaped name, if it fits in a `u64`
pub fn version_number(name: &str) -> Option<u64> {
    if !is_valid_version(name) {
        return None;
    }
    name[1..].parse().ok()
}

/// Compute the next unused version name
pub fn next_version_name(existing: &BTreeSet<String>) -> String {
    let valid = existing.iter().filter(|n| is_valid_version(n)).count() as u64;
    let mut number = valid + 1;

    // every retry skips one taken name, so |existing| retries always suffice
    for _ in 0..existing.len() {
        if !existing.contains(&format!("v{number}")) {
            break;
        }
        number += 1;
    }

    format!("v{number}")
}
