//! Stub templates
//!
//! Built-in stubs are compiled in; a stub directory can override any of them
//! by file name. Placeholders use Tera syntax (`{{ namespace }}`).

use crate::error::{Result, VersioningError};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tera::{Context, Tera};

/// A scaffolding template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stub {
    /// Base controller of a version
    ControllerParent,
    /// Base request of a version
    RequestParent,
    /// Route file of a version
    Routes,
    /// Resource controller
    Controller,
    /// Empty controller
    ControllerPlain,
    /// Form request
    Request,
}

impl Stub {
    /// File name used when looking up overrides
    pub fn file_name(self) -> &'static str {
        match self {
            Stub::ControllerParent => "controller.parent.stub",
            Stub::RequestParent => "request.parent.stub",
            Stub::Routes => "routes.stub",
            Stub::Controller => "controller.stub",
            Stub::ControllerPlain => "controller.plain.stub",
            Stub::Request => "request.stub",
        }
    }

    /// Compiled-in template
    pub fn builtin(self) -> &'static str {
        match self {
            Stub::ControllerParent => include_str!("../../stubs/controller.parent.stub"),
            Stub::RequestParent => include_str!("../../stubs/request.parent.stub"),
            Stub::Routes => include_str!("../../stubs/routes.stub"),
            Stub::Controller => include_str!("../../stubs/controller.stub"),
            Stub::ControllerPlain => include_str!("../../stubs/controller.plain.stub"),
            Stub::Request => include_str!("../../stubs/request.stub"),
        }
    }
}

/// Source of stub templates
#[derive(Debug, Clone, Default)]
pub struct StubSet {
    dir: Option<PathBuf>,
}

impl StubSet {
    /// Stubs, optionally overridden from a directory
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self { dir }
    }

    /// Template text of a stub
    pub fn get(&self, stub: Stub) -> Result<Cow<'static, str>> {
        if let Some(path) = self.dir.as_ref().map(|d| d.join(stub.file_name())) {
            if path.is_file() {
                tracing::debug!(path = %path.display(), "using custom stub");
                let content =
                    std::fs::read_to_string(&path).map_err(|e| VersioningError::io(&path, e))?;
                return Ok(Cow::Owned(content));
            }
        }
        Ok(Cow::Borrowed(stub.builtin()))
    }

    /// Render a stub with the given placeholder values
    pub fn render(&self, stub: Stub, values: &BTreeMap<&str, String>) -> Result<String> {
        render(&self.get(stub)?, values)
    }
}

/// Substitute placeholders in a template
pub fn render(template: &str, values: &BTreeMap<&str, String>) -> Result<String> {
    let mut context = Context::new();
    for (key, value) in values {
        context.insert(*key, value);
    }
    Ok(Tera::one_off(template, &context, false)?)
}
