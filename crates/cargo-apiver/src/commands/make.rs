//! Api resource generation command

use crate::cli::Project;
use anyhow::Result;
use clap::Args;
use console::style;
use rustapi_versioning::{ResourceKind, Scaffolder, VersionDiscovery};

/// Arguments for the `api:make` command
#[derive(Args, Debug)]
pub struct MakeArgs {
    /// Resource type: controller or request
    #[arg(value_name = "TYPE")]
    pub kind: ResourceKind,

    /// Class name of the resource (e.g. "UserController", "Admin/UserController")
    pub name: String,

    /// Version to place the resource in
    pub version: String,

    /// Generate a resource controller class
    #[arg(long)]
    pub resource: bool,
}

/// Generate a controller or request class
pub fn make(project: &Project, args: MakeArgs) -> Result<()> {
    let discovery = VersionDiscovery::for_project(&project.base, &project.config);
    let path = Scaffolder::new(&project.config, &discovery).make_resource(
        args.kind,
        &args.name,
        &args.version,
        args.resource,
    )?;

    println!(
        "{} Generated {}: {}",
        style("✓").green(),
        args.kind,
        path.display()
    );

    Ok(())
}
