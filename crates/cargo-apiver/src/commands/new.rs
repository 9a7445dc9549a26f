//! New api version command

use crate::cli::Project;
use anyhow::Result;
use clap::Args;
use console::style;
use rustapi_versioning::{Scaffolder, VersionDiscovery, VersionRequest};

/// Arguments for the `api:new` command
#[derive(Args, Debug)]
pub struct NewArgs {
    /// Version name, `NEXT` picks the next free `v<n>`
    #[arg(default_value = "NEXT")]
    pub version: VersionRequest,
}

/// Create a new api version
pub fn new_version(project: &Project, args: NewArgs) -> Result<()> {
    let discovery = VersionDiscovery::for_project(&project.base, &project.config);
    let created = Scaffolder::new(&project.config, &discovery).new_version(&args.version)?;

    for file in &created.files {
        println!("{} Created {}", style("✓").green(), file.display());
    }
    println!();
    println!(
        "{}",
        style(format!("Success create new Api Version {}", created.name))
            .green()
            .bold()
    );

    Ok(())
}
