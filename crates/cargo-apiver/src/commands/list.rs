//! Route group listing command

use crate::cli::Project;
use anyhow::Result;
use clap::Args;
use console::style;
use rustapi_versioning::{FsRouteFileLoader, RouteRegistrar, RouteTable, VersionDiscovery};

/// Arguments for the `api:list` command
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Also print the route file of each group
    #[arg(long)]
    pub files: bool,
}

/// Boot the versions against a route table and print the groups
pub fn list(project: &Project, args: ListArgs) -> Result<()> {
    let config = &project.config;
    if !config.enabled {
        println!("{}", style("Api versioning is disabled").yellow());
        return Ok(());
    }

    let discovery = VersionDiscovery::for_project(&project.base, config);
    let loader = FsRouteFileLoader::new(&config.route_file);
    let mut table = RouteTable::new();

    // groups that registered are printed even when others failed
    let result = RouteRegistrar::new(config, &discovery, &loader).boot(&mut table);

    if table.is_empty() {
        println!("No api versions registered.");
    } else {
        println!(
            "{:<24} {:<8} {:<40} {}",
            style("PREFIX").bold(),
            style("VERSION").bold(),
            style("NAMESPACE").bold(),
            style("MIDDLEWARE").bold()
        );
    }

    for (group, routes) in table.iter() {
        let prefix = format!("/{}", group.prefix_path());
        let version = if group.root {
            format!("{}*", group.version)
        } else {
            group.version.clone()
        };

        println!(
            "{:<24} {:<8} {:<40} {}",
            style(prefix).cyan(),
            version,
            group.namespace,
            group.middleware.join(", ")
        );

        if args.files {
            println!("  {}", style(routes.path.display()).dim());
        }
    }

    let summary = result?;
    if !summary.disabled.is_empty() {
        println!();
        println!("Disabled: {}", summary.disabled.join(", "));
    }
    if let Some(root) = summary.root {
        println!();
        println!("* {} is the default version", root);
    }

    Ok(())
}
