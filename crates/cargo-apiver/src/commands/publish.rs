//! Config publishing command

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use rustapi_versioning::config::{CONFIG_TEMPLATE, DEFAULT_CONFIG_PATH};
use std::fs;
use std::path::Path;

/// Arguments for the `api:publish` command
#[derive(Args, Debug)]
pub struct PublishArgs {
    /// Overwrite an existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Write the default configuration file
pub fn publish(base: &Path, config: Option<&Path>, args: PublishArgs) -> Result<()> {
    let path = config.map_or_else(|| base.join(DEFAULT_CONFIG_PATH), Path::to_path_buf);

    if path.exists() && !args.force {
        anyhow::bail!(
            "Config file '{}' already exists, use --force to overwrite",
            path.display()
        );
    }

    if path.exists() {
        tracing::debug!(path = %path.display(), "overwriting existing config");
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&path, CONFIG_TEMPLATE)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("{} Published config: {}", style("✓").green(), path.display());

    Ok(())
}
