//! CLI argument parsing

use crate::commands::{self, ListArgs, MakeArgs, NewArgs, PublishArgs};
use anyhow::Result;
use clap::{Parser, Subcommand};
use rustapi_versioning::config::DEFAULT_CONFIG_PATH;
use rustapi_versioning::VersioningConfig;
use std::path::{Path, PathBuf};

/// RustAPI versioning CLI - API version scaffolding and inspection
#[derive(Parser, Debug)]
#[command(name = "cargo-apiver")]
#[command(bin_name = "cargo apiver")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Project base directory
    #[arg(long, global = true, default_value = ".")]
    base: PathBuf,

    /// Configuration file (default: <base>/config/api.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a new api version folder structure
    #[command(name = "api:new")]
    New(NewArgs),

    /// Create a controller or request inside an api version
    #[command(name = "api:make")]
    Make(MakeArgs),

    /// List the route groups registered for each api version
    #[command(name = "api:list")]
    List(ListArgs),

    /// Write the default configuration file
    #[command(name = "api:publish")]
    Publish(PublishArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        let config = self.config.as_deref();
        match self.command {
            Commands::New(args) => commands::new_version(&Project::load(&self.base, config)?, args),
            Commands::Make(args) => commands::make(&Project::load(&self.base, config)?, args),
            Commands::List(args) => commands::list(&Project::load(&self.base, config)?, args),
            Commands::Publish(args) => commands::publish(&self.base, config, args),
        }
    }
}

/// A project the commands operate on
#[derive(Debug)]
pub struct Project {
    /// Project base directory
    pub base: PathBuf,
    /// Loaded configuration
    pub config: VersioningConfig,
}

impl Project {
    /// Load the configuration of the project at `base`
    pub fn load(base: &Path, config: Option<&Path>) -> Result<Self> {
        let config_path = config.map_or_else(|| base.join(DEFAULT_CONFIG_PATH), Path::to_path_buf);
        tracing::debug!(
            base = %base.display(),
            config = %config_path.display(),
            "loading project"
        );

        let mut config = VersioningConfig::load(base, config)?;

        // stub directories are relative to the project
        if let Some(stubs) = config.stubs.take() {
            config.stubs = Some(base.join(stubs));
        }

        Ok(Self {
            base: base.to_path_buf(),
            config,
        })
    }
}
