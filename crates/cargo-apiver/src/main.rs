//! `cargo apiver` - API version scaffolding for RustAPI projects

mod cli;
mod commands;

use clap::Parser;
use console::style;
use std::ffi::OsString;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = cli::Cli::parse_from(cargo_args());
    init_tracing(cli.verbose);

    if let Err(err) = cli.execute() {
        eprintln!("{} {:#}", style("error:").red().bold(), err);
        std::process::exit(1);
    }
}

/// Drop the `apiver` argument cargo inserts when run as `cargo apiver`
fn cargo_args() -> Vec<OsString> {
    let mut args: Vec<OsString> = std::env::args_os().collect();
    if args.get(1).is_some_and(|arg| arg == "apiver") {
        args.remove(1);
    }
    args
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
