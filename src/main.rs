//! Postbase - content collections and base-path resolution for static blogs.

mod address;
mod cli;
mod config;
mod content;
mod logger;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::SiteConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = SiteConfig::load(&cli)?;

    match &cli.command {
        Commands::Check { args } => cli::check::check_site(args, &config),
        Commands::Query { args } => cli::query::run_query(args, &config),
        Commands::Resolve { args } => cli::resolve::run_resolve(args, &config),
    }
}
