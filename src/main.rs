//! sportsdex - a static site generator for a sports-analytics resource directory.

mod build;
mod cli;
mod config;
mod data;
mod generator;
mod init;
mod logger;
mod render;
mod serve;
mod table;
mod utils;
mod watch;

use anyhow::Result;
use build::build_site;
use clap::Parser;
use cli::{Cli, Commands};
use config::{SiteConfig, cfg, init_config};
use init::new_site;
use serve::serve_site;

fn main() -> Result<()> {
    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));
    init_config(SiteConfig::load(cli)?);
    let config = cfg();

    match &cli.command {
        Commands::Init { name } => new_site(&config, name.is_some()),
        Commands::Build { .. } => build_site(&config),
        Commands::Serve { .. } => serve_site(),
    }
}
