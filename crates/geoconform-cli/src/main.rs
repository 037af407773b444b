//! Geoconform CLI: the `geoconform` command.

mod cli;
mod commands;
mod document;
mod support;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            document,
            config,
            json,
        } => commands::check::run(document, config, json),

        Commands::Config { config } => commands::config::run(config),
    }
}
