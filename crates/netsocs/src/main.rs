//! Netsocs CLI - deployment manager for Netsocs on Kubernetes
//!
//! This is the main entry point for the `netsocs` command-line interface.

mod cli;
mod commands;
mod output;
mod version;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, CliCommands, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize rustls crypto provider (required for rustls 0.23+)
    // This must be done before any TLS operations
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Init(args) => commands::init::run(args, config).await,
        Commands::Config(args) => commands::config::run(args, config).await,
        Commands::Status(args) => commands::status::run(args, cli.verbose > 0, config).await,
        Commands::Upgrade(args) => commands::upgrade::run(args, config).await,
        Commands::Rollback(args) => commands::rollback::run(args, config).await,
        Commands::Version(args) => commands::version::run(args, config).await,
        Commands::ListVersions => commands::versions::run(config).await,
        Commands::Cli(CliCommands::Update(args)) => commands::cli::update(args, config).await,
        Commands::Cli(CliCommands::ListVersions) => commands::cli::list_versions(config).await,
        Commands::Doctor(args) => commands::doctor::run(args, config).await,
        Commands::AutoInstall => commands::install::run(config),
    }
}

/// Initialize tracing with appropriate verbosity
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}
