//! CLI argument parsing with clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Netsocs - server configuration and deployment manager
#[derive(Parser, Debug)]
#[command(name = "netsocs")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv); `status -v` also shows every pod
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a runtime config file (default: ~/.netsocs/runtime.yaml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize Helm and install Netsocs
    Init(InitArgs),

    /// Configure the server address and apply it
    Config(ConfigArgs),

    /// Show the status of the Netsocs pods
    Status(StatusArgs),

    /// Upgrade Netsocs to a chart version (latest if omitted)
    Upgrade(UpgradeArgs),

    /// Roll back Netsocs to a previous revision
    Rollback(RollbackArgs),

    /// Show CLI and Netsocs versions
    Version(VersionArgs),

    /// Show the latest available chart versions and mark the one in use
    ListVersions,

    /// CLI management commands
    #[command(subcommand)]
    Cli(CliCommands),

    /// Check connectivity and required tools
    Doctor(DoctorArgs),

    /// Install this executable as 'netsocs' for all users
    AutoInstall,
}

// Init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Skip the connectivity check
    #[arg(long)]
    pub skip_network_check: bool,
}

// Config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Server address (IP or hostname); prompted for when omitted
    #[arg(short, long)]
    pub address: Option<String>,

    /// Only write the values file, do not run helm upgrade
    #[arg(long)]
    pub skip_apply: bool,
}

// Status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// Upgrade command
#[derive(Args, Debug)]
pub struct UpgradeArgs {
    /// Chart version
    #[arg(id = "chart_version", value_name = "VERSION")]
    pub version: Option<String>,
}

// Rollback command
#[derive(Args, Debug)]
pub struct RollbackArgs {
    /// Revision number (previous revision if omitted)
    pub revision: Option<u32>,
}

// Version command
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// CLI commands
#[derive(Subcommand, Debug)]
pub enum CliCommands {
    /// Update the CLI to a release (latest if omitted)
    Update(CliUpdateArgs),

    /// Show the latest CLI releases and mark the one in use
    ListVersions,
}

#[derive(Args, Debug)]
pub struct CliUpdateArgs {
    /// Release tag
    #[arg(id = "release_version", value_name = "VERSION")]
    pub version: Option<String>,
}

// Doctor command
#[derive(Args, Debug)]
pub struct DoctorArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Skip the tool checks
    #[arg(long)]
    pub network_only: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_upgrade_with_version() {
        let cli = Cli::try_parse_from(["netsocs", "upgrade", "2.1.0"]).unwrap();
        match cli.command {
            Commands::Upgrade(args) => assert_eq!(args.version.as_deref(), Some("2.1.0")),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_rollback_without_revision() {
        let cli = Cli::try_parse_from(["netsocs", "rollback"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Rollback(RollbackArgs { revision: None })
        ));
    }

    #[test]
    fn test_rollback_revision_must_be_numeric() {
        assert!(Cli::try_parse_from(["netsocs", "rollback", "two"]).is_err());
    }

    #[test]
    fn test_status_verbose_is_global() {
        let cli = Cli::try_parse_from(["netsocs", "status", "-v"]).unwrap();
        assert_eq!(cli.verbose, 1);
        assert!(matches!(cli.command, Commands::Status(_)));
    }

    #[test]
    fn test_cli_subcommands() {
        let cli = Cli::try_parse_from(["netsocs", "cli", "update", "v1.2.0"]).unwrap();
        match cli.command {
            Commands::Cli(CliCommands::Update(args)) => {
                assert_eq!(args.version.as_deref(), Some("v1.2.0"))
            }
            other => panic!("unexpected command: {:?}", other),
        }

        let cli = Cli::try_parse_from(["netsocs", "cli", "list-versions"]).unwrap();
        assert!(matches!(cli.command, Commands::Cli(CliCommands::ListVersions)));
    }

    #[test]
    fn test_kebab_case_commands() {
        assert!(Cli::try_parse_from(["netsocs", "list-versions"]).is_ok());
        assert!(Cli::try_parse_from(["netsocs", "auto-install"]).is_ok());
    }

    #[test]
    fn test_config_address_flag() {
        let cli =
            Cli::try_parse_from(["netsocs", "-c", "/tmp/rt.yaml", "config", "--address", "10.0.0.5"])
                .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/rt.yaml")));
        match cli.command {
            Commands::Config(args) => {
                assert_eq!(args.address.as_deref(), Some("10.0.0.5"));
                assert!(!args.skip_apply);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
