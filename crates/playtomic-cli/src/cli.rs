//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::ConnectArgs;
use crate::commands::tenant::TenantCommand;
use crate::commands::tournament::TournamentCommand;

/// Playtomic API CLI tool.
#[derive(Parser, Debug)]
#[command(name = "playtomic")]
#[command(author, version = env!("PLAYTOMIC_CLI_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub connect: ConnectArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check that the credentials can log in
    Login,

    /// Tenant (club) operations
    Tenant(TenantCommand),

    /// Tournament operations
    Tournament(TournamentCommand),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_tenant_get() {
        let cli = Cli::try_parse_from([
            "playtomic",
            "--email",
            "a@b.c",
            "--password",
            "pw",
            "tenant",
            "get",
            "t1",
        ])
        .unwrap();
        assert_eq!(cli.connect.email.as_deref(), Some("a@b.c"));
        assert!(matches!(cli.command, Commands::Tenant(_)));
    }
}
