//! Tournament command implementations.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use playtomic::ResourceId;

use super::{ConnectArgs, connect, read_json};
use crate::output;

#[derive(Args, Debug)]
pub struct TournamentCommand {
    #[command(subcommand)]
    pub command: TournamentSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum TournamentSubcommand {
    /// Fetch a tournament by id
    Get {
        /// Tournament id
        id: String,
    },

    /// Create a tournament from a JSON document
    Create {
        /// JSON file with tournament data (use - for stdin)
        #[arg(long)]
        json: String,
    },
}

pub async fn handle(connect_args: ConnectArgs, cmd: TournamentCommand) -> Result<()> {
    match cmd.command {
        TournamentSubcommand::Get { id } => {
            let id = ResourceId::new(id).context("Invalid tournament id")?;
            let client = connect(&connect_args).await?;
            let tournament = client
                .tournaments()
                .get(&id)
                .await
                .context("Failed to get tournament")?;
            output::json_pretty(&tournament)
        }
        TournamentSubcommand::Create { json } => {
            let data = read_json(&json)?;
            let client = connect(&connect_args).await?;
            let created = client
                .tournaments()
                .create(&data)
                .await
                .context("Failed to create tournament")?;
            output::json_pretty(&created)?;
            output::success("Created tournament");
            Ok(())
        }
    }
}
