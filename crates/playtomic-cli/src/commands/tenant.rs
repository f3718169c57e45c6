//! Tenant command implementations.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use playtomic::ResourceId;

use super::{ConnectArgs, connect, read_json};
use crate::output;

#[derive(Args, Debug)]
pub struct TenantCommand {
    #[command(subcommand)]
    pub command: TenantSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum TenantSubcommand {
    /// Fetch a tenant by id
    Get {
        /// Tenant id
        id: String,
    },

    /// Create a tenant from a JSON document
    Create {
        /// JSON file with tenant data (use - for stdin)
        #[arg(long)]
        json: String,
    },
}

pub async fn handle(connect_args: ConnectArgs, cmd: TenantCommand) -> Result<()> {
    match cmd.command {
        TenantSubcommand::Get { id } => {
            let id = ResourceId::new(id).context("Invalid tenant id")?;
            let client = connect(&connect_args).await?;
            let tenant = client
                .tenants()
                .get(&id)
                .await
                .context("Failed to get tenant")?;
            output::json_pretty(&tenant)
        }
        TenantSubcommand::Create { json } => {
            let data = read_json(&json)?;
            let client = connect(&connect_args).await?;
            let created = client
                .tenants()
                .create(&data)
                .await
                .context("Failed to create tenant")?;
            output::json_pretty(&created)?;
            output::success("Created tenant");
            Ok(())
        }
    }
}
