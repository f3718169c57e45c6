//! Subcommand implementations.

pub mod login;
pub mod tenant;
pub mod tournament;

use std::io::{self, Read};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;

use playtomic::types::DEFAULT_BASE_URL;
use playtomic::{BaseUrl, ClientConfig, Credentials, PlaytomicClient};

use crate::output;

/// Connection settings shared by every subcommand.
#[derive(Args, Debug)]
pub struct ConnectArgs {
    /// Account email
    #[arg(long, env = "PLAYTOMIC_EMAIL", global = true)]
    pub email: Option<String>,

    /// Account password
    #[arg(long, env = "PLAYTOMIC_PASSWORD", hide_env_values = true, global = true)]
    pub password: Option<String>,

    /// API base URL
    #[arg(long, env = "PLAYTOMIC_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub base_url: String,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
}

impl ConnectArgs {
    fn config(&self, log_bodies: bool) -> Result<ClientConfig> {
        let base_url = BaseUrl::new(&self.base_url).context("Invalid base URL")?;
        let mut config = ClientConfig::default()
            .with_base_url(base_url)
            .with_log_bodies(log_bodies);
        if let Some(secs) = self.timeout {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }

    fn credentials(&self) -> Result<Credentials> {
        let email = self
            .email
            .as_deref()
            .context("No email given. Pass --email or set PLAYTOMIC_EMAIL.")?;
        let password = self
            .password
            .as_deref()
            .context("No password given. Pass --password or set PLAYTOMIC_PASSWORD.")?;
        Ok(Credentials::new(email, password))
    }
}

/// Log in and return a ready client.
pub async fn connect(args: &ConnectArgs) -> Result<PlaytomicClient> {
    let credentials = args.credentials()?;
    let config = args.config(tracing::enabled!(tracing::Level::TRACE))?;

    output::status("Logging in...");

    PlaytomicClient::with_config(config, credentials)
        .await
        .context("Failed to login")
}

/// Read a JSON document from a file path, or stdin when the path is `-`.
pub fn read_json(path: &str) -> Result<Value> {
    if path == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read from stdin")?;
        serde_json::from_str(&buf).context("Invalid JSON from stdin")
    } else {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read JSON file {}", path))?;
        serde_json::from_str(&content).context("Invalid JSON in file")
    }
}
