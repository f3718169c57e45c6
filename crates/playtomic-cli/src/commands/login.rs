//! Login command implementation.

use anyhow::Result;

use super::{ConnectArgs, connect};
use crate::output;

pub async fn run(connect_args: ConnectArgs) -> Result<()> {
    let client = connect(&connect_args).await?;

    output::success("Logged in successfully");
    output::status(&format!(
        "{} @ {}",
        client.session().credentials().email(),
        client.session().config().base_url
    ));

    Ok(())
}
