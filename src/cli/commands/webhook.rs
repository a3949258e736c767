//! Webhook command implementation

use anyhow::Result;

use crate::config::Config;

/// Run the webhook receiver until interrupted
pub async fn run_webhook_command(config: &Config, bind: Option<String>) -> Result<()> {
    let bind = bind.unwrap_or_else(|| config.webhook.bind.clone());
    crate::webhook::serve(&bind).await?;
    Ok(())
}
