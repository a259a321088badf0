use anyhow::Result;
use tracing::info;

use crate::config::CliConfig;
use crate::tui;

pub async fn execute(config: CliConfig) -> Result<()> {
    let lookup = super::build_lookup(&config)?;
    info!(
        debounce_ms = config.search.debounce_ms,
        escape = ?config.search.escape,
        "starting interactive search"
    );
    tui::run(&config, lookup).await
}
