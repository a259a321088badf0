use anyhow::Result;
use clap::Parser;
use tracing::debug;

use smartsearch_cli::{
    cli::{Cli, Commands},
    commands,
    config::CliConfig,
    logging::{self, LogTarget},
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // The interactive mode owns the terminal, so its logs go to a file
    let log_target = match &cli.command {
        Some(_) => LogTarget::Stderr,
        None => cli
            .log_file
            .clone()
            .or_else(logging::default_log_path)
            .map_or(LogTarget::Discard, LogTarget::File),
    };
    logging::init(cli.verbose, log_target)?;

    let config = CliConfig::load(&cli)?;
    debug!(?config, "configuration resolved");

    match cli.command {
        Some(Commands::Lookup { query, format }) => {
            commands::lookup::execute(config, query, format).await?
        }
        None => commands::interactive::execute(config).await?,
    }

    Ok(())
}
