mod cli;
mod commands;
mod config;
mod factory;
mod prompt;
#[cfg(test)]
mod test_support;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::{cli::Cli, prompt::TerminalPrompt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("seed_vault=info,vault_core=info")),
        )
        .without_time()
        .with_target(false)
        .init();

    commands::dispatch(cli.command, cli.config.as_deref(), &mut TerminalPrompt).await
}
