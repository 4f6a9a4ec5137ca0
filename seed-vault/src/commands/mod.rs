mod add;
mod install;
mod rebuild;
mod schema;
mod seed;

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;
use vault_core::adapters::outbound::crypto::AesGcmCipher;

use crate::{
    cli::Commands,
    config::{read_config, Settings},
    prompt::Prompt,
};

pub async fn dispatch(
    command: Commands,
    config_path: Option<&Path>,
    prompt: &mut dyn Prompt,
) -> Result<()> {
    match command {
        Commands::Add(args) => add::run(args, &settings(config_path)?, prompt).await,
        Commands::Seed => seed::run(&settings(config_path)?, prompt).await.map(|_| ()),
        Commands::Rebuild(args) => {
            let count = rebuild::run(&args, &settings(config_path)?)?;
            info!("seeder rebuilt with {count} user(s)");
            Ok(())
        }
        Commands::Install => install::run(config_path, prompt).await,
        Commands::GenerateKey => {
            println!("{}", AesGcmCipher::generate_key());
            Ok(())
        }
    }
}

fn settings(config_path: Option<&Path>) -> Result<Settings> {
    read_config(config_path).context("failed to read config")
}
