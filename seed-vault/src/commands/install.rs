use std::{fs, path::Path};

use anyhow::{Context, Result};
use tracing::info;

use super::schema::ensure_schema;
use crate::{
    config::{read_config, DEFAULT_CONFIG, DEFAULT_CONFIG_FILE},
    factory,
    prompt::Prompt,
};

/// Writes the default config when there is none, then prepares the users table.
pub async fn run(config_path: Option<&Path>, prompt: &mut dyn Prompt) -> Result<()> {
    let path = config_path.unwrap_or(Path::new(DEFAULT_CONFIG_FILE));
    if write_default_config(path)? {
        info!("wrote {}", path.display());
    } else {
        info!("{} already exists, leaving it alone", path.display());
    }

    let settings = read_config(Some(path)).context("failed to read config")?;
    let users = factory::user_repository(&settings).await?;
    ensure_schema(&users, prompt).await?;

    println!();
    println!("Next steps:");
    if settings.crypto.key.is_none() {
        println!("  1. seed-vault generate-key, then export it as SEED_VAULT_CRYPTO__KEY");
    } else {
        println!("  1. keep crypto.key secret: the seeder cannot be decrypted without it");
    }
    println!("  2. seed-vault add");
    println!(
        "  3. declare `mod {};` next to {} and call `run` from your seeding entry point",
        settings.seeder.logical_name,
        settings.paths.orchestrator.display()
    );
    Ok(())
}

/// Returns false when `path` already exists.
fn write_default_config(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, DEFAULT_CONFIG).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(true)
}
