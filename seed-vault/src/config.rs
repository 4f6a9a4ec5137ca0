use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use vault_core::adapters::outbound::crypto::AesGcmCipher;

pub const DEFAULT_CONFIG_FILE: &str = "seed-vault.toml";

/// Commented config written by `install`.
pub const DEFAULT_CONFIG: &str = include_str!("../seed-vault.example.toml");

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub paths: PathSettings,
    pub seeder: SeederSettings,
    pub avatar: AvatarSettings,
    pub database: DatabaseSettings,
    #[serde(default)]
    pub crypto: CryptoSettings,
}

#[derive(Deserialize, Clone, Debug)]
pub struct PathSettings {
    pub seeder: PathBuf,
    pub orchestrator: PathBuf,
    pub ledger: PathBuf,
    pub storage: PathBuf,
}

#[derive(Deserialize, Clone, Debug)]
pub struct SeederSettings {
    pub logical_name: String,
    pub avatar_directory: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct AvatarSettings {
    pub rasterize_svg: bool,
}

#[derive(Deserialize, Clone, Debug)]
pub struct DatabaseSettings {
    pub url: String,
}

#[derive(Deserialize, Clone, Default)]
pub struct CryptoSettings {
    /// Base64 of a 32 byte AES-256 key.
    pub key: Option<String>,
}

impl Settings {
    pub fn cipher(&self) -> Result<AesGcmCipher> {
        let key = self
            .crypto
            .key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .context("crypto.key is not set; create one with `seed-vault generate-key` and export it as SEED_VAULT_CRYPTO__KEY")?;

        AesGcmCipher::from_base64_key(key).context("crypto.key is invalid")
    }
}

/// Defaults, then the config file, then `SEED_VAULT_*` environment variables.
///
/// An explicitly passed `path` must exist; the default `seed-vault.toml` is optional.
pub fn read_config(path: Option<&Path>) -> Result<Settings, config::ConfigError> {
    let (file, required) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };

    let settings = config::Config::builder()
        .set_default("paths.seeder", "database/seeders/user_seeder.rs")?
        .set_default("paths.orchestrator", "database/seeders/mod.rs")?
        .set_default("paths.ledger", "database/seeders/user_seeder.jsonl")?
        .set_default("paths.storage", "storage/app/public")?
        .set_default("seeder.logical_name", "user_seeder")?
        .set_default("seeder.avatar_directory", "avatars")?
        .set_default("avatar.rasterize_svg", true)?
        .set_default("database.url", "sqlite://database.sqlite")?
        .add_source(config::File::from(file).required(required))
        .add_source(
            config::Environment::with_prefix("SEED_VAULT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}
