//! Composition root. The only place that picks concrete adapters.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;
use vault_core::{
    adapters::outbound::{
        crypto::AesGcmCipher,
        media::{ImageCrateCodec, ResvgRasterizer},
        sqlite::SqliteUserRepository,
        storage::{FsBlobStore, JsonlRecordLedger},
    },
    domain::services::{AvatarNormalizer, SeedSourceInjector},
    seeding::SeedContext,
};

use crate::config::Settings;

pub fn normalizer(settings: &Settings) -> AvatarNormalizer {
    let normalizer = AvatarNormalizer::new(ImageCrateCodec);
    if settings.avatar.rasterize_svg {
        normalizer.with_rasterizer(ResvgRasterizer)
    } else {
        debug!("svg rasterization disabled, svg avatars are kept as-is");
        normalizer
    }
}

pub fn injector(settings: &Settings) -> SeedSourceInjector {
    SeedSourceInjector::new(&settings.paths.seeder)
}

pub fn ledger(settings: &Settings) -> JsonlRecordLedger {
    JsonlRecordLedger::new(&settings.paths.ledger)
}

pub async fn user_repository(settings: &Settings) -> Result<SqliteUserRepository> {
    SqliteUserRepository::connect(&settings.database.url)
        .await
        .with_context(|| format!("failed to open database {}", settings.database.url))
}

pub fn seed_context(
    settings: &Settings,
    users: SqliteUserRepository,
    cipher: AesGcmCipher,
) -> SeedContext {
    SeedContext::new(
        Arc::new(users),
        Arc::new(FsBlobStore::new(&settings.paths.storage)),
        Arc::new(cipher),
    )
    .with_avatar_directory(&settings.seeder.avatar_directory)
}
