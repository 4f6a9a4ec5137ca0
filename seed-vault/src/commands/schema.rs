use anyhow::{Context, Result};
use tracing::{info, warn};
use vault_core::{adapters::outbound::sqlite::SqliteUserRepository, domain::SchemaError};

use crate::prompt::Prompt;

/// Makes sure `users` exists with an `avatar_url` column, offering to migrate when it does not.
///
/// Declining, or a migration that leaves the table unready, fails with [`SchemaError::Unmet`].
pub async fn ensure_schema(users: &SqliteUserRepository, prompt: &mut dyn Prompt) -> Result<()> {
    let status = users.schema_status().await?;
    if status.is_ready() {
        return Ok(());
    }

    warn!("{status}");
    let apply = prompt
        .confirm("Run the missing users migration now?", true)
        .context("failed to read answer")?;
    if !apply {
        return Err(SchemaError::Unmet(status).into());
    }

    let status = users.apply_migration(status).await?;
    if !status.is_ready() {
        return Err(SchemaError::Unmet(status).into());
    }

    info!("users table is ready");
    Ok(())
}
