use anyhow::Result;
use tracing::warn;
use vault_core::{
    adapters::outbound::{crypto::AesGcmCipher, sqlite::SqliteUserRepository},
    domain::ports::outbound::RecordLedger,
    seeding::{SeedEntry, SeedReport},
};

use super::schema::ensure_schema;
use crate::{config::Settings, factory, prompt::Prompt};

pub async fn run(settings: &Settings, prompt: &mut dyn Prompt) -> Result<SeedReport> {
    let cipher = settings.cipher()?;
    let users = factory::user_repository(settings).await?;
    ensure_schema(&users, prompt).await?;

    seed_from_ledger(settings, users, cipher).await
}

/// Upserts every recorded user. Entries that fail are counted in the report, not returned.
pub async fn seed_from_ledger(
    settings: &Settings,
    users: SqliteUserRepository,
    cipher: AesGcmCipher,
) -> Result<SeedReport> {
    let ledger = factory::ledger(settings);
    let recorded = ledger.load()?;
    if recorded.is_empty() {
        warn!("no users recorded in {}", ledger.path().display());
        return Ok(SeedReport::default());
    }

    let entries: Vec<SeedEntry<'_>> = recorded.iter().map(|entry| entry.record.as_entry()).collect();
    let report = factory::seed_context(settings, users, cipher)
        .run(&entries)
        .await?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use vault_core::domain::{models::PlainUser, services::build_record};

    use super::*;
    use crate::{prompt::ScriptedPrompt, test_support::settings};

    fn record_users(settings: &Settings, users: &[(&str, &str)]) {
        let cipher = settings.cipher().unwrap();
        let records: Vec<_> = users
            .iter()
            .map(|(name, email)| {
                build_record(&PlainUser::new(*name, *email, "pw", "/9j/4A=="), &cipher).unwrap()
            })
            .collect();
        factory::ledger(settings).append(&records).unwrap();
    }

    #[tokio::test]
    async fn recorded_users_are_upserted_by_email() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(dir.path());
        record_users(
            &settings,
            &[
                ("Ada", "ada@example.com"),
                ("Grace", "grace@example.com"),
                ("Ada Lovelace", "ada@example.com"),
            ],
        );
        let mut prompt = ScriptedPrompt::new(["y"]);

        let report = run(&settings, &mut prompt).await.unwrap();

        assert_eq!(report, SeedReport { created: 2, updated: 1, failed: 0 });
        let avatars = std::fs::read_dir(settings.paths.storage.join("avatars")).unwrap();
        assert_eq!(avatars.count(), 3);
    }

    #[tokio::test]
    async fn empty_ledger_seeds_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(dir.path());
        let mut prompt = ScriptedPrompt::new(["y"]);

        let report = run(&settings, &mut prompt).await.unwrap();

        assert_eq!(report, SeedReport::default());
    }

    #[tokio::test]
    async fn wrong_key_fails_each_entry_but_not_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(dir.path());
        record_users(&settings, &[("Ada", "ada@example.com")]);
        let users = factory::user_repository(&settings).await.unwrap();
        ensure_schema(&users, &mut ScriptedPrompt::new(["y"])).await.unwrap();
        let other_key = AesGcmCipher::from_base64_key(&AesGcmCipher::generate_key()).unwrap();

        let report = seed_from_ledger(&settings, users, other_key).await.unwrap();

        assert_eq!(report, SeedReport { created: 0, updated: 0, failed: 1 });
    }
}
