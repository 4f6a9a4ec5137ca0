use anyhow::{bail, Result};
use tracing::warn;
use vault_core::domain::{models::EncryptedUserRecord, ports::outbound::RecordLedger};

use super::add::register;
use crate::{cli::RebuildArgs, config::Settings, factory};

/// Rewrites the seeder entries from the ledger. Needs no key: records stay encrypted throughout.
///
/// Refuses, unless forced, when the seeder holds more entries than the ledger.
pub fn run(args: &RebuildArgs, settings: &Settings) -> Result<usize> {
    let records: Vec<EncryptedUserRecord> = factory::ledger(settings)
        .load()?
        .into_iter()
        .map(|entry| entry.record)
        .collect();

    let injector = factory::injector(settings);
    if let Some(current) = injector.entry_count()? {
        if current > records.len() {
            if !args.force {
                bail!(
                    "{} has {current} user(s) but the ledger only {}; rebuilding would drop {} of them (use --force to rebuild anyway)",
                    injector.path().display(),
                    records.len(),
                    current - records.len()
                );
            }
            warn!(
                "dropping {} user(s) from {} that are not in the ledger",
                current - records.len(),
                injector.path().display()
            );
        }
    }

    let count = injector.regenerate(&records)?;
    register(&settings.paths.orchestrator, &settings.seeder.logical_name);
    Ok(count)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use vault_core::{
        adapters::outbound::crypto::AesGcmCipher,
        domain::{models::PlainUser, services::build_record},
    };

    use super::*;
    use crate::test_support::settings;

    #[test]
    fn rebuild_restores_a_broken_seeder_from_the_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(dir.path());
        let cipher = settings.cipher().unwrap();
        let records: Vec<_> = ["a", "b", "c"]
            .iter()
            .map(|tag| {
                build_record(&PlainUser::new(*tag, format!("{tag}@example.com"), "pw", "AA=="), &cipher)
                    .unwrap()
            })
            .collect();
        factory::ledger(&settings).append(&records).unwrap();
        fs::create_dir_all(settings.paths.seeder.parent().unwrap()).unwrap();
        fs::write(&settings.paths.seeder, "broken").unwrap();

        assert_eq!(run(&RebuildArgs::default(), &settings).unwrap(), 3);

        let source = fs::read_to_string(&settings.paths.seeder).unwrap();
        for index in 1..=3 {
            assert!(source.contains(&format!("    // {index}\n")));
        }
        assert!(source.contains(&records[2].email));
    }

    #[test]
    fn rebuild_works_without_a_key() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = settings(dir.path());
        let cipher = AesGcmCipher::from_base64_key(settings.crypto.key.as_deref().unwrap()).unwrap();
        let record = build_record(&PlainUser::new("a", "a@example.com", "pw", "AA=="), &cipher).unwrap();
        factory::ledger(&settings).append(&[record]).unwrap();
        settings.crypto.key = None;

        assert_eq!(run(&RebuildArgs::default(), &settings).unwrap(), 1);
    }

    #[test]
    fn seeder_entries_missing_from_the_ledger_block_the_rebuild() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(dir.path());
        let cipher = settings.cipher().unwrap();
        let injector = factory::injector(&settings);
        let records: Vec<_> = ["a", "b"]
            .iter()
            .map(|tag| {
                build_record(&PlainUser::new(*tag, format!("{tag}@example.com"), "pw", "AA=="), &cipher)
                    .unwrap()
            })
            .collect();
        injector.append(&records).unwrap();

        let err = run(&RebuildArgs::default(), &settings).unwrap_err();

        assert!(err.to_string().contains("--force"), "{err}");
        assert_eq!(injector.entry_count().unwrap(), Some(2));

        assert_eq!(run(&RebuildArgs { force: true }, &settings).unwrap(), 0);
        assert_eq!(injector.entry_count().unwrap(), Some(0));
    }

    #[test]
    fn rebuild_keeps_code_outside_the_users_array() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(dir.path());
        let cipher = settings.cipher().unwrap();
        let record =
            build_record(&PlainUser::new("a", "a@example.com", "pw", "AA=="), &cipher).unwrap();
        factory::ledger(&settings).append(std::slice::from_ref(&record)).unwrap();
        let injector = factory::injector(&settings);
        injector.append(std::slice::from_ref(&record)).unwrap();
        let custom = fs::read_to_string(&settings.paths.seeder).unwrap() + "\nfn extra() {}\n";
        fs::write(&settings.paths.seeder, &custom).unwrap();

        assert_eq!(run(&RebuildArgs::default(), &settings).unwrap(), 1);

        assert_eq!(fs::read_to_string(&settings.paths.seeder).unwrap(), custom);
    }

    #[test]
    fn empty_ledger_yields_an_empty_seeder() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(dir.path());

        assert_eq!(run(&RebuildArgs::default(), &settings).unwrap(), 0);
        assert_eq!(factory::injector(&settings).entry_count().unwrap(), Some(0));
    }
}
