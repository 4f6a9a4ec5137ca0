use std::{
    io,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use thiserror::Error;
use tracing::{error, info, warn};
use vault_core::{
    domain::{
        models::{EncryptedUserRecord, PlainUser},
        ports::outbound::{Cipher, RecordLedger},
        services::{build_record, register_seeder, AppendOutcome, AvatarNormalizer},
        ArtifactError, AvatarError, CryptoError, Email, EmailError,
    },
};

use super::{schema::ensure_schema, seed::seed_from_ledger};
use crate::{cli::AddArgs, config::Settings, factory, prompt::Prompt};

/// Why a single user was skipped. Only `Prompt` ends the whole session.
#[derive(Debug, Error)]
enum UserError {
    #[error("failed to read input: {0}")]
    Prompt(#[from] io::Error),
    #[error("name must not be empty")]
    EmptyName,
    #[error("invalid email: {0}")]
    Email(#[from] EmailError),
    #[error("password must not be empty")]
    EmptyPassword,
    #[error(transparent)]
    Avatar(#[from] AvatarError),
    #[error("failed to encrypt user: {0}")]
    Crypto(#[from] CryptoError),
}

/// Values for the first user that the operator passed as flags.
#[derive(Debug, Default)]
struct Prefill {
    name: Option<String>,
    email: Option<String>,
    avatar: Option<PathBuf>,
}

pub async fn run(args: AddArgs, settings: &Settings, prompt: &mut dyn Prompt) -> Result<()> {
    let cipher = settings.cipher()?;
    let users = factory::user_repository(settings).await?;
    ensure_schema(&users, prompt).await?;

    let normalizer = factory::normalizer(settings);
    let records = collect_users(&args, prompt, &normalizer, &cipher)?;
    save_records(&records, settings)?;

    if args.seed && !records.is_empty() {
        seed_from_ledger(settings, users, cipher).await?;
    }
    Ok(())
}

/// Asks for users until the operator stops (or once with `--once`).
fn collect_users(
    args: &AddArgs,
    prompt: &mut dyn Prompt,
    normalizer: &AvatarNormalizer,
    cipher: &dyn Cipher,
) -> Result<Vec<EncryptedUserRecord>> {
    let mut prefill = Some(Prefill {
        name: args.name.clone(),
        email: args.email.clone(),
        avatar: args.avatar.clone(),
    });
    let mut records = Vec::new();

    loop {
        match read_user(prompt, prefill.take().unwrap_or_default(), normalizer, cipher) {
            Ok(record) => records.push(record),
            Err(UserError::Prompt(err)) => return Err(err).context("failed to read input"),
            Err(err) => error!("user skipped: {err}"),
        }

        if args.once {
            break;
        }
        if !prompt
            .confirm("Add another user?", false)
            .context("failed to read answer")?
        {
            break;
        }
    }

    Ok(records)
}

fn read_user(
    prompt: &mut dyn Prompt,
    prefill: Prefill,
    normalizer: &AvatarNormalizer,
    cipher: &dyn Cipher,
) -> Result<EncryptedUserRecord, UserError> {
    let name = match prefill.name {
        Some(name) => name,
        None => prompt.input("Name")?,
    };
    let name = name.trim();
    if name.is_empty() {
        return Err(UserError::EmptyName);
    }

    let email = match prefill.email {
        Some(email) => email,
        None => prompt.input("Email")?,
    };
    let email = Email::parse(&email)?;

    let password = prompt.password("Password")?;
    if password.is_empty() {
        return Err(UserError::EmptyPassword);
    }

    let avatar = match prefill.avatar {
        Some(path) => path,
        None => PathBuf::from(prompt.input("Avatar path")?),
    };
    let avatar = normalizer.normalize(&avatar)?;

    let user = PlainUser::new(name, &*email, password, avatar.base64);
    let record = build_record(&user, cipher)?;
    info!("prepared {email} ({} avatar)", avatar.extension);
    Ok(record)
}

/// Records the batch in the ledger, patches the seeder and registers it with the orchestrator.
///
/// Only a directory that cannot be created is fatal; every other file problem is a warning.
fn save_records(records: &[EncryptedUserRecord], settings: &Settings) -> Result<()> {
    if records.is_empty() {
        warn!("no users added");
        return Ok(());
    }

    match factory::ledger(settings).append(records) {
        Ok(()) => {}
        Err(err @ ArtifactError::CreateDir { .. }) => return Err(err.into()),
        Err(err) => warn!(
            "{err}; these users are only in the seeder: `seed-vault rebuild` and `--seed` will not \
             know about them, and `rebuild` refuses to run until the ledger catches up"
        ),
    }

    let injector = factory::injector(settings);
    match injector.append(records) {
        Ok(AppendOutcome::Appended { .. }) => {}
        Ok(AppendOutcome::RegionMissing) => warn!(
            "run `seed-vault rebuild` to regenerate {} from the ledger",
            injector.path().display()
        ),
        Err(err @ ArtifactError::CreateDir { .. }) => return Err(err.into()),
        Err(err) => warn!("{err}"),
    }

    register(&settings.paths.orchestrator, &settings.seeder.logical_name);
    Ok(())
}

pub(super) fn register(orchestrator: &Path, logical_name: &str) {
    if let Err(err) = register_seeder(orchestrator, logical_name) {
        warn!("could not register {logical_name}: {err}");
    }
}
