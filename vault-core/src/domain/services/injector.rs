use std::{
    fs,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use regex::Regex;
use tracing::{info, warn};

use crate::{
    domain::{models::EncryptedUserRecord, ArtifactError},
    template::{self, ENTRY_OPEN},
};

// Everything between the `USERS` opening statement and the `];` line that closes it.
static USERS_REGION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?ms)^pub const USERS: &\[SeedEntry<'static>\] = &\[(.*?)^\];").unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    /// `added` entries were written after the `existing` ones.
    Appended { existing: usize, added: usize },
    /// The file exists but has no recognizable `USERS` region; nothing was written.
    RegionMissing,
}

/// Appends encrypted records to the generated user seeder.
///
/// Only the text inside the `USERS` array is touched. Existing entries are never parsed back
/// into records, and appending does not deduplicate: the seeder upserts by email later on.
#[derive(Debug, Clone)]
pub struct SeedSourceInjector {
    path: PathBuf,
}

impl SeedSourceInjector {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, records: &[EncryptedUserRecord]) -> Result<AppendOutcome, ArtifactError> {
        self.ensure_parent_dir()?;

        if !self.path.exists() {
            self.write(&template::render_seeder(""))?;
            info!("created seeder {}", self.path.display());
        }

        let source = self.read()?;

        let Some(region) = USERS_REGION.captures(&source).and_then(|c| c.get(1)) else {
            warn!(
                "no `USERS` array found in {}, {} record(s) not added",
                self.path.display(),
                records.len()
            );
            return Ok(AppendOutcome::RegionMissing);
        };

        let existing = count_entries(region.as_str());
        let entries = template::render_entries(
            records.iter().map(EncryptedUserRecord::as_entry),
            existing + 1,
        );

        let mut updated = String::with_capacity(source.len() + entries.len());
        updated.push_str(&source[..region.end()]);
        updated.push_str(&entries);
        updated.push_str(&source[region.end()..]);
        self.write(&updated)?;

        info!(
            "added {} user(s) to {} ({} already present)",
            records.len(),
            self.path.display(),
            existing
        );
        Ok(AppendOutcome::Appended {
            existing,
            added: records.len(),
        })
    }

    /// Replaces the `USERS` entries with exactly `records`, numbered from 1.
    ///
    /// Text outside the region is kept. A seeder that is missing or has no region is rendered
    /// from the template.
    pub fn regenerate(&self, records: &[EncryptedUserRecord]) -> Result<usize, ArtifactError> {
        self.ensure_parent_dir()?;

        let entries =
            template::render_entries(records.iter().map(EncryptedUserRecord::as_entry), 1);
        let existing = if self.path.exists() {
            Some(self.read()?)
        } else {
            None
        };
        let region = existing
            .as_deref()
            .and_then(|source| USERS_REGION.captures(source)?.get(1).map(|m| (source, m.range())));

        let updated = match region {
            Some((source, range)) => {
                let mut updated = String::with_capacity(source.len() + entries.len());
                updated.push_str(&source[..range.start]);
                updated.push_str(&template::render_users_body(&entries));
                updated.push_str(&source[range.end..]);
                updated
            }
            None => template::render_seeder(&entries),
        };
        self.write(&updated)?;

        info!(
            "regenerated {} with {} user(s)",
            self.path.display(),
            records.len()
        );
        Ok(records.len())
    }

    /// Number of entries currently in the seeder, `None` if it is missing or has no region.
    pub fn entry_count(&self) -> Result<Option<usize>, ArtifactError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let source = self.read()?;

        Ok(USERS_REGION
            .captures(&source)
            .and_then(|c| c.get(1))
            .map(|region| count_entries(region.as_str())))
    }

    fn ensure_parent_dir(&self) -> Result<(), ArtifactError> {
        match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => fs::create_dir_all(parent).map_err(|source| ArtifactError::CreateDir {
                path: parent.to_path_buf(),
                source,
            }),
            None => Ok(()),
        }
    }

    fn read(&self) -> Result<String, ArtifactError> {
        fs::read_to_string(&self.path).map_err(|source| ArtifactError::Read {
            path: self.path.clone(),
            source,
        })
    }

    fn write(&self, contents: &str) -> Result<(), ArtifactError> {
        fs::write(&self.path, contents).map_err(|source| ArtifactError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

fn count_entries(region: &str) -> usize {
    region.matches(ENTRY_OPEN).count()
}
