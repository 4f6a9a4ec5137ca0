use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use crate::domain::{
    models::{EncryptedUserRecord, LedgerEntry},
    ports::outbound::RecordLedger,
    ArtifactError,
};

/// Append-only JSON Lines file holding one [`LedgerEntry`] per line.
#[derive(Debug, Clone)]
pub struct JsonlRecordLedger {
    path: PathBuf,
}

impl JsonlRecordLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_error(&self, source: std::io::Error) -> ArtifactError {
        ArtifactError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

impl RecordLedger for JsonlRecordLedger {
    fn append(&self, records: &[EncryptedUserRecord]) -> Result<(), ArtifactError> {
        if records.is_empty() {
            return Ok(());
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| ArtifactError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let mut lines = String::new();
        for record in records {
            let line = serde_json::to_string(&LedgerEntry::now(record.clone()))
                .map_err(|err| self.write_error(std::io::Error::other(err)))?;
            lines.push_str(&line);
            lines.push('\n');
        }

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| file.write_all(lines.as_bytes()))
            .map_err(|source| self.write_error(source))
    }

    fn load(&self) -> Result<Vec<LedgerEntry>, ArtifactError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let raw = fs::read_to_string(&self.path).map_err(|source| ArtifactError::Read {
            path: self.path.clone(),
            source,
        })?;

        raw.lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(index, line)| {
                serde_json::from_str(line).map_err(|source| ArtifactError::Ledger {
                    path: self.path.clone(),
                    line: index + 1,
                    source,
                })
            })
            .collect()
    }
}
