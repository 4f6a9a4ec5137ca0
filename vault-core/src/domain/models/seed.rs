use std::fmt;

/// A record as it appears in a generated seeder's `USERS` array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedEntry<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub avatar: &'a str,
}

/// Decrypted, ready-to-store user row. `password_hash` is a PHC string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserUpsert {
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub avatar_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub created: usize,
    pub updated: usize,
    pub failed: usize,
}

impl SeedReport {
    pub fn record(&mut self, outcome: UpsertOutcome) {
        match outcome {
            UpsertOutcome::Created => self.created += 1,
            UpsertOutcome::Updated => self.updated += 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaStatus {
    Ready,
    MissingTable,
    MissingAvatarColumn,
}

impl SchemaStatus {
    pub fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }
}

impl fmt::Display for SchemaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready => f.write_str("ready"),
            Self::MissingTable => f.write_str("`users` table does not exist"),
            Self::MissingAvatarColumn => f.write_str("`users` table has no `avatar_url` column"),
        }
    }
}
