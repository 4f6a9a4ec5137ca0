use std::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::SeedEntry;

/// The plaintext a seed record is built from.
#[derive(Clone, PartialEq, Eq)]
pub struct PlainUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub avatar_base64: String,
}

impl PlainUser {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        avatar_base64: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            avatar_base64: avatar_base64.into(),
        }
    }
}

impl fmt::Debug for PlainUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlainUser")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("avatar_base64", &format_args!("<{} chars>", self.avatar_base64.len()))
            .finish()
    }
}

/// Four independently encrypted fields. Each value is opaque outside the cipher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedUserRecord {
    pub name: String,
    pub email: String,
    pub password: String,
    pub avatar: String,
}

impl EncryptedUserRecord {
    pub fn as_entry(&self) -> SeedEntry<'_> {
        SeedEntry {
            name: &self.name,
            email: &self.email,
            password: &self.password,
            avatar: &self.avatar,
        }
    }
}

/// One line of the append-only record ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    #[serde(with = "time::serde::rfc3339")]
    pub added_at: OffsetDateTime,
    pub record: EncryptedUserRecord,
}

impl LedgerEntry {
    pub fn now(record: EncryptedUserRecord) -> Self {
        Self {
            added_at: OffsetDateTime::now_utc(),
            record,
        }
    }
}
