use std::fmt;
use std::ops::Deref;
use thiserror::Error;

/// An email address that passed the CLI's plausibility check.
///
/// The record builder accepts any string; this type only exists so the interactive
/// command can reject obvious typos before a user is encrypted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

#[derive(Error, Debug, PartialEq)]
pub enum EmailError {
    #[error("email is empty")]
    Empty,
    #[error("'{0}' is not a valid email: expected exactly one '@'")]
    InvalidFormat(String),
    #[error("'{0}' is not a valid email: missing local part")]
    MissingLocalPart(String),
    #[error("'{0}' is not a valid email: invalid domain part")]
    InvalidDomainPart(String),
    #[error("'{0}' is not a valid email: contains whitespace")]
    ContainsWhitespace(String),
}

impl Email {
    /// Trims surrounding whitespace and lowercases the domain, since the seeder upserts by
    /// email and `Ada@Example.com` should land on the same row as `Ada@example.com`.
    pub fn parse(raw: &str) -> Result<Self, EmailError> {
        let value = raw.trim();
        if value.is_empty() {
            return Err(EmailError::Empty);
        }
        if value.chars().any(char::is_whitespace) {
            return Err(EmailError::ContainsWhitespace(value.to_string()));
        }

        let Some((local, domain)) = value.split_once('@') else {
            return Err(EmailError::InvalidFormat(value.to_string()));
        };
        if domain.contains('@') {
            return Err(EmailError::InvalidFormat(value.to_string()));
        }
        if local.is_empty() {
            return Err(EmailError::MissingLocalPart(value.to_string()));
        }
        if !domain.contains('.')
            || domain.starts_with('.')
            || domain.ends_with('.')
            || domain.contains("..")
        {
            return Err(EmailError::InvalidDomainPart(value.to_string()));
        }

        Ok(Self(format!("{local}@{}", domain.to_ascii_lowercase())))
    }
}

impl TryFrom<&str> for Email {
    type Error = EmailError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl Deref for Email {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
