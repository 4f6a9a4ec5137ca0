use std::path::PathBuf;

use thiserror::Error;

use super::models::SchemaStatus;

/// Errors raised while turning an avatar file into a normalized thumbnail.
#[derive(Debug, Error)]
pub enum AvatarError {
    #[error("avatar file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("failed to read avatar file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid image")]
    InvalidImage,
    #[error("unsupported image format")]
    UnsupportedFormat,
    #[error("invalid SVG image: {0}")]
    InvalidVectorImage(String),
    #[error("failed to encode thumbnail: {0}")]
    Encode(String),
}

impl AvatarError {
    pub fn invalid_vector(reason: impl Into<String>) -> Self {
        Self::InvalidVectorImage(reason.into())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    #[error("encryption key must be base64 of 32 bytes")]
    InvalidKey,
    #[error("ciphertext is not in '<cipher>:<nonce>' form")]
    MalformedCiphertext,
    #[error("encryption failed")]
    Encrypt,
    #[error("decryption failed")]
    Decrypt,
}

/// Failures while writing the generated seeder, the orchestrator or the record ledger.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("ledger {} is corrupt at line {line}: {source}", path.display())]
    Ledger {
        path: PathBuf,
        line: usize,
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum SeedError {
    #[error(transparent)]
    Crypto(#[from] CryptoError),
    #[error("avatar payload is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),
    #[error("failed to store avatar {path}: {source}")]
    Blob {
        path: String,
        source: std::io::Error,
    },
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("failed to hash password: {0}")]
    PasswordHash(String),
}

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("users table is not ready: {0}")]
    Unmet(SchemaStatus),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
