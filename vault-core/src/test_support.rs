//! Fixtures and in-memory doubles shared by the unit tests.

use std::collections::HashMap;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use base64::prelude::*;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage, RgbaImage};

use crate::domain::{
    models::{EncryptedUserRecord, UpsertOutcome, UserUpsert},
    ports::outbound::{BlobStore, Cipher, UserRepository},
    CryptoError, SeedError,
};

pub const SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="32" height="16" viewBox="0 0 32 16"><rect width="32" height="16" fill="#c33"/></svg>"##;

fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 7 % 256) as u8, (y * 13 % 256) as u8, ((x + y) % 256) as u8])
    })
}

fn encode(image: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut bytes = Cursor::new(Vec::new());
    image.write_to(&mut bytes, format).unwrap();
    bytes.into_inner()
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    encode(DynamicImage::ImageRgb8(gradient(width, height)), ImageFormat::Png)
}

pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    encode(DynamicImage::ImageRgb8(gradient(width, height)), ImageFormat::Jpeg)
}

pub fn gif_bytes(width: u32, height: u32) -> Vec<u8> {
    let rgba: RgbaImage = DynamicImage::ImageRgb8(gradient(width, height)).to_rgba8();
    encode(DynamicImage::ImageRgba8(rgba), ImageFormat::Gif)
}

pub fn write_fixture(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

/// Decodes a base64 payload that must be a JPEG.
pub fn decode_jpeg(base64: &str) -> DynamicImage {
    let bytes = BASE64_STANDARD.decode(base64).unwrap();
    image::load_from_memory_with_format(&bytes, ImageFormat::Jpeg).unwrap()
}

/// A record whose fields are `name-<tag>`, `email-<tag>` and so on.
pub fn record(tag: &str) -> EncryptedUserRecord {
    EncryptedUserRecord {
        name: format!("name-{tag}"),
        email: format!("email-{tag}"),
        password: format!("password-{tag}"),
        avatar: format!("avatar-{tag}"),
    }
}

/// Deterministic, reversible stand-in for the real cipher.
#[derive(Debug, Clone, Copy, Default)]
pub struct TestCipher;

impl Cipher for TestCipher {
    fn encrypt(&self, plaintext: &str) -> Result<String, CryptoError> {
        Ok(format!("test:{}", BASE64_STANDARD.encode(plaintext)))
    }

    fn decrypt(&self, ciphertext: &str) -> Result<String, CryptoError> {
        let encoded = ciphertext
            .strip_prefix("test:")
            .ok_or(CryptoError::MalformedCiphertext)?;
        let bytes = BASE64_STANDARD
            .decode(encoded)
            .map_err(|_| CryptoError::MalformedCiphertext)?;
        String::from_utf8(bytes).map_err(|_| CryptoError::Decrypt)
    }
}

/// User repository backed by a HashMap keyed by email.
#[derive(Clone, Default)]
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<String, UserUpsert>>>,
}

#[allow(dead_code)]
impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, email: &str) -> Option<UserUpsert> {
        self.users.read().unwrap().get(email).cloned()
    }

    pub fn len(&self) -> usize {
        self.users.read().unwrap().len()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn upsert_by_email(&self, user: &UserUpsert) -> Result<UpsertOutcome, SeedError> {
        let previous = self
            .users
            .write()
            .unwrap()
            .insert(user.email.clone(), user.clone());

        Ok(match previous {
            Some(_) => UpsertOutcome::Updated,
            None => UpsertOutcome::Created,
        })
    }
}

#[derive(Clone, Default)]
pub struct MemoryBlobStore {
    blobs: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

#[allow(dead_code)]
impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<Vec<u8>> {
        self.blobs.read().unwrap().get(path).cloned()
    }

    pub fn len(&self) -> usize {
        self.blobs.read().unwrap().len()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(&self, relative_path: &str, bytes: &[u8]) -> Result<(), SeedError> {
        self.blobs
            .write()
            .unwrap()
            .insert(relative_path.to_string(), bytes.to_vec());
        Ok(())
    }
}
