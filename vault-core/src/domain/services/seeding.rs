use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use base64::prelude::*;
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::domain::{
    models::{
        looks_like_svg, AvatarExtension, SeedEntry, SeedReport, UpsertOutcome, UserUpsert,
    },
    ports::outbound::{BlobStore, Cipher, UserRepository},
    SeedError,
};

use super::open_record;

pub const DEFAULT_AVATAR_DIRECTORY: &str = "avatars";

/// Everything a generated seeder needs to materialize its encrypted entries.
#[derive(Clone)]
pub struct SeedContext {
    users: Arc<dyn UserRepository>,
    blobs: Arc<dyn BlobStore>,
    cipher: Arc<dyn Cipher>,
    avatar_directory: String,
}

impl SeedContext {
    pub fn new(
        users: Arc<dyn UserRepository>,
        blobs: Arc<dyn BlobStore>,
        cipher: Arc<dyn Cipher>,
    ) -> Self {
        Self {
            users,
            blobs,
            cipher,
            avatar_directory: DEFAULT_AVATAR_DIRECTORY.to_string(),
        }
    }

    pub fn with_avatar_directory(mut self, directory: impl Into<String>) -> Self {
        self.avatar_directory = directory.into();
        self
    }

    /// Decodes `base64`, picks `.svg` or `.jpg` from the decoded bytes and stores them under a
    /// fresh UUID name. Returns the path relative to the blob store root.
    pub async fn save_from_base64(&self, base64: &str, directory: &str) -> Result<String, SeedError> {
        let bytes = BASE64_STANDARD.decode(base64.trim())?;
        let extension = if looks_like_svg(&bytes) {
            AvatarExtension::Svg
        } else {
            AvatarExtension::Jpg
        };

        let filename = format!("{}.{extension}", Uuid::new_v4());
        let directory = directory.trim_matches('/');
        let relative_path = if directory.is_empty() {
            filename
        } else {
            format!("{directory}/{filename}")
        };

        self.blobs.put(&relative_path, &bytes).await?;
        Ok(relative_path)
    }

    #[instrument(skip_all)]
    pub async fn upsert(&self, entry: &SeedEntry<'_>) -> Result<UpsertOutcome, SeedError> {
        let user = open_record(entry, self.cipher.as_ref())?;
        let password_hash = hash_password(&user.password)?;
        let avatar_url = self
            .save_from_base64(&user.avatar_base64, &self.avatar_directory)
            .await?;

        self.users
            .upsert_by_email(&UserUpsert {
                email: user.email,
                name: user.name,
                password_hash,
                avatar_url,
            })
            .await
    }

    /// Upserts every entry in order. A failing entry is logged and counted, never fatal.
    pub async fn run(&self, entries: &[SeedEntry<'_>]) -> Result<SeedReport, SeedError> {
        let mut report = SeedReport::default();

        for (index, entry) in entries.iter().enumerate() {
            match self.upsert(entry).await {
                Ok(outcome) => report.record(outcome),
                Err(err) => {
                    error!("failed to seed user #{}: {err}", index + 1);
                    report.failed += 1;
                }
            }
        }

        info!(
            "seeded users: {} created, {} updated, {} failed",
            report.created, report.updated, report.failed
        );
        Ok(report)
    }
}

fn hash_password(password: &str) -> Result<String, SeedError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| SeedError::PasswordHash(err.to_string()))
}

#[cfg(test)]
mod tests {
    use argon2::{PasswordHash, PasswordVerifier};

    use super::*;
    use crate::domain::{
        models::{EncryptedUserRecord, PlainUser},
        services::build_record,
    };
    use crate::test_support::{MemoryBlobStore, MockUserRepository, TestCipher, SVG};

    struct Harness {
        users: Arc<MockUserRepository>,
        blobs: Arc<MemoryBlobStore>,
        ctx: SeedContext,
    }

    fn harness() -> Harness {
        let users = Arc::new(MockUserRepository::new());
        let blobs = Arc::new(MemoryBlobStore::new());
        let ctx = SeedContext::new(users.clone(), blobs.clone(), Arc::new(TestCipher));
        Harness { users, blobs, ctx }
    }

    fn encrypted(name: &str, email: &str, password: &str, avatar: &[u8]) -> EncryptedUserRecord {
        let user = PlainUser::new(name, email, password, BASE64_STANDARD.encode(avatar));
        build_record(&user, &TestCipher).unwrap()
    }

    #[tokio::test]
    async fn save_from_base64_picks_extension_from_content() {
        let h = harness();

        let jpg = h
            .ctx
            .save_from_base64(&BASE64_STANDARD.encode([0xFFu8, 0xD8, 0xFF]), "avatars")
            .await
            .unwrap();
        let svg = h
            .ctx
            .save_from_base64(&BASE64_STANDARD.encode(SVG), "avatars/")
            .await
            .unwrap();

        assert!(jpg.starts_with("avatars/") && jpg.ends_with(".jpg"), "{jpg}");
        assert!(svg.starts_with("avatars/") && svg.ends_with(".svg"), "{svg}");
        assert_eq!(h.blobs.get(&svg).unwrap(), SVG.as_bytes());
    }

    #[tokio::test]
    async fn file_names_do_not_collide() {
        let h = harness();
        let payload = BASE64_STANDARD.encode(b"same bytes");

        let a = h.ctx.save_from_base64(&payload, "avatars").await.unwrap();
        let b = h.ctx.save_from_base64(&payload, "avatars").await.unwrap();

        assert_ne!(a, b);
        assert_eq!(h.blobs.len(), 2);
    }

    #[tokio::test]
    async fn invalid_base64_is_a_decode_error() {
        let h = harness();
        let err = h.ctx.save_from_base64("***", "avatars").await.unwrap_err();
        assert!(matches!(err, SeedError::Decode(_)));
    }

    #[tokio::test]
    async fn upsert_decrypts_hashes_and_stores_avatar() {
        let h = harness();
        let record = encrypted("Ada", "ada@example.com", "s3cr3t", &[0xFF, 0xD8, 0xFF, 0xE0]);

        let outcome = h.ctx.upsert(&record.as_entry()).await.unwrap();

        assert_eq!(outcome, UpsertOutcome::Created);
        let stored = h.users.get("ada@example.com").unwrap();
        assert_eq!(stored.name, "Ada");
        assert_ne!(stored.password_hash, "s3cr3t");
        let parsed = PasswordHash::new(&stored.password_hash).unwrap();
        assert!(Argon2::default().verify_password(b"s3cr3t", &parsed).is_ok());
        assert!(stored.avatar_url.starts_with("avatars/"));
        assert_eq!(h.blobs.get(&stored.avatar_url).unwrap(), [0xFF, 0xD8, 0xFF, 0xE0]);
    }

    #[tokio::test]
    async fn same_email_twice_is_one_user() {
        let h = harness();
        let first = encrypted("Ada", "ada@example.com", "one", b"a");
        let second = encrypted("Ada Lovelace", "ada@example.com", "two", b"b");

        let report = h
            .ctx
            .run(&[first.as_entry(), second.as_entry()])
            .await
            .unwrap();

        assert_eq!(report, SeedReport { created: 1, updated: 1, failed: 0 });
        assert_eq!(h.users.len(), 1);
        assert_eq!(h.users.get("ada@example.com").unwrap().name, "Ada Lovelace");
    }

    #[tokio::test]
    async fn undecryptable_entry_is_counted_and_skipped() {
        let h = harness();
        let good = encrypted("Grace", "grace@example.com", "hopper", b"g");
        let mut bad = encrypted("Bad", "bad@example.com", "x", b"x");
        bad.email = "not-a-ciphertext".to_string();

        let report = h.ctx.run(&[bad.as_entry(), good.as_entry()]).await.unwrap();

        assert_eq!(report, SeedReport { created: 1, updated: 0, failed: 1 });
        assert!(h.users.get("grace@example.com").is_some());
    }

    #[tokio::test]
    async fn custom_avatar_directory_is_used() {
        let users = Arc::new(MockUserRepository::new());
        let ctx = SeedContext::new(
            users.clone(),
            Arc::new(MemoryBlobStore::new()),
            Arc::new(TestCipher),
        )
        .with_avatar_directory("profile-pictures");
        let record = encrypted("Ada", "ada@example.com", "pw", b"a");

        ctx.upsert(&record.as_entry()).await.unwrap();

        assert!(users
            .get("ada@example.com")
            .unwrap()
            .avatar_url
            .starts_with("profile-pictures/"));
    }
}
