use async_trait::async_trait;

use crate::domain::{
    models::{UpsertOutcome, UserUpsert},
    SeedError,
};

#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Inserts a user, or updates name, password and avatar of the user with the same email.
    async fn upsert_by_email(&self, user: &UserUpsert) -> Result<UpsertOutcome, SeedError>;
}
