use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

use crate::domain::{
    models::{SchemaStatus, UpsertOutcome, UserUpsert},
    ports::outbound::UserRepository,
    SchemaError, SeedError,
};

const CREATE_USERS_TABLE: &str =
    include_str!("../../../../migrations/0001_create_users_table.sql");
const ADD_AVATAR_URL_TO_USERS_TABLE: &str =
    include_str!("../../../../migrations/0002_add_avatar_url_to_users_table.sql");

pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens (and creates if missing) the database behind `url`, e.g. `sqlite://database.sqlite`.
    pub async fn connect(url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn schema_status(&self) -> Result<SchemaStatus, SchemaError> {
        let columns: Vec<String> =
            sqlx::query_scalar("SELECT name FROM pragma_table_info('users')")
                .fetch_all(&self.pool)
                .await?;

        Ok(if columns.is_empty() {
            SchemaStatus::MissingTable
        } else if columns.iter().any(|column| column == "avatar_url") {
            SchemaStatus::Ready
        } else {
            SchemaStatus::MissingAvatarColumn
        })
    }

    /// Runs the packaged migration that fixes `status` and returns the status afterwards.
    pub async fn apply_migration(&self, status: SchemaStatus) -> Result<SchemaStatus, SchemaError> {
        let (name, sql) = match status {
            SchemaStatus::Ready => return Ok(status),
            SchemaStatus::MissingTable => ("create_users_table", CREATE_USERS_TABLE),
            SchemaStatus::MissingAvatarColumn => {
                ("add_avatar_url_to_users_table", ADD_AVATAR_URL_TO_USERS_TABLE)
            }
        };

        sqlx::raw_sql(sql).execute(&self.pool).await?;
        info!("applied migration {name}");

        self.schema_status().await
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn upsert_by_email(&self, user: &UserUpsert) -> Result<UpsertOutcome, SeedError> {
        let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM users WHERE email = ?")
            .bind(&user.email)
            .fetch_optional(&self.pool)
            .await?;

        match existing {
            Some(id) => {
                sqlx::query(
                    r#"
                    UPDATE users
                    SET name = ?, password = ?, avatar_url = ?
                    WHERE id = ?
                    "#,
                )
                .bind(&user.name)
                .bind(&user.password_hash)
                .bind(&user.avatar_url)
                .bind(id)
                .execute(&self.pool)
                .await?;

                Ok(UpsertOutcome::Updated)
            }
            None => {
                sqlx::query(
                    r#"
                    INSERT INTO users (name, email, password, avatar_url)
                    VALUES (?, ?, ?, ?)
                    "#,
                )
                .bind(&user.name)
                .bind(&user.email)
                .bind(&user.password_hash)
                .bind(&user.avatar_url)
                .execute(&self.pool)
                .await?;

                Ok(UpsertOutcome::Created)
            }
        }
    }
}
