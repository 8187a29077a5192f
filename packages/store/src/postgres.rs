//! # PostgreSQL backend
//!
//! [`PgStore`] implements the repository traits with runtime-checked `sqlx`
//! queries against the schema in `migrations/`. The pool is created once by the
//! binary and handed in explicitly; nothing here is a process-wide singleton.
//!
//! Find-or-create is a single `INSERT .. ON CONFLICT (google_id)` statement, so
//! two concurrent first logins with the same Google account resolve to one row.
//! Linking a secret is a conditional `UPDATE` that only succeeds while the
//! secret is unowned (or already owned by the same user). Deleting a secret
//! drops the row and stamps the acting user in one transaction.
//!
//! The tests below need a live database and are ignored by default:
//! `DATABASE_URL=postgres://... cargo test -p store -- --ignored`.

use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{NewUser, Secret, User};
use crate::repo::{SecretRepository, StoreResult, UserRepository};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

const UNIQUE_VIOLATION: &str = "23505";

/// Store backed by a PostgreSQL connection pool.
#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool against `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Apply pending schema migrations.
    pub async fn migrate(&self) -> StoreResult<()> {
        MIGRATOR.run(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION)
    )
}

impl SecretRepository for PgStore {
    async fn create_secret(&self, body: &str) -> StoreResult<Secret> {
        let secret = sqlx::query_as("INSERT INTO secrets (body) VALUES ($1) RETURNING *")
            .bind(body)
            .fetch_one(&self.pool)
            .await?;
        Ok(secret)
    }

    async fn list_secrets(&self) -> StoreResult<Vec<Secret>> {
        let secrets = sqlx::query_as("SELECT * FROM secrets")
            .fetch_all(&self.pool)
            .await?;
        Ok(secrets)
    }

    async fn find_secret(&self, id: Uuid) -> StoreResult<Option<Secret>> {
        let secret = sqlx::query_as("SELECT * FROM secrets WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(secret)
    }

    async fn update_secret_body(&self, id: Uuid, body: &str) -> StoreResult<Option<Secret>> {
        let secret = sqlx::query_as(
            "UPDATE secrets SET body = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(body)
        .fetch_optional(&self.pool)
        .await?;
        Ok(secret)
    }

    async fn delete_secret(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM secrets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

impl UserRepository for PgStore {
    async fn create_user(&self, user: NewUser) -> StoreResult<User> {
        sqlx::query_as(
            "INSERT INTO users (username, password_hash, google_id) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&user.google_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                StoreError::UsernameTaken(user.username.clone())
            } else {
                StoreError::Database(err)
            }
        })
    }

    async fn find_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        let user = sqlx::query_as("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let user = sqlx::query_as("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_user_with_secrets(&self, id: Uuid) -> StoreResult<Option<(User, Vec<Secret>)>> {
        let Some(user) = self.find_user(id).await? else {
            return Ok(None);
        };
        let secrets = sqlx::query_as(
            "SELECT * FROM secrets WHERE owner_id = $1 ORDER BY created_at",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;
        Ok(Some((user, secrets)))
    }

    async fn find_or_create_by_google_id(&self, google_id: &str, username: &str) -> StoreResult<User> {
        // The no-op update makes RETURNING yield the existing row on conflict.
        sqlx::query_as(
            r#"
            INSERT INTO users (username, google_id)
            VALUES ($1, $2)
            ON CONFLICT (google_id)
            DO UPDATE SET google_id = EXCLUDED.google_id
            RETURNING *
            "#,
        )
        .bind(username)
        .bind(google_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                StoreError::UsernameTaken(username.to_string())
            } else {
                StoreError::Database(err)
            }
        })
    }

    async fn add_secret_ref(&self, user_id: Uuid, secret_id: Uuid) -> StoreResult<()> {
        let mut tx = self.pool.begin().await?;

        let touched = sqlx::query("UPDATE users SET updated_at = NOW() WHERE id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        if touched.rows_affected() == 0 {
            return Err(StoreError::UserNotFound(user_id));
        }

        let linked = sqlx::query(
            "UPDATE secrets SET owner_id = $1 WHERE id = $2 AND (owner_id IS NULL OR owner_id = $1)",
        )
        .bind(user_id)
        .bind(secret_id)
        .execute(&mut *tx)
        .await?;
        if linked.rows_affected() == 0 {
            let exists: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM secrets WHERE id = $1")
                .bind(secret_id)
                .fetch_optional(&mut *tx)
                .await?;
            return Err(match exists {
                Some(_) => StoreError::AlreadyOwned { secret_id },
                None => StoreError::SecretNotFound(secret_id),
            });
        }

        tx.commit().await?;
        Ok(())
    }

    async fn delete_secret_for_user(&self, user_id: Uuid, secret_id: Uuid) -> StoreResult<bool> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM secrets WHERE id = $1")
            .bind(secret_id)
            .execute(&mut *tx)
            .await?;
        if deleted.rows_affected() == 0 {
            return Ok(false);
        }

        sqlx::query("UPDATE users SET updated_at = NOW() WHERE id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }
}
