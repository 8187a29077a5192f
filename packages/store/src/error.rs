//! Store error type shared by all backends.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("username `{0}` is already taken")]
    UsernameTaken(String),

    #[error("secret {secret_id} is already owned by another user")]
    AlreadyOwned { secret_id: Uuid },

    #[error("user {0} not found")]
    UserNotFound(Uuid),

    #[error("secret {0} not found")]
    SecretNotFound(Uuid),

    #[cfg(feature = "postgres")]
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[cfg(feature = "postgres")]
    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}
