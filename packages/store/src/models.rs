//! # Domain models for users and secrets
//!
//! Defines the records persisted by every [`crate::Store`] backend.
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`User`] | A full row of the `users` table. Local accounts carry a `password_hash`, Google accounts carry a `google_id`; both have a unique `username`. |
//! | [`UserInfo`] | The subset of a user that views are allowed to see (no password hash, no provider id). |
//! | [`Secret`] | A row of the `secrets` table. `owner_id` is `None` only between creation and linking. |
//! | [`NewUser`] | Insert payload for [`crate::UserRepository::create_user`]. |
//!
//! Secrets point at their owner rather than users holding a list of secret ids,
//! so "is this my secret" is a field comparison and a user's owned set is the
//! set of secrets whose `owner_id` matches.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Full user record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password_hash: Option<String>,
    pub google_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Project into the view-safe [`UserInfo`].
    pub fn to_info(&self) -> UserInfo {
        UserInfo {
            id: self.id,
            username: self.username.clone(),
            federated: self.google_id.is_some(),
        }
    }
}

/// User information safe to hand to views.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: Uuid,
    pub username: String,
    /// Signed in through Google rather than a local password.
    pub federated: bool,
}

/// Fields needed to insert a user.
#[derive(Clone, Debug, Default)]
pub struct NewUser {
    pub username: String,
    pub password_hash: Option<String>,
    pub google_id: Option<String>,
}

impl NewUser {
    /// A local account with an already-hashed password.
    pub fn local(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: Some(password_hash.into()),
            google_id: None,
        }
    }

    /// A federated account keyed by its Google subject id.
    pub fn google(username: impl Into<String>, google_id: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: None,
            google_id: Some(google_id.into()),
        }
    }
}

/// Longest secret body accepted, in characters.
pub const MAX_SECRET_LEN: usize = 5000;

/// A user-submitted text record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Secret {
    pub id: Uuid,
    pub body: String,
    pub owner_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Secret {
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner_id == Some(user_id)
    }
}

/// Sort secrets newest-updated first.
///
/// Ties keep their relative order.
pub fn sort_by_recently_updated(secrets: &mut [Secret]) {
    secrets.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn secret_at(body: &str, minutes: i64) -> Secret {
        let at = DateTime::<Utc>::UNIX_EPOCH + Duration::minutes(minutes);
        Secret {
            id: Uuid::new_v4(),
            body: body.to_string(),
            owner_id: None,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn test_sort_by_recently_updated() {
        let mut secrets = vec![secret_at("old", 1), secret_at("new", 30), secret_at("mid", 10)];
        sort_by_recently_updated(&mut secrets);

        let bodies: Vec<_> = secrets.iter().map(|s| s.body.as_str()).collect();
        assert_eq!(bodies, ["new", "mid", "old"]);
    }

    #[test]
    fn test_user_info_hides_credentials() {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: "ada@example.com".to_string(),
            password_hash: None,
            google_id: Some("10987".to_string()),
            created_at: now,
            updated_at: now,
        };

        let info = user.to_info();
        assert_eq!(info.id, user.id);
        assert_eq!(info.username, "ada@example.com");
        assert!(info.federated);
    }
}
