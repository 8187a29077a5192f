//! # Secret flow
//!
//! The operations behind the secret routes. Submitting needs the signed-in
//! [`User`], who becomes the owner. Editing and deleting address a secret by id
//! alone, whoever owns it; an unknown or unparseable id is
//! [`AppError::NotFound`].
//!
//! | Function | Effect |
//! |----------|--------|
//! | [`submit_secret`] | Creates an unowned secret and links it to the user. |
//! | [`all_secrets`] | Every secret, newest-updated first. |
//! | [`find_secret`] | A single secret by id. |
//! | [`edit_secret`] | Replaces the body of a secret. |
//! | [`delete_secret`] | Removes a secret and pulls it from the acting user's set. |

use store::{sort_by_recently_updated, Secret, Store, User, MAX_SECRET_LEN};
use tracing::{error, info};
use uuid::Uuid;

use crate::error::AppError;

/// Trimmed body, or `None` when it is empty or too long.
pub fn validate_body(raw: &str) -> Option<&str> {
    let body = raw.trim();
    if body.is_empty() || body.chars().count() > MAX_SECRET_LEN {
        None
    } else {
        Some(body)
    }
}

/// Parse a secret id from a path or form field.
pub fn parse_secret_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::NotFound)
}

pub async fn submit_secret<S: Store>(store: &S, user: &User, body: &str) -> Result<Secret, AppError> {
    let mut secret = store.create_secret(body).await?;
    if let Err(err) = store.add_secret_ref(user.id, secret.id).await {
        // Do not leave an unowned secret behind.
        if let Err(cleanup) = store.delete_secret(secret.id).await {
            error!("Failed to remove unlinked secret {}: {cleanup}", secret.id);
        }
        return Err(err.into());
    }
    secret.owner_id = Some(user.id);
    info!(user_id = %user.id, secret_id = %secret.id, "Secret submitted");
    Ok(secret)
}

pub async fn all_secrets<S: Store>(store: &S) -> Result<Vec<Secret>, AppError> {
    let mut secrets = store.list_secrets().await?;
    sort_by_recently_updated(&mut secrets);
    Ok(secrets)
}

pub async fn find_secret<S: Store>(store: &S, id: Uuid) -> Result<Secret, AppError> {
    store.find_secret(id).await?.ok_or(AppError::NotFound)
}

pub async fn edit_secret<S: Store>(store: &S, id: Uuid, body: &str) -> Result<Secret, AppError> {
    let secret = store
        .update_secret_body(id, body)
        .await?
        .ok_or(AppError::NotFound)?;
    info!(secret_id = %id, "Secret edited");
    Ok(secret)
}

pub async fn delete_secret<S: Store>(store: &S, user: &User, id: Uuid) -> Result<(), AppError> {
    if !store.delete_secret_for_user(user.id, id).await? {
        return Err(AppError::NotFound);
    }
    info!(user_id = %user.id, secret_id = %id, "Secret deleted");
    Ok(())
}
