//! Local username/password accounts.

use store::{NewUser, StoreError, User, UserRepository};

use super::{hash_password, verify_password, AuthError};

/// Create a local account. The caller logs the new user in.
pub async fn register<S: UserRepository>(
    store: &S,
    username: &str,
    password: &str,
) -> Result<User, AuthError> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(AuthError::MissingCredentials);
    }

    let password_hash = hash_password(password)?;
    match store.create_user(NewUser::local(username, password_hash)).await {
        Ok(user) => Ok(user),
        Err(StoreError::UsernameTaken(_)) => Err(AuthError::UsernameTaken),
        Err(err) => Err(err.into()),
    }
}

/// Check credentials. `None` covers unknown users, accounts without a
/// password (Google sign-in only) and wrong passwords alike.
pub async fn authenticate<S: UserRepository>(
    store: &S,
    username: &str,
    password: &str,
) -> Result<Option<User>, AuthError> {
    let Some(user) = store.find_user_by_username(username.trim()).await? else {
        return Ok(None);
    };
    let Some(hash) = user.password_hash.as_deref() else {
        return Ok(None);
    };
    if verify_password(password, hash)? {
        Ok(Some(user))
    } else {
        Ok(None)
    }
}
