//! Authentication: session identity, local username/password accounts, and
//! Google OAuth2 sign-in.

mod config;
mod google;
pub mod local;
mod password;
mod session;

use thiserror::Error;

pub use config::OAuthConfig;
pub use google::{resolve_google_user, GoogleOAuth, GoogleProfile};
pub use password::{hash_password, verify_password};
pub use session::{current_user, log_in, log_out, AuthUser, MaybeUser, SESSION_USER_ID_KEY};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("username is already taken")]
    UsernameTaken,

    #[error("username and password are required")]
    MissingCredentials,

    #[error("password hashing failed: {0}")]
    PasswordHash(String),

    #[error("invalid or expired OAuth state")]
    InvalidState,

    #[error("OAuth error: {0}")]
    OAuth(String),

    #[error("Google profile has no email address")]
    MissingEmail,

    #[error("invalid OAuth configuration: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error(transparent)]
    Store(#[from] store::StoreError),
}
