//! Session identity.
//!
//! A session holds nothing but the user id under [`SESSION_USER_ID_KEY`].
//! Handlers get the user through the [`MaybeUser`] and [`AuthUser`] extractors,
//! which resolve that id against the store on every request. An id that no
//! longer resolves is treated as an anonymous request rather than an error.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};
use store::{User, UserRepository};
use tower_sessions::Session;
use tracing::debug;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

/// Key for storing the user id in the session.
pub const SESSION_USER_ID_KEY: &str = "user_id";

/// Bind `user` to the session, rotating the session id.
pub async fn log_in(session: &Session, user: &User) -> Result<(), AppError> {
    session.cycle_id().await?;
    session.insert(SESSION_USER_ID_KEY, user.id).await?;
    Ok(())
}

/// Drop the session and its record.
pub async fn log_out(session: &Session) -> Result<(), AppError> {
    session.flush().await?;
    Ok(())
}

/// Resolve the session's user id to a full user, if any.
pub async fn current_user<S: UserRepository>(
    session: &Session,
    store: &S,
) -> Result<Option<User>, AppError> {
    let Some(user_id) = session.get::<Uuid>(SESSION_USER_ID_KEY).await? else {
        return Ok(None);
    };
    let user = store.find_user(user_id).await?;
    if user.is_none() {
        debug!("Session refers to missing user {user_id}");
    }
    Ok(user)
}

async fn session_from_parts<S: store::Store>(
    parts: &mut Parts,
    state: &AppState<S>,
) -> Result<Session, AppError> {
    Session::from_request_parts(parts, state)
        .await
        .map_err(|(_, msg)| AppError::Internal(msg.to_string()))
}

/// The signed-in user, or `None` for anonymous requests.
pub struct MaybeUser(pub Option<User>);

impl MaybeUser {
    pub fn is_signed_in(&self) -> bool {
        self.0.is_some()
    }
}

impl<S: store::Store> FromRequestParts<AppState<S>> for MaybeUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<S>,
    ) -> Result<Self, Self::Rejection> {
        let session = session_from_parts(parts, state).await?;
        Ok(Self(current_user(&session, &state.store).await?))
    }
}

/// The signed-in user. Anonymous requests are redirected to `/login` before the
/// handler runs.
pub struct AuthUser(pub User);

impl<S: store::Store> FromRequestParts<AppState<S>> for AuthUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<S>,
    ) -> Result<Self, Self::Rejection> {
        let MaybeUser(user) = MaybeUser::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;
        user.map(Self)
            .ok_or_else(|| Redirect::to("/login").into_response())
    }
}
