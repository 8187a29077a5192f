//! HTTP routes.
//!
//! | Path | Verb | Handler |
//! |------|------|---------|
//! | `/` | GET | [`home`] |
//! | `/login` | GET, POST | [`login_form`], [`login`] |
//! | `/register` | GET, POST | [`register_form`], [`register`] |
//! | `/logout` | GET | [`logout`] |
//! | `/auth/google` | GET | [`google_login`] |
//! | `/auth/google/secrets` | GET | [`google_callback`] |
//! | `/secrets` | GET | [`list_secrets`] |
//! | `/submit` | GET, POST | [`submit_form`], [`submit`] |
//! | `/mysecrets` | GET, DELETE | [`my_secrets`], [`delete_secret`] |
//! | `/mysecrets/{id}/edit` | GET | [`edit_form`] |
//! | `/mysecrets/{id}` | PUT | [`update_secret`] |

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, put};
use axum::{Form, Router};
use serde::Deserialize;
use store::Store;
use tower_sessions::Session;
use tracing::{info, warn};

use crate::auth::{self, local, AuthError, AuthUser, MaybeUser};
use crate::error::AppError;
use crate::secrets;
use crate::state::AppState;

/// Build the application router over `state`.
///
/// The router expects a `tower_sessions` session layer around it.
pub fn router<S: Store>(state: AppState<S>) -> Router {
    Router::new()
        .route("/", get(home::<S>))
        .route("/login", get(login_form).post(login::<S>))
        .route("/register", get(register_form).post(register::<S>))
        .route("/logout", get(logout))
        .route("/auth/google", get(google_login::<S>))
        .route("/auth/google/secrets", get(google_callback::<S>))
        .route("/secrets", get(list_secrets::<S>))
        .route("/submit", get(submit_form::<S>).post(submit::<S>))
        .route(
            "/mysecrets",
            get(my_secrets::<S>).delete(delete_secret::<S>),
        )
        .route("/mysecrets/{id}/edit", get(edit_form::<S>))
        .route("/mysecrets/{id}", put(update_secret::<S>))
        .fallback(not_found::<S>)
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SubmitForm {
    pub secret: String,
}

#[derive(Debug, Deserialize)]
pub struct EditForm {
    #[serde(rename = "changedSecret")]
    pub changed_secret: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    #[serde(rename = "deleteSecret")]
    pub delete_secret: String,
}

#[derive(Debug, Deserialize)]
pub struct OAuthCallback {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

pub async fn home<S: Store>(user: MaybeUser) -> Html<String> {
    Html(ui::views::home_page(user.is_signed_in()))
}

pub async fn login_form() -> Html<String> {
    Html(ui::views::login_page())
}

pub async fn register_form() -> Html<String> {
    Html(ui::views::register_page())
}

pub async fn register<S: Store>(
    State(state): State<AppState<S>>,
    session: Session,
    Form(form): Form<Credentials>,
) -> Result<Redirect, AppError> {
    match local::register(&state.store, &form.username, &form.password).await {
        Ok(user) => {
            auth::log_in(&session, &user).await?;
            info!(user_id = %user.id, "Registered local user");
            Ok(Redirect::to("/secrets"))
        }
        Err(err @ (AuthError::UsernameTaken | AuthError::MissingCredentials)) => {
            warn!("Registration rejected: {err}");
            Ok(Redirect::to("/register"))
        }
        Err(err) => Err(err.into()),
    }
}

pub async fn login<S: Store>(
    State(state): State<AppState<S>>,
    session: Session,
    Form(form): Form<Credentials>,
) -> Result<Redirect, AppError> {
    match local::authenticate(&state.store, &form.username, &form.password).await? {
        Some(user) => {
            auth::log_in(&session, &user).await?;
            info!(user_id = %user.id, "Local login");
            Ok(Redirect::to("/secrets"))
        }
        None => {
            warn!("Rejected login attempt");
            Ok(Redirect::to("/login"))
        }
    }
}

pub async fn logout(session: Session) -> Result<Redirect, AppError> {
    auth::log_out(&session).await?;
    Ok(Redirect::to("/"))
}

pub async fn google_login<S: Store>(
    State(state): State<AppState<S>>,
    session: Session,
) -> Result<Redirect, AppError> {
    let url = state.google.authorize_url(&session).await?;
    Ok(Redirect::to(&url))
}

/// Every failure lands back on `/login`.
pub async fn google_callback<S: Store>(
    State(state): State<AppState<S>>,
    session: Session,
    Query(params): Query<OAuthCallback>,
) -> Result<Redirect, AppError> {
    if let Some(error) = params.error {
        warn!("Google sign-in was not granted: {error}");
        return Ok(Redirect::to("/login"));
    }
    let (Some(code), Some(csrf_state)) = (params.code, params.state) else {
        warn!("Google callback without code or state");
        return Ok(Redirect::to("/login"));
    };

    let profile = match state.google.exchange_code(&session, &code, &csrf_state).await {
        Ok(profile) => profile,
        Err(err) => {
            warn!("Google OAuth exchange failed: {err}");
            return Ok(Redirect::to("/login"));
        }
    };
    let user = match auth::resolve_google_user(&state.store, &profile).await {
        Ok(user) => user,
        Err(err) => {
            warn!("Could not resolve Google user: {err}");
            return Ok(Redirect::to("/login"));
        }
    };

    auth::log_in(&session, &user).await?;
    info!(user_id = %user.id, "Google login");
    Ok(Redirect::to("/secrets"))
}

pub async fn list_secrets<S: Store>(
    State(state): State<AppState<S>>,
    user: MaybeUser,
) -> Result<Html<String>, AppError> {
    let secrets = secrets::all_secrets(&state.store).await?;
    Ok(Html(ui::views::secrets_page(user.is_signed_in(), secrets)))
}

pub async fn my_secrets<S: Store>(
    State(state): State<AppState<S>>,
    AuthUser(user): AuthUser,
) -> Result<Response, AppError> {
    let Some((user, secrets)) = state.store.find_user_with_secrets(user.id).await? else {
        return Ok(Redirect::to("/login").into_response());
    };
    Ok(Html(ui::views::my_secrets_page(user.to_info(), secrets)).into_response())
}

pub async fn submit_form<S: Store>(user: MaybeUser) -> Response {
    if user.is_signed_in() {
        Html(ui::views::submit_page()).into_response()
    } else {
        Redirect::to("/login").into_response()
    }
}

pub async fn submit<S: Store>(
    State(state): State<AppState<S>>,
    AuthUser(user): AuthUser,
    Form(form): Form<SubmitForm>,
) -> Result<Redirect, AppError> {
    let Some(body) = secrets::validate_body(&form.secret) else {
        return Ok(Redirect::to("/submit"));
    };
    secrets::submit_secret(&state.store, &user, body).await?;
    Ok(Redirect::to("/secrets"))
}

/// Any secret can be edited by id; no session is needed.
pub async fn edit_form<S: Store>(
    State(state): State<AppState<S>>,
    user: MaybeUser,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let id = secrets::parse_secret_id(&id)?;
    let secret = secrets::find_secret(&state.store, id).await?;
    Ok(Html(ui::views::edit_page(user.is_signed_in(), secret)))
}

pub async fn update_secret<S: Store>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    Form(form): Form<EditForm>,
) -> Result<Redirect, AppError> {
    let id = secrets::parse_secret_id(&id)?;
    let Some(body) = secrets::validate_body(&form.changed_secret) else {
        return Ok(Redirect::to(&format!("/mysecrets/{id}/edit")));
    };
    secrets::edit_secret(&state.store, id, body).await?;
    Ok(Redirect::to("/mysecrets"))
}

pub async fn delete_secret<S: Store>(
    State(state): State<AppState<S>>,
    AuthUser(user): AuthUser,
    Form(form): Form<DeleteForm>,
) -> Result<Redirect, AppError> {
    let id = secrets::parse_secret_id(&form.delete_secret)?;
    secrets::delete_secret(&state.store, &user, id).await?;
    Ok(Redirect::to("/mysecrets"))
}

pub async fn not_found<S: Store>(user: MaybeUser) -> (StatusCode, Html<String>) {
    (
        StatusCode::NOT_FOUND,
        Html(ui::views::not_found_page(user.is_signed_in())),
    )
}
