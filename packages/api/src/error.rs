//! Request-level error type.
//!
//! Handlers return `Result<_, AppError>`. Not-found conditions render the 404
//! page; everything else is logged and rendered as a 500 page. Authentication
//! failures never reach this type, they are redirects.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use store::StoreError;
use thiserror::Error;
use tracing::error;

use crate::auth::AuthError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("not found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound => {
                (StatusCode::NOT_FOUND, Html(ui::views::not_found_page(false))).into_response()
            }
            err => {
                error!("Request failed: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(ui::views::server_error_page()),
                )
                    .into_response()
            }
        }
    }
}
