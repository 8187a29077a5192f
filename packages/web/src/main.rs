//! Konfessions server binary: configuration, database, session store, and the
//! HTTP listener.

use anyhow::Context;
use api::auth::{GoogleOAuth, OAuthConfig};
use api::{AppState, Settings};
use axum::extract::Request;
use store::PgStore;
use tower_http::trace::TraceLayer;
use tower_sessions::cookie::{Key, SameSite};
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::load().context("failed to load settings")?;

    let store = PgStore::connect(&settings.database.url, settings.database.max_connections)
        .await
        .context("failed to connect to database")?;
    store.migrate().await.context("failed to run migrations")?;

    let session_store = PostgresStore::new(store.pool().clone());
    session_store
        .migrate()
        .await
        .context("failed to migrate session store")?;

    let key = Key::try_from(settings.session.secret.as_bytes())
        .context("session secret is too short")?;
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(settings.session.secure)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::days(
            settings.session.inactivity_days,
        )))
        .with_signed(key);

    let google = GoogleOAuth::new(OAuthConfig::google(&settings.google)?)?;
    let router = api::router(AppState::new(store, google))
        .layer(session_layer)
        .layer(TraceLayer::new_for_http());
    let service = api::into_service(router);

    let addr = settings.server.address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Server listening on {}", addr);

    axum::serve(
        listener,
        axum::ServiceExt::<Request>::into_make_service(service),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutting down");
    }
}
