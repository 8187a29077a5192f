//! Layered application settings.
//!
//! Sources, lowest precedence first: built-in defaults, an optional
//! `config.toml`, `KONFESSIONS_*` environment variables (`__` separates nested
//! keys, e.g. `KONFESSIONS_GOOGLE__CLIENT_ID`), and finally the plain `PORT` and
//! `DATABASE_URL` variables most hosts set. A `.env` file is loaded first.
//!
//! `database.url`, `session.secret`, `google.client_id` and
//! `google.client_secret` have no default, so a missing value fails at startup.

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

/// Minimum length of `session.secret`; the cookie signing key needs 64 bytes.
pub const MIN_SESSION_SECRET_LEN: usize = 64;

#[derive(Debug, Clone, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

impl Server {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Database {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    pub secret: String,
    /// Mark the session cookie `Secure`; enable behind HTTPS.
    pub secure: bool,
    pub inactivity_days: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Google {
    pub client_id: String,
    pub client_secret: String,
    pub auth_url: String,
    pub token_url: String,
    pub userinfo_url: String,
    /// Must match the callback registered with Google.
    pub redirect_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: Server,
    pub database: Database,
    pub session: Session,
    pub google: Google,
}

impl Settings {
    /// Load settings from every source.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let builder = Self::defaults()?
            .add_source(
                File::with_name("config.toml")
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix("KONFESSIONS")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("server.port", std::env::var("PORT").ok())?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?;

        Self::from_config(builder.build()?)
    }

    fn defaults() -> Result<config::builder::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("database.max_connections", 5)?
            .set_default("session.secure", false)?
            .set_default("session.inactivity_days", 7)?
            .set_default("google.auth_url", "https://accounts.google.com/o/oauth2/v2/auth")?
            .set_default("google.token_url", "https://oauth2.googleapis.com/token")?
            .set_default(
                "google.userinfo_url",
                "https://www.googleapis.com/oauth2/v3/userinfo",
            )?
            .set_default(
                "google.redirect_url",
                "http://localhost:3000/auth/google/secrets",
            )
    }

    /// Deserialize and validate an already-built [`Config`].
    pub fn from_config(config: Config) -> Result<Self, ConfigError> {
        let settings: Settings = config.try_deserialize()?;
        if settings.session.secret.len() < MIN_SESSION_SECRET_LEN {
            return Err(ConfigError::Message(format!(
                "session.secret must be at least {MIN_SESSION_SECRET_LEN} bytes"
            )));
        }
        Ok(settings)
    }
}
