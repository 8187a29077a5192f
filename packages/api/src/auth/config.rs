//! OAuth configuration built from [`crate::settings::Google`].

use oauth2::{AuthUrl, ClientId, ClientSecret, RedirectUrl, TokenUrl};
use url::Url;

use super::AuthError;
use crate::settings;

/// OAuth provider configuration.
#[derive(Debug, Clone)]
pub struct OAuthConfig {
    pub client_id: ClientId,
    pub client_secret: ClientSecret,
    pub auth_url: AuthUrl,
    pub token_url: TokenUrl,
    pub redirect_url: RedirectUrl,
    pub userinfo_url: Url,
}

impl OAuthConfig {
    /// Validate the Google settings into typed endpoints.
    pub fn google(settings: &settings::Google) -> Result<Self, AuthError> {
        let invalid = |what: &str, e: url::ParseError| AuthError::Config(format!("{what}: {e}"));

        Ok(Self {
            client_id: ClientId::new(settings.client_id.clone()),
            client_secret: ClientSecret::new(settings.client_secret.clone()),
            auth_url: AuthUrl::new(settings.auth_url.clone())
                .map_err(|e| invalid("google.auth_url", e))?,
            token_url: TokenUrl::new(settings.token_url.clone())
                .map_err(|e| invalid("google.token_url", e))?,
            redirect_url: RedirectUrl::new(settings.redirect_url.clone())
                .map_err(|e| invalid("google.redirect_url", e))?,
            userinfo_url: Url::parse(&settings.userinfo_url)
                .map_err(|e| invalid("google.userinfo_url", e))?,
        })
    }
}
