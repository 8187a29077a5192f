//! # Google OAuth 2.0 sign-in
//!
//! Authorization Code flow with PKCE.
//!
//! 1. **[`authorize_url`](GoogleOAuth::authorize_url)**: builds the Google
//!    consent URL for the `openid`, `email` and `profile` scopes and keeps the
//!    CSRF state and PKCE verifier in the visitor's session.
//! 2. **[`exchange_code`](GoogleOAuth::exchange_code)**: on the callback, takes
//!    both values back out of the session (so a state is usable once), checks
//!    the state, trades the code for an access token and fetches the profile
//!    from the userinfo endpoint.
//! 3. **[`resolve_google_user`]**: find-or-create keyed by the profile's
//!    subject id, naming new users after their email address.

use oauth2::basic::BasicClient;
use oauth2::{
    AuthorizationCode, CsrfToken, EndpointNotSet, EndpointSet, PkceCodeChallenge,
    PkceCodeVerifier, Scope, TokenResponse,
};
use serde::Deserialize;
use store::{User, UserRepository};
use tower_sessions::Session;

use super::config::OAuthConfig;
use super::AuthError;

const OAUTH_STATE_KEY: &str = "oauth_state";
const OAUTH_VERIFIER_KEY: &str = "oauth_pkce_verifier";

/// Profile returned by Google's v3 userinfo endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleProfile {
    /// Stable Google account id.
    pub sub: String,
    pub email: Option<String>,
}

/// OAuth client type with auth URL and token URL set.
type ConfiguredClient = oauth2::Client<
    oauth2::basic::BasicErrorResponse,
    oauth2::basic::BasicTokenResponse,
    oauth2::basic::BasicTokenIntrospectionResponse,
    oauth2::StandardRevocableToken,
    oauth2::basic::BasicRevocationErrorResponse,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

/// Google OAuth handler.
#[derive(Debug, Clone)]
pub struct GoogleOAuth {
    config: OAuthConfig,
    http: reqwest::Client,
}

impl GoogleOAuth {
    pub fn new(config: OAuthConfig) -> Result<Self, AuthError> {
        // Token exchange must not follow redirects.
        let http = reqwest::ClientBuilder::new()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self { config, http })
    }

    fn create_client(&self) -> ConfiguredClient {
        BasicClient::new(self.config.client_id.clone())
            .set_client_secret(self.config.client_secret.clone())
            .set_auth_uri(self.config.auth_url.clone())
            .set_token_uri(self.config.token_url.clone())
            .set_redirect_uri(self.config.redirect_url.clone())
    }

    /// Build the consent URL and remember its state and verifier in `session`.
    pub async fn authorize_url(&self, session: &Session) -> Result<String, AuthError> {
        let (pkce_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();

        let (auth_url, csrf_state) = self
            .create_client()
            .authorize_url(CsrfToken::new_random)
            .add_scope(Scope::new("openid".to_string()))
            .add_scope(Scope::new("email".to_string()))
            .add_scope(Scope::new("profile".to_string()))
            .set_pkce_challenge(pkce_challenge)
            .url();

        session.insert(OAUTH_STATE_KEY, csrf_state.secret()).await?;
        session
            .insert(OAUTH_VERIFIER_KEY, pkce_verifier.secret())
            .await?;

        Ok(auth_url.to_string())
    }

    /// Exchange the callback's code for the signed-in Google profile.
    pub async fn exchange_code(
        &self,
        session: &Session,
        code: &str,
        state: &str,
    ) -> Result<GoogleProfile, AuthError> {
        let expected: Option<String> = session.remove(OAUTH_STATE_KEY).await?;
        let verifier: Option<String> = session.remove(OAUTH_VERIFIER_KEY).await?;
        let (Some(expected), Some(verifier)) = (expected, verifier) else {
            return Err(AuthError::InvalidState);
        };
        if expected != state {
            return Err(AuthError::InvalidState);
        }

        let token = self
            .create_client()
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .set_pkce_verifier(PkceCodeVerifier::new(verifier))
            .request_async(&self.http)
            .await
            .map_err(|e| AuthError::OAuth(format!("Token exchange failed: {e}")))?;

        let profile = self
            .http
            .get(self.config.userinfo_url.clone())
            .bearer_auth(token.access_token().secret())
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(profile)
    }
}

/// Find the user for a Google profile, creating one on first sign-in.
pub async fn resolve_google_user<S: UserRepository>(
    store: &S,
    profile: &GoogleProfile,
) -> Result<User, AuthError> {
    let email = profile
        .email
        .as_deref()
        .filter(|email| !email.is_empty())
        .ok_or(AuthError::MissingEmail)?;
    Ok(store.find_or_create_by_google_id(&profile.sub, email).await?)
}
