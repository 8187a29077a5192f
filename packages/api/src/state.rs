use std::sync::Arc;

use store::Store;

use crate::auth::GoogleOAuth;

/// Router state: the storage backend and the Google OAuth client.
#[derive(Clone)]
pub struct AppState<S> {
    pub store: S,
    pub google: Arc<GoogleOAuth>,
}

impl<S: Store> AppState<S> {
    pub fn new(store: S, google: GoogleOAuth) -> Self {
        Self {
            store,
            google: Arc::new(google),
        }
    }
}
