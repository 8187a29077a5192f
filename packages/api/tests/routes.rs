//! Router-level tests: the full service (method override, session layer,
//! routes) over a `MemoryStore`, driven with `oneshot` and a cookie jar of one.

use api::auth::{GoogleOAuth, OAuthConfig};
use api::{settings, AppService, AppState};
use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{Method, Request, Response, StatusCode};
use http_body_util::BodyExt;
use store::{MemoryStore, SecretRepository, UserRepository};
use tower::ServiceExt;
use tower_sessions::SessionManagerLayer;

fn google() -> GoogleOAuth {
    let config = OAuthConfig::google(&settings::Google {
        client_id: "test-client".to_string(),
        client_secret: "test-secret".to_string(),
        auth_url: "https://accounts.google.com/o/oauth2/v2/auth".to_string(),
        token_url: "https://oauth2.googleapis.com/token".to_string(),
        userinfo_url: "https://www.googleapis.com/oauth2/v3/userinfo".to_string(),
        redirect_url: "http://localhost:3000/auth/google/secrets".to_string(),
    })
    .unwrap();
    GoogleOAuth::new(config).unwrap()
}

fn app_with_sessions(store: MemoryStore, sessions: tower_sessions::MemoryStore) -> AppService {
    let router = api::router(AppState::new(store, google()))
        .layer(SessionManagerLayer::new(sessions).with_secure(false));
    api::into_service(router)
}

fn app(store: MemoryStore) -> AppService {
    app_with_sessions(store, tower_sessions::MemoryStore::default())
}

struct Client {
    app: AppService,
    cookie: Option<String>,
}

impl Client {
    fn new(app: AppService) -> Self {
        Self { app, cookie: None }
    }

    async fn send(&mut self, method: Method, uri: &str, form: Option<&str>) -> Response<Body> {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(cookie) = &self.cookie {
            request = request.header(COOKIE, cookie);
        }
        let body = match form {
            Some(form) => {
                request = request.header(CONTENT_TYPE, "application/x-www-form-urlencoded");
                Body::from(form.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .app
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();

        if let Some(set_cookie) = response.headers().get(SET_COOKIE) {
            let pair = set_cookie.to_str().unwrap().split(';').next().unwrap();
            self.cookie = Some(pair.to_string());
        }
        response
    }

    async fn get(&mut self, uri: &str) -> Response<Body> {
        self.send(Method::GET, uri, None).await
    }

    async fn post(&mut self, uri: &str, form: &str) -> Response<Body> {
        self.send(Method::POST, uri, Some(form)).await
    }

    async fn register(&mut self, username: &str, password: &str) {
        let response = self
            .post("/register", &format!("username={username}&password={password}"))
            .await;
        assert_redirect(&response, "/secrets");
    }
}

fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(LOCATION)
        .expect("redirect without location")
        .to_str()
        .unwrap()
}

fn assert_redirect(response: &Response<Body>, to: &str) {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(response), to);
}

async fn text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_register_then_login_yields_a_session() {
    let mut client = Client::new(app(MemoryStore::new()));

    client.register("ada", "lovelace").await;
    let page = client.get("/mysecrets").await;
    assert_eq!(page.status(), StatusCode::OK);
    assert!(text(page).await.contains("Secrets of ada"));

    assert_redirect(&client.get("/logout").await, "/");
    assert_redirect(&client.get("/mysecrets").await, "/login");

    let response = client.post("/login", "username=ada&password=lovelace").await;
    assert_redirect(&response, "/secrets");
    assert_eq!(client.get("/mysecrets").await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_failed_login_redirects_to_login() {
    let mut client = Client::new(app(MemoryStore::new()));
    client.register("ada", "lovelace").await;
    client.get("/logout").await;

    let wrong_password = client.post("/login", "username=ada&password=babbage").await;
    assert_redirect(&wrong_password, "/login");
    let unknown_user = client.post("/login", "username=bob&password=lovelace").await;
    assert_redirect(&unknown_user, "/login");

    assert_redirect(&client.get("/mysecrets").await, "/login");
}

#[tokio::test]
async fn test_taken_username_goes_back_to_register() {
    let store = MemoryStore::new();
    let mut first = Client::new(app(store.clone()));
    first.register("ada", "lovelace").await;

    let mut second = Client::new(app(store.clone()));
    let response = second.post("/register", "username=ada&password=other").await;
    assert_redirect(&response, "/register");
    assert_redirect(&second.get("/mysecrets").await, "/login");

    let ada = store.find_user_by_username("ada").await.unwrap().unwrap();
    assert!(api::auth::verify_password("lovelace", ada.password_hash.as_deref().unwrap()).unwrap());
}

#[tokio::test]
async fn test_submit_adds_one_secret_and_one_ref() {
    let store = MemoryStore::new();
    let mut client = Client::new(app(store.clone()));
    client.register("ada", "lovelace").await;

    let form = client.get("/submit").await;
    assert_eq!(form.status(), StatusCode::OK);

    let response = client.post("/submit", "secret=I+still+sleep+with+a+night+light").await;
    assert_redirect(&response, "/secrets");

    let all = store.list_secrets().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].body, "I still sleep with a night light");

    let ada = store.find_user_by_username("ada").await.unwrap().unwrap();
    let (_, owned) = store.find_user_with_secrets(ada.id).await.unwrap().unwrap();
    assert_eq!(owned.len(), 1);
    assert_eq!(owned[0].id, all[0].id);
}

#[tokio::test]
async fn test_blank_secret_is_not_stored() {
    let store = MemoryStore::new();
    let mut client = Client::new(app(store.clone()));
    client.register("ada", "lovelace").await;

    assert_redirect(&client.post("/submit", "secret=+++").await, "/submit");
    assert!(store.list_secrets().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_anonymous_submit_is_redirected_without_mutation() {
    let store = MemoryStore::new();
    let mut client = Client::new(app(store.clone()));

    assert_redirect(&client.get("/submit").await, "/login");
    assert_redirect(&client.post("/submit", "secret=hello").await, "/login");
    assert!(store.list_secrets().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_secrets_are_listed_newest_updated_first() {
    let store = MemoryStore::new();
    let mut client = Client::new(app(store.clone()));
    client.register("ada", "lovelace").await;

    for body in ["alpha", "bravo", "charlie"] {
        client.post("/submit", &format!("secret={body}")).await;
    }
    let alpha = store
        .list_secrets()
        .await
        .unwrap()
        .into_iter()
        .find(|s| s.body == "alpha")
        .unwrap();
    let response = client
        .post(
            &format!("/mysecrets/{}?_method=PUT", alpha.id),
            "changedSecret=alpha+revised",
        )
        .await;
    assert_redirect(&response, "/mysecrets");

    // Anonymous visitors see the same feed.
    let page = text(Client::new(app(store.clone())).get("/secrets").await).await;
    let revised = page.find("alpha revised").unwrap();
    let charlie = page.find("charlie").unwrap();
    let bravo = page.find("bravo").unwrap();
    assert!(revised < charlie && charlie < bravo);
}

#[tokio::test]
async fn test_edit_keeps_id_and_owner() {
    let store = MemoryStore::new();
    let mut client = Client::new(app(store.clone()));
    client.register("ada", "lovelace").await;
    client.post("/submit", "secret=draft").await;
    let secret = store.list_secrets().await.unwrap().remove(0);

    let form = client.get(&format!("/mysecrets/{}/edit", secret.id)).await;
    assert_eq!(form.status(), StatusCode::OK);
    assert!(text(form).await.contains("draft"));

    client
        .post(
            &format!("/mysecrets/{}?_method=PUT", secret.id),
            "changedSecret=final",
        )
        .await;

    let edited = store.find_secret(secret.id).await.unwrap().unwrap();
    assert_eq!(edited.body, "final");
    assert_eq!(edited.id, secret.id);
    assert_eq!(edited.owner_id, secret.owner_id);
    assert_eq!(store.list_secrets().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_removes_secret_and_ref() {
    let store = MemoryStore::new();
    let mut client = Client::new(app(store.clone()));
    client.register("ada", "lovelace").await;
    client.post("/submit", "secret=keep+me").await;
    client.post("/submit", "secret=forget+me").await;
    let doomed = store
        .list_secrets()
        .await
        .unwrap()
        .into_iter()
        .find(|s| s.body == "forget me")
        .unwrap();

    let response = client
        .post(
            "/mysecrets?_method=DELETE",
            &format!("deleteSecret={}", doomed.id),
        )
        .await;
    assert_redirect(&response, "/mysecrets");

    assert!(store.find_secret(doomed.id).await.unwrap().is_none());
    let page = text(client.get("/mysecrets").await).await;
    assert!(page.contains("keep me"));
    assert!(!page.contains("forget me"));
}

#[tokio::test]
async fn test_edit_needs_no_session() {
    let store = MemoryStore::new();
    let mut ada = Client::new(app(store.clone()));
    ada.register("ada", "lovelace").await;
    ada.post("/submit", "secret=ada+only").await;
    let secret = store.list_secrets().await.unwrap().remove(0);

    let mut anonymous = Client::new(app(store.clone()));
    let form = anonymous.get(&format!("/mysecrets/{}/edit", secret.id)).await;
    assert_eq!(form.status(), StatusCode::OK);
    let page = text(form).await;
    assert!(page.contains("ada only"));
    assert!(page.contains("/login"));

    let edit = anonymous
        .post(
            &format!("/mysecrets/{}?_method=PUT", secret.id),
            "changedSecret=rewritten+anonymously",
        )
        .await;
    assert_redirect(&edit, "/mysecrets");

    let stored = store.find_secret(secret.id).await.unwrap().unwrap();
    assert_eq!(stored.body, "rewritten anonymously");
    assert_eq!(stored.owner_id, secret.owner_id);
}

#[tokio::test]
async fn test_any_signed_in_user_can_edit_or_delete_by_id() {
    let store = MemoryStore::new();
    let mut ada = Client::new(app(store.clone()));
    ada.register("ada", "lovelace").await;
    ada.post("/submit", "secret=ada+only").await;
    let secret = store.list_secrets().await.unwrap().remove(0);

    let mut bob = Client::new(app(store.clone()));
    bob.register("bob", "builder").await;

    assert_eq!(
        bob.get(&format!("/mysecrets/{}/edit", secret.id)).await.status(),
        StatusCode::OK
    );
    let edit = bob
        .post(
            &format!("/mysecrets/{}?_method=PUT", secret.id),
            "changedSecret=bob+was+here",
        )
        .await;
    assert_redirect(&edit, "/mysecrets");
    let stored = store.find_secret(secret.id).await.unwrap().unwrap();
    assert_eq!(stored.body, "bob was here");

    let delete = bob
        .post(
            "/mysecrets?_method=DELETE",
            &format!("deleteSecret={}", secret.id),
        )
        .await;
    assert_redirect(&delete, "/mysecrets");
    assert!(store.find_secret(secret.id).await.unwrap().is_none());
    assert!(!text(ada.get("/mysecrets").await).await.contains("bob was here"));
}

#[tokio::test]
async fn test_anonymous_delete_is_redirected_without_mutation() {
    let store = MemoryStore::new();
    let mut ada = Client::new(app(store.clone()));
    ada.register("ada", "lovelace").await;
    ada.post("/submit", "secret=keep+me").await;
    let secret = store.list_secrets().await.unwrap().remove(0);

    let mut anonymous = Client::new(app(store.clone()));
    let delete = anonymous
        .post(
            "/mysecrets?_method=DELETE",
            &format!("deleteSecret={}", secret.id),
        )
        .await;
    assert_redirect(&delete, "/login");
    assert!(store.find_secret(secret.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_malformed_ids_and_unknown_paths_are_not_found() {
    let mut client = Client::new(app(MemoryStore::new()));
    client.register("ada", "lovelace").await;

    assert_eq!(
        client.get("/mysecrets/not-an-id/edit").await.status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        client.get("/definitely/not/here").await.status(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_session_for_missing_user_is_anonymous() {
    let sessions = tower_sessions::MemoryStore::default();
    let mut client = Client::new(app_with_sessions(MemoryStore::new(), sessions.clone()));
    client.register("ada", "lovelace").await;

    // Same session store, but a data store where the user does not exist.
    client.app = app_with_sessions(MemoryStore::new(), sessions);
    assert_redirect(&client.get("/mysecrets").await, "/login");
    assert_redirect(&client.get("/submit").await, "/login");

    let page = client.get("/secrets").await;
    assert_eq!(page.status(), StatusCode::OK);
    assert!(text(page).await.contains("/register"));
}

#[tokio::test]
async fn test_google_login_redirects_to_consent_screen() {
    let mut client = Client::new(app(MemoryStore::new()));

    let response = client.get("/auth/google").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let to = location(&response);
    assert!(to.starts_with("https://accounts.google.com/o/oauth2/v2/auth?"));
    assert!(to.contains("client_id=test-client"));
    assert!(to.contains("code_challenge="));
    assert!(to.contains("state="));
    assert!(client.cookie.is_some());
}

#[tokio::test]
async fn test_google_callback_failures_go_to_login() {
    let mut client = Client::new(app(MemoryStore::new()));

    assert_redirect(&client.get("/auth/google/secrets").await, "/login");
    assert_redirect(
        &client.get("/auth/google/secrets?error=access_denied").await,
        "/login",
    );

    client.get("/auth/google").await;
    let forged = client
        .get("/auth/google/secrets?code=abc&state=forged")
        .await;
    assert_redirect(&forged, "/login");

    assert_redirect(&client.get("/mysecrets").await, "/login");
}
