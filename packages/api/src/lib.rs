//! # API crate: route layer and authentication for Konfessions
//!
//! Everything between an HTTP request and the storage traits lives here.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | Session identity extractors, local accounts (Argon2id), Google OAuth2 sign-in |
//! | [`error`] | [`AppError`] and its HTML error responses |
//! | [`routes`] | The HTTP surface and [`router`] |
//! | [`secrets`] | Secret submission, listing, editing and deletion |
//! | [`settings`] | Layered configuration (`config.toml`, environment) |
//!
//! ## Serving
//!
//! [`router`] builds an axum [`Router`] that still needs a `tower_sessions`
//! session layer. [`into_service`] then wraps the layered router so that HTML
//! forms can reach the PUT and DELETE routes through a `_method` query
//! parameter. The rewrite must run before routing, so it wraps the router
//! instead of being one of its layers.

use axum::extract::Request;
use axum::http::Method;
use axum::Router;
use tower::util::MapRequest;
use tower::ServiceExt;

pub mod auth;
pub mod error;
pub mod routes;
pub mod secrets;
pub mod settings;
mod state;

pub use error::AppError;
pub use routes::router;
pub use settings::Settings;
pub use state::AppState;

/// The complete application service.
pub type AppService = MapRequest<Router, fn(Request) -> Request>;

/// Wrap a fully layered router with method override.
pub fn into_service(router: Router) -> AppService {
    router.map_request(method_override as fn(Request) -> Request)
}

/// Turn `POST ...?_method=PUT|PATCH|DELETE` into that method.
fn method_override(mut req: Request) -> Request {
    if req.method() != Method::POST {
        return req;
    }
    let requested = req.uri().query().and_then(|query| {
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == "_method")
            .map(|(_, value)| value.to_ascii_uppercase())
    });
    let method = match requested.as_deref() {
        Some("PUT") => Method::PUT,
        Some("PATCH") => Method::PATCH,
        Some("DELETE") => Method::DELETE,
        _ => return req,
    };
    *req.method_mut() = method;
    req
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn post(uri: &str) -> Request {
        axum::http::Request::builder()
            .method(Method::POST)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn test_method_override() {
        assert_eq!(method_override(post("/mysecrets/1?_method=PUT")).method(), Method::PUT);
        assert_eq!(method_override(post("/mysecrets?_method=delete")).method(), Method::DELETE);
        assert_eq!(method_override(post("/mysecrets?_method=PATCH")).method(), Method::PATCH);
    }

    #[test]
    fn test_method_override_leaves_other_requests() {
        assert_eq!(method_override(post("/submit")).method(), Method::POST);
        assert_eq!(method_override(post("/submit?_method=GET")).method(), Method::POST);

        let get = axum::http::Request::builder()
            .uri("/mysecrets?_method=DELETE")
            .body(Body::empty())
            .unwrap();
        assert_eq!(method_override(get).method(), Method::GET);
    }
}
