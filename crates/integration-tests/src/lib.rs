//! Integration test harness for the favorites API.
//!
//! Drives the full router (middleware, extractors, error rendering) against a
//! [`MemoryStore`] without binding a socket.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p favorites-integration-tests
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! let app = TestApp::new();
//! let alice = app.create_user("alice@example.com").await;
//!
//! let resp = app.get("/api/lists", &Auth::bearer(alice)).await;
//! assert_eq!(resp.status, StatusCode::OK);
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use secrecy::SecretString;
use serde_json::Value;
use tower::ServiceExt;

use favorites_api::config::ApiConfig;
use favorites_api::db::{MemoryStore, UserStore};
use favorites_api::models::NewUser;
use favorites_api::state::AppState;
use favorites_core::{BearerToken, Email, UserId};

/// Credential material to attach to a request.
#[derive(Debug, Clone, Default)]
pub struct Auth {
    pub authorization: Option<String>,
    pub cookie: Option<String>,
}

impl Auth {
    /// No credentials: the server provisions an anonymous user.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// `Authorization: Bearer test-token-<id>`.
    #[must_use]
    pub fn bearer(user_id: UserId) -> Self {
        Self::raw_bearer(&BearerToken::for_user(user_id))
    }

    /// `Authorization: Bearer <token>` with an arbitrary token.
    #[must_use]
    pub fn raw_bearer(token: &str) -> Self {
        Self {
            authorization: Some(format!("Bearer {token}")),
            cookie: None,
        }
    }

    /// Identity cookie with the given remember token.
    #[must_use]
    pub fn cookie(token: &str) -> Self {
        Self {
            authorization: None,
            cookie: Some(token.to_owned()),
        }
    }
}

/// A buffered response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Parsed JSON body, or `Value::Null` for an empty or non-JSON body.
    pub body: Value,
    pub text: String,
}

impl TestResponse {
    /// Value of the `Set-Cookie` header for the identity cookie, if any.
    #[must_use]
    pub fn identity_set_cookie(&self) -> Option<&str> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with("auth_token="))
    }

    /// The remember token carried by the identity `Set-Cookie`, if any.
    #[must_use]
    pub fn identity_token(&self) -> Option<String> {
        let cookie = self.identity_set_cookie()?;
        let pair = cookie.split(';').next()?;
        let (_, value) = pair.split_once('=')?;
        Some(value.to_owned()).filter(|v| !v.is_empty())
    }
}

/// The application under test and direct access to its store.
pub struct TestApp {
    pub store: MemoryStore,
    router: Router,
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

impl TestApp {
    /// Build the router over a fresh memory store.
    #[must_use]
    pub fn new() -> Self {
        let store = MemoryStore::new();
        let state = AppState::new(ApiConfig::in_memory(), Arc::new(store.clone()));

        Self {
            store,
            router: favorites_api::app(state),
        }
    }

    /// Insert a registered user directly into the store.
    ///
    /// # Panics
    ///
    /// Panics if the email is invalid or already taken.
    pub async fn create_user(&self, email: &str) -> UserId {
        self.store
            .create_user(NewUser {
                name: "Test User".to_owned(),
                email: Email::parse(email).expect("valid test email"),
                password_hash: "not-a-real-hash".to_owned(),
                remember_token: Some(SecretString::from(format!("remember-{email}"))),
            })
            .await
            .expect("test user is created")
            .id
    }

    /// Send a request and buffer the response.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the body cannot be read.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        auth: &Auth,
        body: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(value) = &auth.authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        if let Some(token) = &auth.cookie {
            builder = builder.header(header::COOKIE, format!("auth_token={token}"));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_owned())),
            None => builder.body(Body::empty()),
        }
        .expect("request builds");

        self.send_request(request).await
    }

    /// Send a prebuilt request and buffer the response.
    ///
    /// # Panics
    ///
    /// Panics if the body cannot be read.
    pub async fn send_request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body is readable");
        let text = String::from_utf8_lossy(&bytes).into_owned();
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
            text,
        }
    }

    pub async fn get(&self, uri: &str, auth: &Auth) -> TestResponse {
        self.send(Method::GET, uri, auth, None).await
    }

    pub async fn post(&self, uri: &str, auth: &Auth, body: &Value) -> TestResponse {
        self.send(Method::POST, uri, auth, Some(&body.to_string()))
            .await
    }

    pub async fn put(&self, uri: &str, auth: &Auth, body: &Value) -> TestResponse {
        self.send(Method::PUT, uri, auth, Some(&body.to_string()))
            .await
    }

    pub async fn delete(&self, uri: &str, auth: &Auth) -> TestResponse {
        self.send(Method::DELETE, uri, auth, None).await
    }

    /// Create a list through the API and return its ID.
    ///
    /// # Panics
    ///
    /// Panics if the list is not created.
    pub async fn create_list(&self, auth: &Auth, name: &str) -> i64 {
        let resp = self
            .post("/api/lists", auth, &serde_json::json!({ "name": name }))
            .await;
        assert_eq!(resp.status, StatusCode::CREATED, "{}", resp.text);
        resp.body["id"].as_i64().expect("list id in response")
    }
}
