//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, OnceLock};

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use foodgate_api::AppState;
use foodgate_api::router::build_router;
use foodgate_auth::{
    AccountFlags, InMemoryUserDirectory, PasswordCredentialVerifier, PasswordHasher, UserLookup,
    UserRecord,
};
use foodgate_core::config::AppConfig;

/// Password shared by every seeded user.
pub const PASSWORD: &str = "password123";

/// Base64 of the integration-test signing secret.
pub const TEST_SECRET: &str = "Zm9vZGdhdGUtaW50ZWdyYXRpb24tdGVzdC1zZWNyZXQtMDEyMzQ1Njc4OQ==";

/// Argon2 hashing is slow in debug builds; hash once per test binary.
fn password_hash() -> &'static str {
    static HASH: OnceLock<String> = OnceLock::new();
    HASH.get_or_init(|| {
        PasswordHasher::new()
            .hash_password(PASSWORD)
            .expect("Failed to hash password")
    })
}

fn user(username: &str, roles: &[&str], flags: AccountFlags) -> UserRecord {
    UserRecord {
        username: username.to_string(),
        password_hash: password_hash().to_string(),
        roles: roles.iter().map(|r| r.to_string()).collect(),
        flags,
    }
}

/// The seeded directory: one user per shipped role plus a locked account.
pub fn directory() -> InMemoryUserDirectory {
    let locked = AccountFlags {
        locked: true,
        ..AccountFlags::default()
    };

    InMemoryUserDirectory::new()
        .with_user(user("admin", &["ADMIN"], AccountFlags::default()))
        .with_user(user("sam", &["STAFF"], AccountFlags::default()))
        .with_user(user("alice", &["USER"], AccountFlags::default()))
        .with_user(user("gus", &["GUEST"], AccountFlags::default()))
        .with_user(user("lou", &["USER"], locked))
}

/// Configuration with the test secret and default TTLs.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.auth.signing_secret = TEST_SECRET.to_string();
    config
}

/// Builds state over the seeded directory.
pub fn test_state(config: AppConfig) -> AppState {
    let users: Arc<dyn UserLookup> = Arc::new(directory());
    let credentials = Arc::new(PasswordCredentialVerifier::new(Arc::clone(&users)));
    AppState::new(config, users, credentials).expect("Failed to build state")
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for crafting tokens directly
    pub state: AppState,
}

impl TestApp {
    /// Create a new test application
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    /// Create a test application with custom configuration
    pub fn with_config(config: AppConfig) -> Self {
        let state = test_state(config);
        let router = build_router(state.clone());
        Self { router, state }
    }

    /// Login and return `(access_token, refresh_token)`
    pub async fn login(&self, username: &str) -> (String, String) {
        let body = serde_json::json!({
            "username": username,
            "password": PASSWORD,
        });

        let response = self
            .request("POST", "/auth/authenticate", Some(body), None)
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        let field = |name: &str| {
            response
                .body
                .get(name)
                .and_then(|v| v.as_str())
                .unwrap_or_else(|| panic!("No {name} in login response"))
                .to_string()
        };

        (field("token"), field("refreshToken"))
    }

    /// Make an HTTP request with an optional bearer token
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let authorization = token.map(|t| format!("Bearer {t}"));
        self.request_with_authorization(method, path, body, authorization.as_deref())
            .await
    }

    /// Make an HTTP request with a raw `Authorization` header value
    pub async fn request_with_authorization(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        authorization: Option<&str>,
    ) -> TestResponse {
        send(&self.router, method, path, body, authorization).await
    }

    /// Make an HTTP request with a raw, possibly invalid, JSON body
    pub async fn request_raw(&self, method: &str, path: &str, body: &str) -> TestResponse {
        send_raw(&self.router, method, path, body.to_string(), None).await
    }
}

/// Sends one request through `router`.
pub async fn send(
    router: &Router,
    method: &str,
    path: &str,
    body: Option<Value>,
    authorization: Option<&str>,
) -> TestResponse {
    let body_str = body
        .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
        .unwrap_or_default();

    send_raw(router, method, path, body_str, authorization).await
}

/// Sends one request with a raw body through `router`.
pub async fn send_raw(
    router: &Router,
    method: &str,
    path: &str,
    body_str: String,
    authorization: Option<&str>,
) -> TestResponse {
    let mut req = Request::builder()
        .method(method)
        .uri(path)
        .header("Content-Type", "application/json");

    if let Some(value) = authorization {
        req = req.header("Authorization", value);
    }

    let req = req
        .body(Body::from(body_str))
        .expect("Failed to build request");

    let response = router
        .clone()
        .oneshot(req)
        .await
        .expect("Failed to send request");

    let status = response.status();
    let request_id = response
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("Failed to read body");

    let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

    TestResponse {
        status,
        body,
        request_id,
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
    /// `x-request-id` response header
    pub request_id: Option<String>,
}

impl TestResponse {
    /// The `code` field of an error body.
    pub fn code(&self) -> Option<&str> {
        self.body.get("code").and_then(|v| v.as_str())
    }

    /// A JSON array of strings as a vector.
    pub fn strings(&self, field: &str) -> Vec<String> {
        self.body
            .get(field)
            .and_then(|v| v.as_array())
            .map(|items| {
                items
                    .iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default()
    }
}
