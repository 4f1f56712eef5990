//! Integration tests for the `/auth/*` endpoints.

mod helpers;

use std::collections::BTreeSet;

use chrono::{Duration, Utc};
use http::StatusCode;
use serde_json::json;

use foodgate_auth::{AccountFlags, Claims, Principal};
use foodgate_core::config::AuthoritySource;

use helpers::TestApp;

fn principal(username: &str, authorities: &[&str]) -> Principal {
    Principal::new(
        username,
        authorities.iter().map(|a| a.to_string()).collect(),
        AccountFlags::default(),
    )
}

#[tokio::test]
async fn test_authenticate_success() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/auth/authenticate",
            Some(json!({ "username": "alice", "password": helpers::PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["type"], "Bearer");
    assert_eq!(response.body["username"], "alice");
    assert_eq!(response.body["expiresIn"], 900_000);
    assert!(response.body["token"].is_string());
    assert!(response.body["refreshToken"].is_string());

    let authorities = response.strings("authorities");
    assert!(authorities.contains(&"ROLE_USER".to_string()));
    assert!(authorities.contains(&"CREATE_RESERVATION".to_string()));
    assert!(authorities.contains(&"VIEW_DISH".to_string()));
    assert!(!authorities.contains(&"UPDATE_ORDER_STATUS".to_string()));
}

#[tokio::test]
async fn test_authenticate_failures() {
    let app = TestApp::new();

    for (username, password) in [
        ("alice", "wrongpassword"),
        ("nobody", helpers::PASSWORD),
        ("lou", helpers::PASSWORD),
    ] {
        let response = app
            .request(
                "POST",
                "/auth/authenticate",
                Some(json!({ "username": username, "password": password })),
                None,
            )
            .await;

        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{username}");
        assert_eq!(response.code(), Some("AUTH_FAILED"));
        assert!(response.body["message"].is_string());
        assert!(response.body["timestamp"].is_string());
    }
}

#[tokio::test]
async fn test_authenticate_rejects_blank_fields() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/auth/authenticate",
            Some(json!({ "username": "  ", "password": helpers::PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.code(), Some("VALIDATION_ERROR"));
}

#[tokio::test]
async fn test_validate_fresh_token() {
    let app = TestApp::new();
    let token = app
        .state
        .lifecycle
        .issue_access_token(&principal("alice", &["VIEW_DISH"]))
        .unwrap();

    let response = app.request("GET", "/auth/validate", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["valid"], true);
    assert_eq!(response.body["username"], "alice");

    let remaining = response.body["remainingValidityMs"].as_u64().unwrap();
    assert!(remaining > 899_000, "remaining validity was {remaining}");
    assert!(remaining < 901_000, "remaining validity was {remaining}");
}

#[tokio::test]
async fn test_validate_reports_current_role_authorities() {
    let app = TestApp::new();
    let token = app
        .state
        .lifecycle
        .issue_access_token(&principal("alice", &["DELETE_USER"]))
        .unwrap();

    let validated = app.request("GET", "/auth/validate", None, Some(&token)).await;
    let me = app.request("GET", "/auth/me", None, Some(&token)).await;

    assert_eq!(validated.status, StatusCode::OK);
    assert_eq!(validated.body["valid"], true);
    let authorities: BTreeSet<String> = validated.strings("authorities").into_iter().collect();
    assert!(authorities.contains("ROLE_USER"));
    assert!(authorities.contains("CREATE_RESERVATION"));
    assert!(!authorities.contains("DELETE_USER"));

    let bound: BTreeSet<String> = me.strings("authorities").into_iter().collect();
    assert_eq!(authorities, bound);
}

#[tokio::test]
async fn test_validate_reports_token_authorities_in_token_mode() {
    let mut config = helpers::test_config();
    config.auth.authority_source = AuthoritySource::Token;
    let app = TestApp::with_config(config);
    let token = app
        .state
        .lifecycle
        .issue_access_token(&principal("alice", &["VIEW_DISH"]))
        .unwrap();

    let response = app.request("GET", "/auth/validate", None, Some(&token)).await;

    assert_eq!(response.body["valid"], true);
    assert_eq!(response.strings("authorities"), vec!["VIEW_DISH".to_string()]);
}

#[tokio::test]
async fn test_validate_rejects_unusable_subjects() {
    let app = TestApp::new();

    for username in ["lou", "ghost"] {
        let token = app
            .state
            .lifecycle
            .issue_access_token(&principal(username, &["VIEW_DISH"]))
            .unwrap();

        let response = app.request("GET", "/auth/validate", None, Some(&token)).await;

        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{username}");
        assert_eq!(response.body["valid"], false, "{username}");
        assert!(response.body.get("authorities").is_none());
    }
}

#[tokio::test]
async fn test_validate_after_ttl_elapsed() {
    let app = TestApp::new();
    let issued = Utc::now() - Duration::hours(1);
    let token = app
        .state
        .lifecycle
        .issue_access_token_at(&principal("alice", &["VIEW_DISH"]), issued)
        .unwrap();

    let response = app.request("GET", "/auth/validate", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["valid"], false);
    assert!(response.body["message"].is_string());
}

#[tokio::test]
async fn test_validate_is_strict_inside_skew_window() {
    let app = TestApp::new();
    // Expired a minute ago: still inside the 300s skew, but not valid for /validate.
    let issued = Utc::now() - Duration::minutes(16);
    let token = app
        .state
        .lifecycle
        .issue_access_token_at(&principal("alice", &[]), issued)
        .unwrap();

    let response = app.request("GET", "/auth/validate", None, Some(&token)).await;
    assert_eq!(response.body["valid"], false);
}

#[tokio::test]
async fn test_validate_rejects_refresh_token() {
    let app = TestApp::new();
    let (_, refresh_token) = app.login("alice").await;

    let response = app
        .request("GET", "/auth/validate", None, Some(&refresh_token))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["valid"], false);
}

#[tokio::test]
async fn test_validate_without_token() {
    let app = TestApp::new();

    let response = app.request("GET", "/auth/validate", None, None).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.code(), Some("NO_TOKEN"));
}

#[tokio::test]
async fn test_refresh_with_access_token() {
    let app = TestApp::new();
    let (access_token, _) = app.login("alice").await;

    let response = app
        .request(
            "POST",
            "/auth/refresh",
            Some(json!({ "refreshToken": access_token })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.code(), Some("NOT_REFRESH_TOKEN"));
}

#[tokio::test]
async fn test_refresh_with_expired_refresh_token() {
    let app = TestApp::new();
    let issued = Utc::now() - Duration::days(8);
    let token = app
        .state
        .lifecycle
        .issue_refresh_token_at("alice", issued)
        .unwrap();

    let response = app
        .request("POST", "/auth/refresh", Some(json!({ "refreshToken": token })), None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.code(), Some("EXPIRED_REFRESH_TOKEN"));
}

#[tokio::test]
async fn test_refresh_expired_within_skew_window() {
    let app = TestApp::new();
    // Expired a minute ago: inside the 300s skew, still refused.
    let ttl = Duration::milliseconds(app.state.lifecycle.refresh_ttl_ms() as i64);
    let issued = Utc::now() - ttl - Duration::seconds(60);
    let token = app
        .state
        .lifecycle
        .issue_refresh_token_at("alice", issued)
        .unwrap();

    let response = app
        .request("POST", "/auth/refresh", Some(json!({ "refreshToken": token })), None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.code(), Some("EXPIRED_REFRESH_TOKEN"));
    assert!(response.body.get("token").is_none());
}

#[tokio::test]
async fn test_refresh_with_missing_field() {
    let app = TestApp::new();

    let response = app.request("POST", "/auth/refresh", Some(json!({})), None).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.code(), Some("VALIDATION_ERROR"));
    assert!(response.body["message"].is_string());
    assert!(response.body["timestamp"].is_string());
}

#[tokio::test]
async fn test_authenticate_with_malformed_json() {
    let app = TestApp::new();

    let response = app
        .request_raw("POST", "/auth/authenticate", r#"{"username": "alice""#)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.code(), Some("VALIDATION_ERROR"));
}

#[tokio::test]
async fn test_refresh_with_garbage() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/auth/refresh",
            Some(json!({ "refreshToken": "not-a-token" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.code(), Some("INVALID_TOKEN"));
}

#[tokio::test]
async fn test_refresh_for_vanished_user() {
    let app = TestApp::new();
    let token = app.state.lifecycle.issue_refresh_token("ghost").unwrap();

    let response = app
        .request("POST", "/auth/refresh", Some(json!({ "refreshToken": token })), None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.code(), Some("INVALID_TOKEN"));
}

#[tokio::test]
async fn test_refresh_issues_new_access_token() {
    let app = TestApp::new();
    let (_, refresh_token) = app.login("sam").await;

    let before = Utc::now().timestamp();
    let response = app
        .request(
            "POST",
            "/auth/refresh",
            Some(json!({ "refreshToken": refresh_token })),
            None,
        )
        .await;
    let after = Utc::now().timestamp();

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["type"], "Bearer");
    assert_eq!(response.body["expiresIn"], 900_000);

    let token = response.body["token"].as_str().unwrap();
    let claims: Claims = app.state.lifecycle.inspect(token).claims().cloned().unwrap();
    assert!(app.state.lifecycle.is_access_token(token));
    assert!(claims.exp >= before + 900 && claims.exp <= after + 901);
    assert!(claims.authority_set().contains("UPDATE_ORDER_STATUS"));
}

#[tokio::test]
async fn test_me_authenticated() {
    let app = TestApp::new();
    let (token, _) = app.login("admin").await;

    let response = app.request("GET", "/auth/me", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["username"], "admin");
    assert_eq!(response.body["enabled"], true);
    assert_eq!(response.body["accountNonExpired"], true);
    assert_eq!(response.body["accountNonLocked"], true);
    assert_eq!(response.body["credentialsNonExpired"], true);

    let authorities: BTreeSet<String> = response.strings("authorities").into_iter().collect();
    assert!(authorities.contains("ROLE_ADMIN"));
    assert!(authorities.contains("MANAGE_CONTRACTORS"));
    assert!(authorities.contains("VIEW_DISH"));
}

#[tokio::test]
async fn test_me_unauthenticated() {
    let app = TestApp::new();

    let response = app.request("GET", "/auth/me", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.code(), Some("NO_AUTH"));
}

#[tokio::test]
async fn test_me_with_refresh_token_is_unauthenticated() {
    let app = TestApp::new();
    let (_, refresh_token) = app.login("alice").await;

    let response = app
        .request("GET", "/auth/me", None, Some(&refresh_token))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.code(), Some("NO_AUTH"));
}

#[tokio::test]
async fn test_logout_always_succeeds() {
    let app = TestApp::new();
    let (token, _) = app.login("alice").await;
    let stale = app
        .state
        .lifecycle
        .issue_access_token_at(&principal("alice", &[]), Utc::now() - Duration::days(1))
        .unwrap();

    for authorization in [
        None,
        Some(format!("Bearer {token}")),
        Some(format!("Bearer {stale}")),
        Some("Bearer garbage".to_string()),
    ] {
        let response = app
            .request_with_authorization("POST", "/auth/logout", None, authorization.as_deref())
            .await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["success"], true);
        assert_eq!(response.body["message"], "Logged out successfully");
    }
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();

    let response = app.request("GET", "/auth/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "UP");
    assert_eq!(response.body["service"], "Authentication Service");
    assert!(response.request_id.is_some());
}

#[tokio::test]
async fn test_login_token_round_trips_through_validate() {
    let app = TestApp::new();
    let (token, _) = app.login("gus").await;

    let response = app.request("GET", "/auth/validate", None, Some(&token)).await;

    assert_eq!(response.body["valid"], true);
    let authorities: BTreeSet<String> = response.strings("authorities").into_iter().collect();
    let expected: BTreeSet<String> = ["ROLE_GUEST", "VIEW_DISH", "VIEW_DAILY_MEAL"]
        .into_iter()
        .map(String::from)
        .collect();
    assert_eq!(authorities, expected);
}
