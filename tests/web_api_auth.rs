//! Web API Authentication Tests
//!
//! Integration tests for login, logout, and the session guard.

mod common;

use axum_test::TestServer;
use common::*;
use medoka::{SessionKeys, DEFAULT_SESSION_TTL_DAYS};
use serde_json::{json, Value};

async fn login(server: &TestServer, email: &str, password: &str) -> axum_test::TestResponse {
    server
        .post("/api/auth")
        .json(&json!({ "email": email, "password": password }))
        .await
}

// ============================================================================
// Login Tests
// ============================================================================

#[tokio::test]
async fn test_login_success() {
    let (mut server, db) = create_test_server().await;

    let manager_id = register_with_password(&server, &db, "a@b.com", "password123").await;
    server.clear_cookies();

    let response = login(&server, "a@b.com", "password123").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["message"], "Successfully logged in");

    // The issued session decodes to claims matching the created manager
    let cookie = response.cookie("token");
    let keys = SessionKeys::new(TEST_JWT_SECRET, DEFAULT_SESSION_TTL_DAYS);
    let claims = keys.verify(cookie.value()).expect("decodable session");
    assert_eq!(claims.id, manager_id);
    assert_eq!(claims.email, "a@b.com");
}

#[tokio::test]
async fn test_login_session_cookie_attributes() {
    let (mut server, db) = create_test_server().await;

    register_with_password(&server, &db, "a@b.com", "password123").await;
    server.clear_cookies();

    let response = login(&server, "a@b.com", "password123").await;
    let cookie = response.cookie("token");

    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.path(), Some("/"));
    assert_eq!(cookie.max_age(), Some(time::Duration::days(7)));
    // Not production mode: cookie travels over plain HTTP in tests
    assert_ne!(cookie.secure(), Some(true));
}

#[tokio::test]
async fn test_login_unknown_email() {
    let (server, _db) = create_test_server().await;

    let response = login(&server, "nobody@b.com", "password123").await;
    response.assert_status_not_found();

    let body: Value = response.json();
    assert_eq!(body["error"], "Account not found");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let (mut server, db) = create_test_server().await;

    register_with_password(&server, &db, "a@b.com", "password123").await;
    server.clear_cookies();

    let response = login(&server, "a@b.com", "wrong-password").await;
    response.assert_status_bad_request();

    let body: Value = response.json();
    assert_eq!(body["error"], "Invalid password");
}

#[tokio::test]
async fn test_login_with_unset_password_fails_like_wrong_password() {
    let (mut server, db) = create_test_server().await;

    // Registered and verified, but no password was ever set: the stored
    // hash is null and login must fail, not error
    register_and_verify(&server, &db, "a@b.com").await;
    server.clear_cookies();

    let response = login(&server, "a@b.com", "password123").await;
    response.assert_status_bad_request();

    let body: Value = response.json();
    assert_eq!(body["error"], "Invalid password");
}

#[tokio::test]
async fn test_login_invalid_email_shape() {
    let (server, _db) = create_test_server().await;

    let response = login(&server, "not-an-email", "password123").await;
    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_login_short_password_rejected_before_lookup() {
    let (server, _db) = create_test_server().await;

    let response = login(&server, "a@b.com", "short").await;
    // Shape check fails first, even though the account does not exist
    response.assert_status_bad_request();
}

// ============================================================================
// Logout Tests
// ============================================================================

#[tokio::test]
async fn test_logout_clears_session_cookie() {
    let (server, db) = create_test_server().await;

    register_and_verify(&server, &db, "a@b.com").await;

    let response = server.post("/api/logout").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["message"], "Successfully logged out");

    // The response replaces the cookie with an empty, expired one
    let cookie = response.cookie("token");
    assert_eq!(cookie.value(), "");

    // The cleared cookie no longer passes the session guard. Depending on
    // jar semantics the client presents no cookie (401) or an empty value
    // (400); either way the request is rejected.
    let after = server.post("/api/logout").await;
    assert!(after.status_code().is_client_error());
}

#[tokio::test]
async fn test_logout_without_session() {
    let (server, _db) = create_test_server().await;

    let response = server.post("/api/logout").await;
    response.assert_status_unauthorized();
}

// ============================================================================
// Session Guard Tests
// ============================================================================

#[tokio::test]
async fn test_protected_route_without_cookie() {
    let (server, _db) = create_test_server().await;

    let response = server
        .put("/api/manager/password")
        .json(&json!({ "password": "password123" }))
        .await;
    response.assert_status_unauthorized();
}

#[tokio::test]
async fn test_protected_route_with_garbage_token() {
    let (mut server, _db) = create_test_server().await;

    // A cookie that is present but undecodable is a client error, not 401
    server.add_cookie(axum_extra::extract::cookie::Cookie::new("token", "garbage"));

    let response = server
        .put("/api/manager/password")
        .json(&json!({ "password": "password123" }))
        .await;
    response.assert_status_bad_request();

    let body: Value = response.json();
    assert_eq!(body["error"], "Invalid token.");
}

#[tokio::test]
async fn test_stale_claims_until_reissue() {
    let (server, db) = create_test_server().await;

    register_and_verify(&server, &db, "a@b.com").await;

    // Profile update reissues the session with the new identity claims
    let response = server
        .put("/api/manager/info")
        .json(&json!({
            "firstName": "Ada",
            "lastName": "Nouri",
            "phoneNumber": "555123456"
        }))
        .await;
    response.assert_status_ok();

    let cookie = response.cookie("token");
    let keys = SessionKeys::new(TEST_JWT_SECRET, DEFAULT_SESSION_TTL_DAYS);
    let claims = keys.verify(cookie.value()).unwrap();
    assert_eq!(claims.first_name.as_deref(), Some("Ada"));
    assert_eq!(claims.last_name.as_deref(), Some("Nouri"));
}
