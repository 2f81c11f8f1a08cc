//! Shared helpers for Web API integration tests.
#![allow(dead_code)]

use axum_test::{TestServer, TestServerConfig};
use medoka::config::{MailConfig, WebConfig};
use medoka::mail::Mailer;
use medoka::web::handlers::AppState;
use medoka::web::router::create_router;
use medoka::Database;
use serde_json::{json, Value};
use std::sync::Arc;

/// Signing secret used by every test server.
pub const TEST_JWT_SECRET: &str = "test-secret-key-for-testing-only";

/// Create a test server with an in-memory database.
///
/// Cookies are saved between requests, so a verified or logged-in session
/// carries over to subsequent calls on the same server.
pub async fn create_test_server() -> (TestServer, Database) {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");

    let web_config = WebConfig {
        jwt_secret: TEST_JWT_SECRET.to_string(),
        ..WebConfig::default()
    };

    // Mail stays disabled: messages are drained and dropped
    let mailer = Mailer::spawn(&MailConfig::default());

    let app_state = Arc::new(AppState::new(db.clone(), &web_config, mailer));
    let router = create_router(app_state, &[]);

    let config = TestServerConfig {
        save_cookies: true,
        ..TestServerConfig::default()
    };
    let server =
        TestServer::new_with_config(router, config).expect("Failed to create test server");

    (server, db)
}

/// Register a manager and return the new manager id.
pub async fn register_manager(server: &TestServer, email: &str) -> i64 {
    let response = server
        .post("/api/manager/register")
        .json(&json!({ "email": email }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    body["managerId"].as_i64().expect("managerId in response")
}

/// Read the stored verification code for a manager straight from the store.
pub async fn stored_verification_code(db: &Database, manager_id: i64) -> i64 {
    sqlx::query_scalar("SELECT token FROM verification_tokens WHERE manager_id = $1")
        .bind(manager_id)
        .fetch_one(db.pool())
        .await
        .expect("verification code stored")
}

/// Read the stored recovery token for a manager straight from the store.
pub async fn stored_recovery_token(db: &Database, manager_id: i64) -> String {
    sqlx::query_scalar("SELECT token FROM recovery_tokens WHERE manager_id = $1")
        .bind(manager_id)
        .fetch_one(db.pool())
        .await
        .expect("recovery token stored")
}

/// Read a manager's verified flag straight from the store.
pub async fn manager_verified(db: &Database, manager_id: i64) -> bool {
    sqlx::query_scalar("SELECT verified FROM managers WHERE id = $1")
        .bind(manager_id)
        .fetch_one(db.pool())
        .await
        .expect("manager row")
}

/// Register a manager and verify the email. Leaves the session cookie saved
/// on the server. Returns the manager id.
pub async fn register_and_verify(server: &TestServer, db: &Database, email: &str) -> i64 {
    let manager_id = register_manager(server, email).await;
    let code = stored_verification_code(db, manager_id).await;

    let response = server
        .post(&format!("/api/manager/verify/{manager_id}"))
        .json(&json!({ "token": code }))
        .await;
    response.assert_status_ok();

    manager_id
}

/// Register, verify, and set a password using the fresh session.
/// Returns the manager id.
pub async fn register_with_password(
    server: &TestServer,
    db: &Database,
    email: &str,
    password: &str,
) -> i64 {
    let manager_id = register_and_verify(server, db, email).await;

    let response = server
        .put("/api/manager/password")
        .json(&json!({ "password": password }))
        .await;
    response.assert_status_ok();

    manager_id
}
