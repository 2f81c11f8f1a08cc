//! Web API Pharmacy Tests
//!
//! Integration tests for pharmacy record management and ownership scoping.

mod common;

use axum_test::TestServer;
use common::*;
use serde_json::{json, Value};

/// Create a pharmacy for the currently logged-in manager and return its id.
async fn create_pharmacy(server: &TestServer) -> i64 {
    let response = server
        .put("/api/pharmacy/info")
        .json(&json!({
            "companyName": "Corner Pharmacy",
            "serialNumber": 4711,
            "registrationDate": "2023-05-01"
        }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["message"], "Pharmacy created successfully");
    body["pharmacyId"].as_i64().unwrap()
}

#[tokio::test]
async fn test_create_pharmacy() {
    let (server, db) = create_test_server().await;

    let manager_id = register_and_verify(&server, &db, "a@b.com").await;
    let pharmacy_id = create_pharmacy(&server).await;

    let (company_name, owner): (String, i64) =
        sqlx::query_as("SELECT company_name, manager_id FROM pharmacies WHERE id = $1")
            .bind(pharmacy_id)
            .fetch_one(db.pool())
            .await
            .unwrap();
    assert_eq!(company_name, "Corner Pharmacy");
    assert_eq!(owner, manager_id);
}

#[tokio::test]
async fn test_update_pharmacy_info() {
    let (server, db) = create_test_server().await;

    register_and_verify(&server, &db, "a@b.com").await;
    let pharmacy_id = create_pharmacy(&server).await;

    let response = server
        .put("/api/pharmacy/info")
        .json(&json!({
            "id": pharmacy_id,
            "companyName": "Harbor Pharmacy",
            "serialNumber": "4712",
            "registrationDate": "2024-01-15"
        }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["message"], "Pharmacy info updated successfully");
    assert_eq!(body["pharmacyId"], pharmacy_id);

    let (company_name, serial): (String, i64) =
        sqlx::query_as("SELECT company_name, serial_number FROM pharmacies WHERE id = $1")
            .bind(pharmacy_id)
            .fetch_one(db.pool())
            .await
            .unwrap();
    assert_eq!(company_name, "Harbor Pharmacy");
    assert_eq!(serial, 4712);
}

#[tokio::test]
async fn test_pharmacy_requires_session() {
    let (server, _db) = create_test_server().await;

    let response = server
        .put("/api/pharmacy/info")
        .json(&json!({
            "companyName": "Corner Pharmacy",
            "serialNumber": 4711,
            "registrationDate": "2023-05-01"
        }))
        .await;
    response.assert_status_unauthorized();
}

#[tokio::test]
async fn test_pharmacy_of_other_manager_is_not_found() {
    let (server, db) = create_test_server().await;

    // Manager A owns a pharmacy
    register_and_verify(&server, &db, "a@b.com").await;
    let pharmacy_id = create_pharmacy(&server).await;

    // Manager B logs in (their session replaces A's cookie)
    register_and_verify(&server, &db, "b@b.com").await;

    // B cannot see or mutate A's pharmacy; the id reads as unknown
    let response = server
        .put(&format!("/api/pharmacy/address/{pharmacy_id}"))
        .json(&json!({ "address": "12 Harbor Street" }))
        .await;
    response.assert_status_bad_request();

    let body: Value = response.json();
    assert_eq!(body["error"], "Pharmacy not found");

    // Exactly the same failure as a genuinely unknown id
    let unknown = server
        .put("/api/pharmacy/address/99999")
        .json(&json!({ "address": "12 Harbor Street" }))
        .await;
    unknown.assert_status_bad_request();
    let unknown_body: Value = unknown.json();
    assert_eq!(unknown_body["error"], "Pharmacy not found");
}

#[tokio::test]
async fn test_update_pharmacy_info_unknown_id() {
    let (server, db) = create_test_server().await;

    register_and_verify(&server, &db, "a@b.com").await;

    let response = server
        .put("/api/pharmacy/info")
        .json(&json!({
            "id": 99999,
            "companyName": "Ghost Pharmacy",
            "serialNumber": 1,
            "registrationDate": "2023-05-01"
        }))
        .await;
    response.assert_status_bad_request();

    let body: Value = response.json();
    assert_eq!(body["error"], "Pharmacy not found");
}

#[tokio::test]
async fn test_update_address_phone_avatar() {
    let (server, db) = create_test_server().await;

    register_and_verify(&server, &db, "a@b.com").await;
    let pharmacy_id = create_pharmacy(&server).await;

    server
        .put(&format!("/api/pharmacy/address/{pharmacy_id}"))
        .json(&json!({ "address": "12 Harbor Street" }))
        .await
        .assert_status_ok();

    server
        .put(&format!("/api/pharmacy/phone/{pharmacy_id}"))
        .json(&json!({ "phoneNumber": "555123456" }))
        .await
        .assert_status_ok();

    server
        .put(&format!("/api/pharmacy/avatar/{pharmacy_id}"))
        .json(&json!({ "avatar": "https://cdn.test/avatar.png" }))
        .await
        .assert_status_ok();

    let (address, phone, avatar): (String, i64, String) =
        sqlx::query_as("SELECT address, phone_number, avatar FROM pharmacies WHERE id = $1")
            .bind(pharmacy_id)
            .fetch_one(db.pool())
            .await
            .unwrap();
    assert_eq!(address, "12 Harbor Street");
    assert_eq!(phone, 555123456);
    assert_eq!(avatar, "https://cdn.test/avatar.png");
}

#[tokio::test]
async fn test_update_address_too_short() {
    let (server, db) = create_test_server().await;

    register_and_verify(&server, &db, "a@b.com").await;
    let pharmacy_id = create_pharmacy(&server).await;

    let response = server
        .put(&format!("/api/pharmacy/address/{pharmacy_id}"))
        .json(&json!({ "address": "ab" }))
        .await;
    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_update_phone_non_numeric() {
    let (server, db) = create_test_server().await;

    register_and_verify(&server, &db, "a@b.com").await;
    let pharmacy_id = create_pharmacy(&server).await;

    let response = server
        .put(&format!("/api/pharmacy/phone/{pharmacy_id}"))
        .json(&json!({ "phoneNumber": "call-me" }))
        .await;
    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_create_pharmacy_invalid_serial() {
    let (server, db) = create_test_server().await;

    register_and_verify(&server, &db, "a@b.com").await;

    let response = server
        .put("/api/pharmacy/info")
        .json(&json!({
            "companyName": "Corner Pharmacy",
            "serialNumber": "not-a-number",
            "registrationDate": "2023-05-01"
        }))
        .await;
    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_replace_hours() {
    let (server, db) = create_test_server().await;

    register_and_verify(&server, &db, "a@b.com").await;
    let pharmacy_id = create_pharmacy(&server).await;

    let week = json!({
        "days": [
            { "name": "Monday", "open": true, "startsAt": "08:30", "endsAt": "18:00" },
            { "name": "Tuesday", "open": true, "startsAt": "08:30", "endsAt": "18:00" },
            { "name": "Sunday", "open": false, "startsAt": "00:00", "endsAt": "00:00" }
        ]
    });

    server
        .put(&format!("/api/pharmacy/hours/{pharmacy_id}"))
        .json(&week)
        .await
        .assert_status_ok();

    // Re-submitting replaces the stored week instead of appending to it
    server
        .put(&format!("/api/pharmacy/hours/{pharmacy_id}"))
        .json(&week)
        .await
        .assert_status_ok();

    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM pharmacy_days WHERE pharmacy_id = $1")
            .bind(pharmacy_id)
            .fetch_one(db.pool())
            .await
            .unwrap();
    assert_eq!(count, 3);

    let (name, open, starts_at): (String, bool, String) = sqlx::query_as(
        "SELECT name, open, starts_at FROM pharmacy_days WHERE pharmacy_id = $1 ORDER BY id LIMIT 1",
    )
    .bind(pharmacy_id)
    .fetch_one(db.pool())
    .await
    .unwrap();
    assert_eq!(name, "Monday");
    assert!(open);
    assert_eq!(starts_at, "08:30");
}

#[tokio::test]
async fn test_replace_hours_invalid_time() {
    let (server, db) = create_test_server().await;

    register_and_verify(&server, &db, "a@b.com").await;
    let pharmacy_id = create_pharmacy(&server).await;

    let response = server
        .put(&format!("/api/pharmacy/hours/{pharmacy_id}"))
        .json(&json!({
            "days": [
                { "name": "Monday", "open": true, "startsAt": "25:00", "endsAt": "18:00" }
            ]
        }))
        .await;
    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_replace_hours_unknown_day() {
    let (server, db) = create_test_server().await;

    register_and_verify(&server, &db, "a@b.com").await;
    let pharmacy_id = create_pharmacy(&server).await;

    let response = server
        .put(&format!("/api/pharmacy/hours/{pharmacy_id}"))
        .json(&json!({
            "days": [
                { "name": "Holiday", "open": true, "startsAt": "08:30", "endsAt": "18:00" }
            ]
        }))
        .await;
    response.assert_status_bad_request();
}
