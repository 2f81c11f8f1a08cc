//! Response DTOs for the Web API.

use serde::Serialize;

/// Plain message response.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable outcome message.
    pub message: String,
}

impl MessageResponse {
    /// Create a new message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Registration response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    /// Human-readable outcome message.
    pub message: String,
    /// ID of the newly created manager.
    pub manager_id: i64,
}

/// Pharmacy info create/update response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PharmacyInfoResponse {
    /// Human-readable outcome message.
    pub message: String,
    /// ID of the created or updated pharmacy.
    pub pharmacy_id: i64,
}
