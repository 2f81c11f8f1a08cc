//! Pharmacy handlers.
//!
//! Every operation is scoped to the pharmacy owned by the authenticated
//! manager. An id that exists under another manager fails exactly like an
//! unknown id, so callers cannot probe for other managers' pharmacies.

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use super::AppState;
use crate::db::{NewPharmacy, NewPharmacyDay, PharmacyRepository};
use crate::web::dto::{
    MessageResponse, PharmacyAddressRequest, PharmacyAvatarRequest, PharmacyHoursRequest,
    PharmacyInfoRequest, PharmacyInfoResponse, PharmacyPhoneRequest, ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::middleware::AuthManager;

fn pharmacy_not_found() -> ApiError {
    ApiError::bad_request("Pharmacy not found")
}

/// PUT /api/pharmacy/info - Create or update a pharmacy.
///
/// With an id in the body this updates the caller's pharmacy; without one it
/// creates a new pharmacy owned by the caller.
pub async fn update_pharmacy_info(
    State(state): State<Arc<AppState>>,
    AuthManager(claims): AuthManager,
    ValidatedJson(req): ValidatedJson<PharmacyInfoRequest>,
) -> Result<Json<PharmacyInfoResponse>, ApiError> {
    let serial_number: i64 = req
        .serial_number
        .parse()
        .map_err(|_| ApiError::bad_request("The serial number must be a number"))?;

    let info = NewPharmacy {
        company_name: req.company_name,
        serial_number,
        registration_date: req.registration_date,
    };

    let repo = PharmacyRepository::new(state.db.pool());

    if let Some(id) = req.id {
        let pharmacy = repo
            .get_owned(id, claims.id)
            .await?
            .ok_or_else(pharmacy_not_found)?;
        repo.update_info(pharmacy.id, &info).await?;

        return Ok(Json(PharmacyInfoResponse {
            message: "Pharmacy info updated successfully".to_string(),
            pharmacy_id: pharmacy.id,
        }));
    }

    let created = repo.create(claims.id, &info).await?;

    Ok(Json(PharmacyInfoResponse {
        message: "Pharmacy created successfully".to_string(),
        pharmacy_id: created.id,
    }))
}

/// PUT /api/pharmacy/address/:id - Update the address.
pub async fn update_pharmacy_address(
    State(state): State<Arc<AppState>>,
    AuthManager(claims): AuthManager,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<PharmacyAddressRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let repo = PharmacyRepository::new(state.db.pool());
    let pharmacy = repo
        .get_owned(id, claims.id)
        .await?
        .ok_or_else(pharmacy_not_found)?;

    repo.update_address(pharmacy.id, &req.address).await?;

    Ok(Json(MessageResponse::new("Address updated successfully")))
}

/// PUT /api/pharmacy/phone/:id - Update the phone number.
pub async fn update_pharmacy_phone(
    State(state): State<Arc<AppState>>,
    AuthManager(claims): AuthManager,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<PharmacyPhoneRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let phone_number: i64 = req
        .phone_number
        .parse()
        .map_err(|_| ApiError::bad_request("The phone number must be a number"))?;

    let repo = PharmacyRepository::new(state.db.pool());
    let pharmacy = repo
        .get_owned(id, claims.id)
        .await?
        .ok_or_else(pharmacy_not_found)?;

    repo.update_phone(pharmacy.id, phone_number).await?;

    Ok(Json(MessageResponse::new(
        "Phone number updated successfully",
    )))
}

/// PUT /api/pharmacy/avatar/:id - Update the avatar.
pub async fn update_pharmacy_avatar(
    State(state): State<Arc<AppState>>,
    AuthManager(claims): AuthManager,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<PharmacyAvatarRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let repo = PharmacyRepository::new(state.db.pool());
    let pharmacy = repo
        .get_owned(id, claims.id)
        .await?
        .ok_or_else(pharmacy_not_found)?;

    repo.update_avatar(pharmacy.id, &req.avatar).await?;

    Ok(Json(MessageResponse::new("Avatar updated successfully")))
}

/// PUT /api/pharmacy/hours/:id - Replace the weekly operating hours.
pub async fn update_pharmacy_hours(
    State(state): State<Arc<AppState>>,
    AuthManager(claims): AuthManager,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<PharmacyHoursRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let repo = PharmacyRepository::new(state.db.pool());
    let pharmacy = repo
        .get_owned(id, claims.id)
        .await?
        .ok_or_else(pharmacy_not_found)?;

    let days: Vec<NewPharmacyDay> = req
        .days
        .into_iter()
        .map(|day| NewPharmacyDay {
            name: day.name,
            open: day.open,
            starts_at: day.starts_at,
            ends_at: day.ends_at,
        })
        .collect();

    repo.replace_days(pharmacy.id, &days).await?;

    Ok(Json(MessageResponse::new("Work days updated successfully")))
}
