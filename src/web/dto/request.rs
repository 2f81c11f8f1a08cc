//! Request DTOs for the Web API.
//!
//! Field names mirror the JSON the frontend sends (camelCase). Validation
//! messages are the ones clients display verbatim.

use serde::Deserialize;
use validator::Validate;

use super::validation::{date_string, hhmm_time, lenient_string, numeric_string};
use crate::db::{DayName, Gender};

/// Login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address.
    #[validate(email(message = "Email is not valid"))]
    pub email: String,
    /// Password.
    #[validate(length(
        min = 8,
        max = 256,
        message = "Password must be between 8 and 256 characters"
    ))]
    pub password: String,
}

/// Manager registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address to register.
    #[validate(email(message = "Email is not valid"))]
    pub email: String,
}

/// Email verification request.
#[derive(Debug, Deserialize, Validate)]
pub struct VerifyRequest {
    /// Verification code received by email.
    #[serde(deserialize_with = "lenient_string")]
    #[validate(custom(function = "numeric_string", message = "Token must be a number"))]
    pub token: String,
}

/// Password set/update request.
#[derive(Debug, Deserialize, Validate)]
pub struct PasswordRequest {
    /// New password.
    #[validate(length(
        min = 8,
        max = 256,
        message = "Password must be between 8 and 256 characters"
    ))]
    pub password: String,
}

/// Manager profile update request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ManagerInfoRequest {
    /// Gender; defaults to Female when absent.
    #[serde(default)]
    pub gender: Option<Gender>,
    /// First name.
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    /// Last name.
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    /// Phone number.
    #[serde(deserialize_with = "lenient_string")]
    #[validate(custom(function = "numeric_string", message = "Phone number must be a number"))]
    pub phone_number: String,
}

/// Account recovery request.
#[derive(Debug, Deserialize, Validate)]
pub struct RecoverRequest {
    /// Email address of the account to recover.
    #[validate(email(message = "Email is not valid"))]
    pub email: String,
}

/// Pharmacy info create/update request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PharmacyInfoRequest {
    /// Pharmacy id; present for an update, absent for a create.
    #[serde(default)]
    pub id: Option<i64>,
    /// Company name.
    #[validate(length(
        min = 3,
        max = 50,
        message = "The company name must be between 3 and 50 letters"
    ))]
    pub company_name: String,
    /// Serial number.
    #[serde(deserialize_with = "lenient_string")]
    #[validate(custom(function = "numeric_string", message = "The serial number must be a number"))]
    pub serial_number: String,
    /// Registration date.
    #[validate(custom(
        function = "date_string",
        message = "The registration date must be a valid date"
    ))]
    pub registration_date: String,
}

/// Pharmacy address update request.
#[derive(Debug, Deserialize, Validate)]
pub struct PharmacyAddressRequest {
    /// Street address.
    #[validate(length(
        min = 3,
        max = 50,
        message = "The address must be between 3 and 50 letters"
    ))]
    pub address: String,
}

/// Pharmacy phone update request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PharmacyPhoneRequest {
    /// Phone number.
    #[serde(deserialize_with = "lenient_string")]
    #[validate(custom(function = "numeric_string", message = "The phone number must be a number"))]
    pub phone_number: String,
}

/// Pharmacy avatar update request.
#[derive(Debug, Deserialize, Validate)]
pub struct PharmacyAvatarRequest {
    /// Avatar URL.
    #[validate(length(min = 1, message = "The avatar is required"))]
    pub avatar: String,
}

/// One day of operating hours.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DayRequest {
    /// Day name.
    pub name: DayName,
    /// Whether the pharmacy is open on this day.
    pub open: bool,
    /// Opening time, 'HH:MM'.
    #[validate(custom(function = "hhmm_time"))]
    pub starts_at: String,
    /// Closing time, 'HH:MM'.
    #[validate(custom(function = "hhmm_time"))]
    pub ends_at: String,
}

/// Pharmacy operating-hours update request.
#[derive(Debug, Deserialize, Validate)]
pub struct PharmacyHoursRequest {
    /// The week to store; replaces any previously stored hours.
    #[validate(nested)]
    pub days: Vec<DayRequest>,
}
