//! Validation utilities for Web API DTOs.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use validator::Validate;

use crate::web::error::ApiError;

/// A JSON extractor that validates the request body.
///
/// Deserializes the request body as JSON and then validates it with the
/// `validator` crate. A validation failure short-circuits the handler with a
/// 400 carrying the first failing field's message, before any store access.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(format!("Invalid JSON: {}", e)))?;

        value.validate().map_err(ApiError::from_validation_errors)?;

        Ok(ValidatedJson(value))
    }
}

// ============================================================================
// Custom Validators
// ============================================================================

/// Validate that a string contains only ASCII digits.
pub fn numeric_string(value: &str) -> Result<(), validator::ValidationError> {
    if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(validator::ValidationError::new("numeric_string")
            .with_message("Must be a number".into()));
    }
    Ok(())
}

/// Validate a wall-clock time in 'HH:MM' form.
pub fn hhmm_time(value: &str) -> Result<(), validator::ValidationError> {
    let invalid = || {
        validator::ValidationError::new("hhmm_time")
            .with_message("Time must be in HH:MM format".into())
    };

    let (hours, minutes) = value.split_once(':').ok_or_else(invalid)?;
    if hours.len() != 2 || minutes.len() != 2 {
        return Err(invalid());
    }
    let hours: u8 = hours.parse().map_err(|_| invalid())?;
    let minutes: u8 = minutes.parse().map_err(|_| invalid())?;
    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }
    Ok(())
}

/// Validate a calendar date, either 'YYYY-MM-DD' or an RFC 3339 timestamp.
pub fn date_string(value: &str) -> Result<(), validator::ValidationError> {
    let is_date = chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
        || chrono::DateTime::parse_from_rfc3339(value).is_ok();
    if !is_date {
        return Err(validator::ValidationError::new("date_string")
            .with_message("Must be a valid date".into()));
    }
    Ok(())
}

// ============================================================================
// Deserialization helpers
// ============================================================================

/// Deserialize a field that clients send either as a JSON number or as a
/// string, into a string. Shape checks happen afterwards in the validators.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(i64),
        String(String),
    }

    Ok(match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => n.to_string(),
        NumberOrString::String(s) => s,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_string_valid() {
        assert!(numeric_string("123456").is_ok());
        assert!(numeric_string("0").is_ok());
    }

    #[test]
    fn test_numeric_string_invalid() {
        assert!(numeric_string("").is_err());
        assert!(numeric_string("12a4").is_err());
        assert!(numeric_string("-5").is_err());
        assert!(numeric_string("1 2").is_err());
    }

    #[test]
    fn test_hhmm_time_valid() {
        assert!(hhmm_time("00:00").is_ok());
        assert!(hhmm_time("08:30").is_ok());
        assert!(hhmm_time("23:59").is_ok());
    }

    #[test]
    fn test_hhmm_time_invalid() {
        assert!(hhmm_time("24:00").is_err());
        assert!(hhmm_time("12:60").is_err());
        assert!(hhmm_time("8:30").is_err());
        assert!(hhmm_time("0830").is_err());
        assert!(hhmm_time("").is_err());
    }

    #[test]
    fn test_date_string_valid() {
        assert!(date_string("2023-05-01").is_ok());
        assert!(date_string("2023-05-01T12:00:00Z").is_ok());
    }

    #[test]
    fn test_date_string_invalid() {
        assert!(date_string("01/05/2023").is_err());
        assert!(date_string("not a date").is_err());
        assert!(date_string("").is_err());
    }

    #[test]
    fn test_lenient_string_accepts_number_and_string() {
        #[derive(Deserialize)]
        struct Probe {
            #[serde(deserialize_with = "lenient_string")]
            value: String,
        }

        let from_number: Probe = serde_json::from_str(r#"{"value": 123456}"#).unwrap();
        assert_eq!(from_number.value, "123456");

        let from_string: Probe = serde_json::from_str(r#"{"value": "123456"}"#).unwrap();
        assert_eq!(from_string.value, "123456");
    }
}
