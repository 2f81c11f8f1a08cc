//! Signed session tokens for Medoka.
//!
//! Sessions are stateless: the server keeps no session table. A token is a
//! signed claims payload carried by the client in the `token` cookie, and
//! signature plus embedded expiry are the sole authority on validity.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::Manager;

/// Session lifetime in days (token expiry and cookie max-age).
pub const DEFAULT_SESSION_TTL_DAYS: u64 = 7;

/// Session-related errors.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Token could not be encoded.
    #[error("failed to encode session token: {0}")]
    Encode(String),

    /// Token is missing, malformed, expired, or carries a bad signature.
    #[error("invalid session token")]
    InvalidToken,
}

/// Identity claims embedded in a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Manager ID.
    pub id: i64,
    /// Manager email.
    pub email: String,
    /// First name, when the profile has been completed.
    #[serde(rename = "firstName")]
    pub first_name: Option<String>,
    /// Last name, when the profile has been completed.
    #[serde(rename = "lastName")]
    pub last_name: Option<String>,
    /// Issued at (unix timestamp).
    pub iat: u64,
    /// Expiration (unix timestamp).
    pub exp: u64,
}

/// Key material and validation settings for the session codec.
///
/// Constructed once at startup from the configured secret and shared by
/// reference; there is no ambient global.
#[derive(Clone)]
pub struct SessionKeys {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_days: u64,
}

impl SessionKeys {
    /// Create session keys from a secret.
    pub fn new(secret: &str, ttl_days: u64) -> Self {
        let mut validation = Validation::default();
        validation.validate_exp = true;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl_days,
        }
    }

    /// Encode a signed session token for a manager.
    pub fn issue(&self, manager: &Manager) -> Result<String, SessionError> {
        let now = chrono::Utc::now().timestamp() as u64;
        let claims = SessionClaims {
            id: manager.id,
            email: manager.email.clone(),
            first_name: manager.first_name.clone(),
            last_name: manager.last_name.clone(),
            iat: now,
            exp: now + self.ttl_days * 24 * 60 * 60,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| SessionError::Encode(e.to_string()))
    }

    /// Decode and verify a session token.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, SessionError> {
        decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| SessionError::InvalidToken)
    }
}
