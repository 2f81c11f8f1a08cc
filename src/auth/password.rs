//! Password hashing and validation for Medoka.
//!
//! Uses bcrypt, matching the format of stored manager credentials.

use thiserror::Error;

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length.
pub const MAX_PASSWORD_LENGTH: usize = 256;

/// bcrypt cost factor.
pub const BCRYPT_COST: u32 = 10;

/// Password-related errors.
#[derive(Error, Debug)]
pub enum PasswordError {
    /// Password is too short.
    #[error("Password must be at least {MIN_PASSWORD_LENGTH} characters")]
    TooShort,

    /// Password is too long.
    #[error("Password must be at most {MAX_PASSWORD_LENGTH} characters")]
    TooLong,

    /// Password hashing failed.
    #[error("password hashing failed: {0}")]
    HashError(String),

    /// Password verification failed (wrong password or unusable hash).
    #[error("password verification failed")]
    VerificationFailed,
}

/// Hash a password with bcrypt.
///
/// Returns a self-describing hash string embedding the salt and cost.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    validate_password(password)?;

    bcrypt::hash(password, BCRYPT_COST).map_err(|e| PasswordError::HashError(e.to_string()))
}

/// Verify a password against a stored hash.
///
/// Returns `Ok(())` if the password matches. A malformed hash fails the same
/// way as a wrong password so callers cannot distinguish the two.
pub fn verify_password(password: &str, hash: &str) -> Result<(), PasswordError> {
    match bcrypt::verify(password, hash) {
        Ok(true) => Ok(()),
        _ => Err(PasswordError::VerificationFailed),
    }
}

/// Validate password length requirements.
pub fn validate_password(password: &str) -> Result<(), PasswordError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(PasswordError::TooShort);
    }
    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(PasswordError::TooLong);
    }
    Ok(())
}
