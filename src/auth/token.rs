//! One-time token generation for email verification and account recovery.

use rand::Rng;

/// Number of random bytes behind a recovery token (16 hex characters).
const RECOVERY_TOKEN_BYTES: usize = 8;

/// Generate a verification code in the 6-digit range.
///
/// Codes are not zero-padded; a code may be shorter than 6 digits, matching
/// what the verification email displays.
pub fn generate_verification_code() -> i64 {
    rand::rng().random_range(0..1_000_000)
}

/// Generate an opaque recovery token: 16 lowercase hex characters.
pub fn generate_recovery_token() -> String {
    let bytes: [u8; RECOVERY_TOKEN_BYTES] = rand::rng().random();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
