//! Manager account handlers: registration, email verification, password,
//! profile, and account recovery.

use axum::{
    extract::{Path, State},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

use super::AppState;
use crate::auth::{generate_recovery_token, generate_verification_code, hash_password};
use crate::db::{
    expiry_after, ManagerInfoUpdate, ManagerRepository, RecoveryTokenRepository,
    VerificationTokenRepository,
};
use crate::mail::{recovery_mail, verification_mail};
use crate::web::dto::{
    ManagerInfoRequest, MessageResponse, PasswordRequest, RecoverRequest, RegisterRequest,
    RegisterResponse, ValidatedJson, VerifyRequest,
};
use crate::web::error::ApiError;
use crate::web::middleware::AuthManager;

/// Verification codes expire 15 minutes after issue.
const VERIFICATION_CODE_TTL_MINUTES: i64 = 15;

/// Recovery tokens expire one hour after issue.
const RECOVERY_TOKEN_TTL_HOURS: i64 = 1;

/// POST /api/manager/register - Register a manager by email.
///
/// Creates the manager row with only the email set and mails a verification
/// code. The mail is queued fire-and-forget: its delivery outcome never
/// rolls back the created rows or fails this request.
pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<Json<RegisterResponse>, ApiError> {
    let repo = ManagerRepository::new(state.db.pool());
    if repo.get_by_email(&req.email).await?.is_some() {
        return Err(ApiError::bad_request("Email already exist"));
    }

    let manager = repo.create_with_email(&req.email).await?;

    let code = generate_verification_code();
    let expires = expiry_after(chrono::Duration::minutes(VERIFICATION_CODE_TTL_MINUTES));
    VerificationTokenRepository::new(state.db.pool())
        .issue(manager.id, code, &expires)
        .await?;

    state.mailer.send(verification_mail(&req.email, code));

    Ok(Json(RegisterResponse {
        message: "Email sent".to_string(),
        manager_id: manager.id,
    }))
}

/// POST /api/manager/verify/:managerId - Verify a manager's email.
///
/// Consumes the code and marks the manager verified, keyed by the manager's
/// own id, then issues a session.
pub async fn verify(
    State(state): State<Arc<AppState>>,
    Path(manager_id): Path<i64>,
    jar: CookieJar,
    ValidatedJson(req): ValidatedJson<VerifyRequest>,
) -> Result<(CookieJar, Json<MessageResponse>), ApiError> {
    // The validator guarantees the token is all digits
    let code: i64 = req
        .token
        .parse()
        .map_err(|_| ApiError::bad_request("Token must be a number"))?;

    let consumed = VerificationTokenRepository::new(state.db.pool())
        .consume(manager_id, code)
        .await?;
    if consumed.is_none() {
        return Err(ApiError::bad_request("Access denied, invalid token"));
    }

    let manager = ManagerRepository::new(state.db.pool())
        .set_verified(manager_id)
        .await?
        .ok_or_else(|| ApiError::bad_request("Access denied, invalid token"))?;

    let token = state.issue_session(&manager)?;

    Ok((
        jar.add(state.session_cookie(token)),
        Json(MessageResponse::new("Email verified")),
    ))
}

/// PUT /api/manager/password - Set or update the password.
///
/// Does not reissue the session; the existing cookie stays valid.
pub async fn update_password(
    State(state): State<Arc<AppState>>,
    AuthManager(claims): AuthManager,
    ValidatedJson(req): ValidatedJson<PasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    // Length was already validated by the DTO; a failure here is internal
    let hash = hash_password(&req.password).map_err(|e| {
        tracing::error!("Failed to hash password: {}", e);
        ApiError::internal("Failed to hash password")
    })?;

    ManagerRepository::new(state.db.pool())
        .set_password(claims.id, &hash)
        .await?;

    Ok(Json(MessageResponse::new("Password updated")))
}

/// PUT /api/manager/info - Update the manager profile.
///
/// Reissues the session so the claims reflect the updated identity.
pub async fn update_info(
    State(state): State<Arc<AppState>>,
    AuthManager(claims): AuthManager,
    jar: CookieJar,
    ValidatedJson(req): ValidatedJson<ManagerInfoRequest>,
) -> Result<(CookieJar, Json<MessageResponse>), ApiError> {
    let phone_number: i64 = req
        .phone_number
        .parse()
        .map_err(|_| ApiError::bad_request("Phone number must be a number"))?;

    let update = ManagerInfoUpdate {
        gender: req.gender.unwrap_or_default(),
        first_name: req.first_name,
        last_name: req.last_name,
        phone_number,
    };

    let manager = ManagerRepository::new(state.db.pool())
        .update_info(claims.id, &update)
        .await?
        .ok_or_else(|| ApiError::not_found("Account not found"))?;

    let token = state.issue_session(&manager)?;

    Ok((
        jar.add(state.session_cookie(token)),
        Json(MessageResponse::new("Manager info updated")),
    ))
}

/// POST /api/manager/recover - Request account recovery.
///
/// Mails a recovery link embedding a one-time token. Prior outstanding
/// tokens for the manager are invalidated by the new issue.
pub async fn recover(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<RecoverRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let manager = ManagerRepository::new(state.db.pool())
        .get_by_email(&req.email)
        .await?
        .ok_or_else(|| ApiError::bad_request("Account does not exist"))?;

    let token = generate_recovery_token();
    let expires = expiry_after(chrono::Duration::hours(RECOVERY_TOKEN_TTL_HOURS));
    RecoveryTokenRepository::new(state.db.pool())
        .issue(manager.id, &token, &expires)
        .await?;

    let url = format!("{}/recover/{}", state.frontend_url, token);
    state.mailer.send(recovery_mail(&req.email, &url));

    Ok(Json(MessageResponse::new("Recovery link sent")))
}

/// PUT /api/recover/:token - Complete account recovery.
///
/// Consumes the token and replaces the owning manager's password. Does not
/// log the manager in.
pub async fn reset_password(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
    ValidatedJson(req): ValidatedJson<PasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let consumed = RecoveryTokenRepository::new(state.db.pool())
        .consume(&token)
        .await?
        .ok_or_else(|| ApiError::not_found("Access denied, invalid token"))?;

    let hash = hash_password(&req.password).map_err(|e| {
        tracing::error!("Failed to hash password: {}", e);
        ApiError::internal("Failed to hash password")
    })?;

    ManagerRepository::new(state.db.pool())
        .set_password(consumed.manager_id, &hash)
        .await?;

    Ok(Json(MessageResponse::new("Password updated")))
}
