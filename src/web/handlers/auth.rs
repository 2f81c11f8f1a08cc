//! Login and logout handlers.

use axum::{extract::State, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use std::sync::Arc;

use super::AppState;
use crate::auth::verify_password;
use crate::db::ManagerRepository;
use crate::web::dto::{LoginRequest, MessageResponse, ValidatedJson};
use crate::web::error::ApiError;
use crate::web::middleware::{AuthManager, SESSION_COOKIE};

/// POST /api/auth - Manager login.
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<(CookieJar, Json<MessageResponse>), ApiError> {
    let repo = ManagerRepository::new(state.db.pool());
    let manager = repo
        .get_by_email(&req.email)
        .await?
        .ok_or_else(|| ApiError::not_found("Account not found"))?;

    // A manager that never set a password has a null hash; that fails the
    // same way as a wrong password.
    let matches = manager
        .password
        .as_deref()
        .map(|hash| verify_password(&req.password, hash).is_ok())
        .unwrap_or(false);
    if !matches {
        return Err(ApiError::bad_request("Invalid password"));
    }

    let token = state.issue_session(&manager)?;

    Ok((
        jar.add(state.session_cookie(token)),
        Json(MessageResponse::new("Successfully logged in")),
    ))
}

/// POST /api/logout - Manager logout.
///
/// The guard has already established the session; logging out is just
/// clearing the cookie. There is no server-side session to revoke.
pub async fn logout(
    AuthManager(_claims): AuthManager,
    jar: CookieJar,
) -> Result<(CookieJar, Json<MessageResponse>), ApiError> {
    Ok((
        jar.remove(Cookie::build(SESSION_COOKIE).path("/").build()),
        Json(MessageResponse::new("Successfully logged out")),
    ))
}
