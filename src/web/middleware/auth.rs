//! Session guard middleware.
//!
//! Protected handlers take the [`AuthManager`] extractor, which reads the
//! `token` cookie, decodes it through the session codec, and rejects the
//! request when the cookie is absent or invalid. The store is never
//! consulted: the signature is the sole authority, so claims can lag behind
//! the manager row until a session is reissued.

use axum::{
    async_trait,
    body::Body,
    extract::FromRequestParts,
    http::{request::Parts, Request},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

use crate::auth::{SessionClaims, SessionKeys};
use crate::web::error::ApiError;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "token";

/// Extractor for authenticated managers.
///
/// Handlers that require an established identity take this extractor and
/// receive the decoded session claims.
#[derive(Debug, Clone)]
pub struct AuthManager(pub SessionClaims);

#[async_trait]
impl<S> FromRequestParts<S> for AuthManager
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .ok_or_else(|| ApiError::unauthorized("Access denied. No token provided."))?;

        // Session keys are injected into extensions by the session middleware
        let keys = parts
            .extensions
            .get::<Arc<SessionKeys>>()
            .ok_or_else(|| ApiError::internal("Session keys not configured"))?;

        let claims = keys.verify(&token).map_err(|e| {
            tracing::debug!("Session validation failed: {}", e);
            ApiError::bad_request("Invalid token.")
        })?;

        Ok(AuthManager(claims))
    }
}

/// Middleware function to inject session keys into request extensions.
pub async fn session_keys_layer(
    keys: Arc<SessionKeys>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    request.extensions_mut().insert(keys);
    next.run(request).await
}
