//! API handlers for the Medoka Web API.

pub mod auth;
pub mod manager;
pub mod pharmacy;

pub use auth::*;
pub use manager::*;
pub use pharmacy::*;

use std::sync::Arc;

use axum_extra::extract::cookie::{Cookie, SameSite};

use crate::auth::SessionKeys;
use crate::config::WebConfig;
use crate::db::{Database, Manager};
use crate::mail::Mailer;
use crate::web::error::ApiError;
use crate::web::middleware::SESSION_COOKIE;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database handle.
    pub db: Database,
    /// Session codec keys.
    pub keys: Arc<SessionKeys>,
    /// Outbound mail queue.
    pub mailer: Mailer,
    /// Production mode (controls the cookie `Secure` flag).
    pub production: bool,
    /// Frontend base URL for recovery links.
    pub frontend_url: String,
    /// Session lifetime in days (cookie max-age).
    pub session_ttl_days: u64,
}

impl AppState {
    /// Create application state from configuration.
    pub fn new(db: Database, config: &WebConfig, mailer: Mailer) -> Self {
        Self {
            db,
            keys: Arc::new(SessionKeys::new(
                &config.jwt_secret,
                config.session_ttl_days,
            )),
            mailer,
            production: config.production,
            frontend_url: config.frontend_url.trim_end_matches('/').to_string(),
            session_ttl_days: config.session_ttl_days,
        }
    }

    /// Issue a signed session token for a manager.
    pub fn issue_session(&self, manager: &Manager) -> Result<String, ApiError> {
        self.keys.issue(manager).map_err(|e| {
            tracing::error!("Failed to encode session token: {}", e);
            ApiError::internal("Failed to generate token")
        })
    }

    /// Build the session cookie carrying a token.
    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, token))
            .http_only(true)
            .secure(self.production)
            .max_age(time::Duration::days(self.session_ttl_days as i64))
            .path("/")
            .same_site(SameSite::Lax)
            .build()
    }
}
