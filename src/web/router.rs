//! Router configuration for the Web API.

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{
    login, logout, recover, register, reset_password, update_info, update_password,
    update_pharmacy_address, update_pharmacy_avatar, update_pharmacy_hours, update_pharmacy_info,
    update_pharmacy_phone, verify, AppState,
};
use super::middleware::{create_cors_layer, session_keys_layer};

/// Create the main API router.
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    // Routes that do not require an established session
    let public_routes = Router::new()
        .route("/auth", post(login))
        .route("/manager/register", post(register))
        .route("/manager/verify/:manager_id", post(verify))
        .route("/manager/recover", post(recover))
        .route("/recover/:token", put(reset_password));

    // Routes gated by the session guard
    let protected_routes = Router::new()
        .route("/logout", post(logout))
        .route("/manager/password", put(update_password))
        .route("/manager/info", put(update_info))
        .route("/pharmacy/info", put(update_pharmacy_info))
        .route("/pharmacy/address/:id", put(update_pharmacy_address))
        .route("/pharmacy/phone/:id", put(update_pharmacy_phone))
        .route("/pharmacy/avatar/:id", put(update_pharmacy_avatar))
        .route("/pharmacy/hours/:id", put(update_pharmacy_hours));

    let api_routes = Router::new().merge(public_routes).merge(protected_routes);

    // Clone session keys for the middleware closure
    let keys_for_middleware = app_state.keys.clone();

    Router::new()
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins))
                .layer(middleware::from_fn(move |req, next| {
                    let keys = keys_for_middleware.clone();
                    session_keys_layer(keys, req, next)
                })),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_health_router() {
        let _router = create_health_router();
        // Should not panic
    }
}
