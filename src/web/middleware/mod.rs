//! Middleware for the Web API.

pub mod auth;
pub mod cors;

pub use auth::{session_keys_layer, AuthManager, SESSION_COOKIE};
pub use cors::create_cors_layer;
