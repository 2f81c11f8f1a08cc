//! Medoka - Pharmacy management SaaS backend
//!
//! Manager account registration, email verification, login and password
//! recovery, plus pharmacy record management, over a REST API.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod mail;
pub mod web;

pub use auth::{
    generate_recovery_token, generate_verification_code, hash_password, validate_password,
    verify_password, PasswordError, SessionClaims, SessionError, SessionKeys,
    DEFAULT_SESSION_TTL_DAYS, MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH,
};
pub use config::Config;
pub use db::{
    Database, DayName, Gender, Manager, ManagerRepository, Pharmacy, PharmacyRepository,
    RecoveryTokenRepository, VerificationTokenRepository,
};
pub use error::{MedokaError, Result};
pub use mail::Mailer;
pub use web::WebServer;
