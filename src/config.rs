//! Configuration module for Medoka.

use serde::Deserialize;
use std::path::Path;

use crate::{MedokaError, Result};

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "data/medoka.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Web/session configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    /// Allowed CORS origins. Empty means permissive (development) mode.
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// Secret key for signing session tokens.
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Session lifetime in days (token expiry and cookie max-age).
    #[serde(default = "default_session_ttl_days")]
    pub session_ttl_days: u64,
    /// Production mode. Controls the cookie `Secure` flag and strict CORS.
    #[serde(default)]
    pub production: bool,
    /// Base URL of the frontend, used to build recovery links.
    #[serde(default = "default_frontend_url")]
    pub frontend_url: String,
}

fn default_jwt_secret() -> String {
    "change-me-in-production".to_string()
}

fn default_session_ttl_days() -> u64 {
    7
}

fn default_frontend_url() -> String {
    "http://localhost:3000".to_string()
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            cors_origins: vec![],
            jwt_secret: default_jwt_secret(),
            session_ttl_days: default_session_ttl_days(),
            production: false,
            frontend_url: default_frontend_url(),
        }
    }
}

/// Outbound mail (SMTP) configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MailConfig {
    /// Whether outbound mail is enabled. When disabled, queued messages are
    /// dropped with a log line instead of being delivered.
    #[serde(default)]
    pub enabled: bool,
    /// SMTP relay host.
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    /// SMTP relay port (implicit TLS).
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    /// SMTP username.
    #[serde(default)]
    pub username: String,
    /// SMTP password.
    #[serde(default)]
    pub password: String,
    /// From address for outbound messages.
    #[serde(default = "default_mail_from")]
    pub from: String,
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}

fn default_smtp_port() -> u16 {
    465
}

fn default_mail_from() -> String {
    "Medoka <no-reply@medoka.app>".to_string()
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            username: String::new(),
            password: String::new(),
            from: default_mail_from(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Optional log file path. Console-only when absent.
    #[serde(default)]
    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Web/session settings.
    #[serde(default)]
    pub web: WebConfig,
    /// Outbound mail settings.
    #[serde(default)]
    pub mail: MailConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| MedokaError::Config(e.to_string()))
    }
}
