//! Database schema and migrations for Medoka.
//!
//! This module contains all database migrations that will be applied
//! sequentially when the database is first opened or upgraded.

/// Database migrations.
///
/// Each migration is a SQL script that will be executed in order.
/// The schema_version table tracks which migrations have been applied.
pub const MIGRATIONS: &[&str] = &[
    // v1: Initial schema - managers table
    r#"
-- Managers table for authentication and account management
CREATE TABLE managers (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    email        TEXT NOT NULL UNIQUE,
    password     TEXT,                    -- bcrypt hash, null until first set
    first_name   TEXT,
    last_name    TEXT,
    gender       TEXT NOT NULL DEFAULT 'Female',  -- 'Male', 'Female'
    phone_number INTEGER,
    verified     INTEGER NOT NULL DEFAULT 0,
    created_at   TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_managers_email ON managers(email);
"#,
    // v2: One-time tokens for email verification
    r#"
CREATE TABLE verification_tokens (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    token       INTEGER NOT NULL,        -- 6-digit verification code
    manager_id  INTEGER NOT NULL REFERENCES managers(id) ON DELETE CASCADE,
    expires_at  TEXT NOT NULL,
    created_at  TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_verification_tokens_manager ON verification_tokens(manager_id);
"#,
    // v3: One-time tokens for password recovery
    r#"
CREATE TABLE recovery_tokens (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    token       TEXT NOT NULL,           -- 16 hex characters
    manager_id  INTEGER NOT NULL REFERENCES managers(id) ON DELETE CASCADE,
    expires_at  TEXT NOT NULL,
    created_at  TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_recovery_tokens_token ON recovery_tokens(token);
CREATE INDEX idx_recovery_tokens_manager ON recovery_tokens(manager_id);
"#,
    // v4: Pharmacies, owned by managers
    r#"
CREATE TABLE pharmacies (
    id                INTEGER PRIMARY KEY AUTOINCREMENT,
    company_name      TEXT NOT NULL,
    serial_number     INTEGER NOT NULL,
    registration_date TEXT NOT NULL,
    address           TEXT,
    phone_number      INTEGER,
    avatar            TEXT,
    manager_id        INTEGER NOT NULL REFERENCES managers(id) ON DELETE CASCADE,
    created_at        TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_pharmacies_manager ON pharmacies(manager_id);
"#,
    // v5: Weekly operating hours per pharmacy
    r#"
CREATE TABLE pharmacy_days (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    pharmacy_id INTEGER NOT NULL REFERENCES pharmacies(id) ON DELETE CASCADE,
    name        TEXT NOT NULL,           -- 'Monday' .. 'Sunday'
    open        INTEGER NOT NULL DEFAULT 0,
    starts_at   TEXT NOT NULL,           -- 'HH:MM'
    ends_at     TEXT NOT NULL            -- 'HH:MM'
);

CREATE INDEX idx_pharmacy_days_pharmacy ON pharmacy_days(pharmacy_id);
"#,
];
