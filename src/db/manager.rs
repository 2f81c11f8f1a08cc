//! Manager entity and repository for Medoka.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{MedokaError, Result};

/// Manager gender.
///
/// Applied as a profile default when the update omits it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Gender {
    /// Male.
    Male,
    /// Female (default).
    #[default]
    Female,
}

impl Gender {
    /// Convert gender to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Male" => Ok(Gender::Male),
            "Female" => Ok(Gender::Female),
            _ => Err(format!("unknown gender: {s}")),
        }
    }
}

/// Manager entity: the authenticated account (pharmacy owner/operator).
///
/// Created at registration with only the email populated; the password hash
/// and profile fields are filled in by later operations.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Manager {
    /// Unique manager ID.
    pub id: i64,
    /// Email address (unique, case-sensitive as stored).
    pub email: String,
    /// Password hash (bcrypt), None until a password is first set.
    pub password: Option<String>,
    /// First name, None until the profile is completed.
    pub first_name: Option<String>,
    /// Last name, None until the profile is completed.
    pub last_name: Option<String>,
    /// Gender, stored as text.
    pub gender: String,
    /// Phone number.
    pub phone_number: Option<i64>,
    /// Whether the email has been verified.
    pub verified: bool,
    /// Account creation timestamp.
    pub created_at: String,
}

impl Manager {
    /// Gender as an enum, falling back to the default on unknown values.
    pub fn gender(&self) -> Gender {
        Gender::from_str(&self.gender).unwrap_or_default()
    }
}

/// Profile fields applied by a manager info update.
#[derive(Debug, Clone)]
pub struct ManagerInfoUpdate {
    /// Gender.
    pub gender: Gender,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Phone number.
    pub phone_number: i64,
}

const MANAGER_COLUMNS: &str =
    "id, email, password, first_name, last_name, gender, phone_number, verified, created_at";

/// Repository for manager CRUD operations.
pub struct ManagerRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ManagerRepository<'a> {
    /// Create a new repository instance.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a manager with only the email populated.
    pub async fn create_with_email(&self, email: &str) -> Result<Manager> {
        let result = sqlx::query("INSERT INTO managers (email) VALUES ($1)")
            .bind(email)
            .execute(self.pool)
            .await
            .map_err(|e| MedokaError::Database(e.to_string()))?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| MedokaError::NotFound("manager".to_string()))
    }

    /// Get a manager by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Manager>> {
        let result = sqlx::query_as::<_, Manager>(&format!(
            "SELECT {MANAGER_COLUMNS} FROM managers WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| MedokaError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Get a manager by email (case-sensitive).
    pub async fn get_by_email(&self, email: &str) -> Result<Option<Manager>> {
        let result = sqlx::query_as::<_, Manager>(&format!(
            "SELECT {MANAGER_COLUMNS} FROM managers WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| MedokaError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Mark a manager as verified, keyed by the manager's own id.
    ///
    /// Returns the updated manager, or None if the id is unknown.
    pub async fn set_verified(&self, id: i64) -> Result<Option<Manager>> {
        sqlx::query("UPDATE managers SET verified = 1 WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| MedokaError::Database(e.to_string()))?;

        self.get_by_id(id).await
    }

    /// Set or replace the manager's password hash.
    pub async fn set_password(&self, id: i64, password_hash: &str) -> Result<()> {
        let result = sqlx::query("UPDATE managers SET password = $1 WHERE id = $2")
            .bind(password_hash)
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| MedokaError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(MedokaError::NotFound("manager".to_string()));
        }
        Ok(())
    }

    /// Apply a profile update and return the updated manager.
    pub async fn update_info(&self, id: i64, update: &ManagerInfoUpdate) -> Result<Option<Manager>> {
        sqlx::query(
            "UPDATE managers
             SET gender = $1, first_name = $2, last_name = $3, phone_number = $4
             WHERE id = $5",
        )
        .bind(update.gender.as_str())
        .bind(&update.first_name)
        .bind(&update.last_name)
        .bind(update.phone_number)
        .bind(id)
        .execute(self.pool)
        .await
        .map_err(|e| MedokaError::Database(e.to_string()))?;

        self.get_by_id(id).await
    }
}
