//! Pharmacy entity and repository for Medoka.
//!
//! Every pharmacy belongs to exactly one manager, and every mutation is
//! scoped to the owning manager's id so a caller can never touch (or learn
//! about) another manager's pharmacy.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{MedokaError, Result};

/// Day of the week for operating hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayName {
    /// Monday.
    Monday,
    /// Tuesday.
    Tuesday,
    /// Wednesday.
    Wednesday,
    /// Thursday.
    Thursday,
    /// Friday.
    Friday,
    /// Saturday.
    Saturday,
    /// Sunday.
    Sunday,
}

impl DayName {
    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            DayName::Monday => "Monday",
            DayName::Tuesday => "Tuesday",
            DayName::Wednesday => "Wednesday",
            DayName::Thursday => "Thursday",
            DayName::Friday => "Friday",
            DayName::Saturday => "Saturday",
            DayName::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for DayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DayName {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Monday" => Ok(DayName::Monday),
            "Tuesday" => Ok(DayName::Tuesday),
            "Wednesday" => Ok(DayName::Wednesday),
            "Thursday" => Ok(DayName::Thursday),
            "Friday" => Ok(DayName::Friday),
            "Saturday" => Ok(DayName::Saturday),
            "Sunday" => Ok(DayName::Sunday),
            _ => Err(format!("unknown day: {s}")),
        }
    }
}

/// Pharmacy entity.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Pharmacy {
    /// Unique pharmacy ID.
    pub id: i64,
    /// Company name.
    pub company_name: String,
    /// Serial number.
    pub serial_number: i64,
    /// Registration date.
    pub registration_date: String,
    /// Street address.
    pub address: Option<String>,
    /// Phone number.
    pub phone_number: Option<i64>,
    /// Avatar URL.
    pub avatar: Option<String>,
    /// Owning manager ID.
    pub manager_id: i64,
    /// Creation timestamp.
    pub created_at: String,
}

/// Weekly operating-hours row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PharmacyDay {
    /// Row ID.
    pub id: i64,
    /// Owning pharmacy ID.
    pub pharmacy_id: i64,
    /// Day name.
    pub name: String,
    /// Whether the pharmacy is open on this day.
    pub open: bool,
    /// Opening time, 'HH:MM'.
    pub starts_at: String,
    /// Closing time, 'HH:MM'.
    pub ends_at: String,
}

/// Data for creating a new pharmacy.
#[derive(Debug, Clone)]
pub struct NewPharmacy {
    /// Company name.
    pub company_name: String,
    /// Serial number.
    pub serial_number: i64,
    /// Registration date.
    pub registration_date: String,
}

/// Core info fields applied by an info update.
pub type PharmacyInfoUpdate = NewPharmacy;

/// Data for one operating-hours row.
#[derive(Debug, Clone)]
pub struct NewPharmacyDay {
    /// Day name.
    pub name: DayName,
    /// Whether the pharmacy is open on this day.
    pub open: bool,
    /// Opening time, 'HH:MM'.
    pub starts_at: String,
    /// Closing time, 'HH:MM'.
    pub ends_at: String,
}

const PHARMACY_COLUMNS: &str = "id, company_name, serial_number, registration_date, address, \
                                phone_number, avatar, manager_id, created_at";

/// Repository for pharmacy operations, all scoped by owning manager.
pub struct PharmacyRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> PharmacyRepository<'a> {
    /// Create a new repository instance.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a pharmacy owned by a manager.
    pub async fn create(&self, manager_id: i64, new: &NewPharmacy) -> Result<Pharmacy> {
        let result = sqlx::query(
            "INSERT INTO pharmacies (company_name, serial_number, registration_date, manager_id)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(&new.company_name)
        .bind(new.serial_number)
        .bind(&new.registration_date)
        .bind(manager_id)
        .execute(self.pool)
        .await
        .map_err(|e| MedokaError::Database(e.to_string()))?;

        let id = result.last_insert_rowid();
        self.get_owned(id, manager_id)
            .await?
            .ok_or_else(|| MedokaError::NotFound("pharmacy".to_string()))
    }

    /// Get a pharmacy by id, only if owned by the given manager.
    pub async fn get_owned(&self, id: i64, manager_id: i64) -> Result<Option<Pharmacy>> {
        let result = sqlx::query_as::<_, Pharmacy>(&format!(
            "SELECT {PHARMACY_COLUMNS} FROM pharmacies WHERE id = $1 AND manager_id = $2"
        ))
        .bind(id)
        .bind(manager_id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| MedokaError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Update the core info fields of an owned pharmacy.
    pub async fn update_info(&self, id: i64, update: &PharmacyInfoUpdate) -> Result<()> {
        sqlx::query(
            "UPDATE pharmacies
             SET company_name = $1, serial_number = $2, registration_date = $3
             WHERE id = $4",
        )
        .bind(&update.company_name)
        .bind(update.serial_number)
        .bind(&update.registration_date)
        .bind(id)
        .execute(self.pool)
        .await
        .map_err(|e| MedokaError::Database(e.to_string()))?;

        Ok(())
    }

    /// Update the address.
    pub async fn update_address(&self, id: i64, address: &str) -> Result<()> {
        sqlx::query("UPDATE pharmacies SET address = $1 WHERE id = $2")
            .bind(address)
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| MedokaError::Database(e.to_string()))?;

        Ok(())
    }

    /// Update the phone number.
    pub async fn update_phone(&self, id: i64, phone_number: i64) -> Result<()> {
        sqlx::query("UPDATE pharmacies SET phone_number = $1 WHERE id = $2")
            .bind(phone_number)
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| MedokaError::Database(e.to_string()))?;

        Ok(())
    }

    /// Update the avatar URL.
    pub async fn update_avatar(&self, id: i64, avatar: &str) -> Result<()> {
        sqlx::query("UPDATE pharmacies SET avatar = $1 WHERE id = $2")
            .bind(avatar)
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| MedokaError::Database(e.to_string()))?;

        Ok(())
    }

    /// Replace the stored week of operating hours.
    ///
    /// Delete-then-insert inside a transaction, so re-submitting a week never
    /// accumulates duplicate rows.
    pub async fn replace_days(&self, id: i64, days: &[NewPharmacyDay]) -> Result<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| MedokaError::Database(e.to_string()))?;

        sqlx::query("DELETE FROM pharmacy_days WHERE pharmacy_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| MedokaError::Database(e.to_string()))?;

        for day in days {
            sqlx::query(
                "INSERT INTO pharmacy_days (pharmacy_id, name, open, starts_at, ends_at)
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(id)
            .bind(day.name.as_str())
            .bind(day.open)
            .bind(&day.starts_at)
            .bind(&day.ends_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| MedokaError::Database(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| MedokaError::Database(e.to_string()))?;

        Ok(())
    }

    /// List the stored operating-hours rows for a pharmacy.
    pub async fn days(&self, id: i64) -> Result<Vec<PharmacyDay>> {
        let rows = sqlx::query_as::<_, PharmacyDay>(
            "SELECT id, pharmacy_id, name, open, starts_at, ends_at
             FROM pharmacy_days WHERE pharmacy_id = $1 ORDER BY id",
        )
        .bind(id)
        .fetch_all(self.pool)
        .await
        .map_err(|e| MedokaError::Database(e.to_string()))?;

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::ManagerRepository;
    use crate::Database;

    async fn setup() -> (Database, i64) {
        let db = Database::open_in_memory().await.unwrap();
        let manager = ManagerRepository::new(db.pool())
            .create_with_email("a@b.com")
            .await
            .unwrap();
        (db, manager.id)
    }

    fn sample_pharmacy() -> NewPharmacy {
        NewPharmacy {
            company_name: "Corner Pharmacy".to_string(),
            serial_number: 4711,
            registration_date: "2023-05-01".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_owned() {
        let (db, manager_id) = setup().await;
        let repo = PharmacyRepository::new(db.pool());

        let pharmacy = repo.create(manager_id, &sample_pharmacy()).await.unwrap();
        assert_eq!(pharmacy.company_name, "Corner Pharmacy");
        assert_eq!(pharmacy.manager_id, manager_id);
        assert!(pharmacy.address.is_none());

        let found = repo.get_owned(pharmacy.id, manager_id).await.unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn test_get_owned_rejects_other_manager() {
        let (db, manager_id) = setup().await;
        let other = ManagerRepository::new(db.pool())
            .create_with_email("other@b.com")
            .await
            .unwrap();
        let repo = PharmacyRepository::new(db.pool());

        let pharmacy = repo.create(manager_id, &sample_pharmacy()).await.unwrap();

        // Same id, different owner: not found
        assert!(repo.get_owned(pharmacy.id, other.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_fields() {
        let (db, manager_id) = setup().await;
        let repo = PharmacyRepository::new(db.pool());

        let pharmacy = repo.create(manager_id, &sample_pharmacy()).await.unwrap();

        repo.update_address(pharmacy.id, "12 Harbor Street").await.unwrap();
        repo.update_phone(pharmacy.id, 555123456).await.unwrap();
        repo.update_avatar(pharmacy.id, "https://cdn.test/avatar.png")
            .await
            .unwrap();

        let reloaded = repo
            .get_owned(pharmacy.id, manager_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reloaded.address.as_deref(), Some("12 Harbor Street"));
        assert_eq!(reloaded.phone_number, Some(555123456));
        assert_eq!(
            reloaded.avatar.as_deref(),
            Some("https://cdn.test/avatar.png")
        );
    }

    #[tokio::test]
    async fn test_replace_days() {
        let (db, manager_id) = setup().await;
        let repo = PharmacyRepository::new(db.pool());

        let pharmacy = repo.create(manager_id, &sample_pharmacy()).await.unwrap();

        let week = vec![
            NewPharmacyDay {
                name: DayName::Monday,
                open: true,
                starts_at: "08:30".to_string(),
                ends_at: "18:00".to_string(),
            },
            NewPharmacyDay {
                name: DayName::Sunday,
                open: false,
                starts_at: "00:00".to_string(),
                ends_at: "00:00".to_string(),
            },
        ];
        repo.replace_days(pharmacy.id, &week).await.unwrap();

        // Re-submitting replaces instead of accumulating
        repo.replace_days(pharmacy.id, &week).await.unwrap();

        let days = repo.days(pharmacy.id).await.unwrap();
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].name, "Monday");
        assert!(days[0].open);
        assert_eq!(days[0].starts_at, "08:30");
        assert_eq!(days[1].name, "Sunday");
        assert!(!days[1].open);
    }

    #[test]
    fn test_day_name_round_trip() {
        for day in [
            DayName::Monday,
            DayName::Tuesday,
            DayName::Wednesday,
            DayName::Thursday,
            DayName::Friday,
            DayName::Saturday,
            DayName::Sunday,
        ] {
            assert_eq!(DayName::from_str(day.as_str()).unwrap(), day);
        }
        assert!(DayName::from_str("Holiday").is_err());
    }
}
