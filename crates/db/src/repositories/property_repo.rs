//! Repository for the `properties` table.

use clockcheck_core::types::DbId;
use sqlx::SqlitePool;

use crate::models::property::{Property, PropertyFields};
use crate::NOW;

/// Joined column list: the property plus its contact's details.
const COLUMNS: &str = "p.id, p.contact_id, p.name, p.address, p.city, p.state, p.postal_code, \
     p.notes, p.created_at, p.updated_at, \
     c.name AS contact_name, c.phone AS contact_phone, c.email AS contact_email, \
     c.organization AS contact_organization";

const FROM: &str = "FROM properties p JOIN contacts c ON c.id = p.contact_id";

/// Provides CRUD operations for properties.
pub struct PropertyRepo;

impl PropertyRepo {
    /// Insert a new property, returning the joined row.
    ///
    /// Fails with a unique violation if another property has the same address.
    pub async fn create(
        pool: &SqlitePool,
        input: &PropertyFields,
    ) -> Result<Property, sqlx::Error> {
        let id = sqlx::query_scalar::<_, DbId>(
            "INSERT INTO properties (contact_id, name, address, city, state, postal_code, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING id",
        )
        .bind(input.contact_id)
        .bind(&input.name)
        .bind(&input.address)
        .bind(&input.city)
        .bind(&input.state)
        .bind(&input.postal_code)
        .bind(&input.notes)
        .fetch_one(pool)
        .await?;

        Self::find_by_id(pool, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Find a property by its ID.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Property>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} {FROM} WHERE p.id = $1");
        sqlx::query_as::<_, Property>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a property with the given ID exists.
    pub async fn exists(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM properties WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// List properties, optionally only those owned by `contact_id`,
    /// ordered by name case-insensitively.
    pub async fn list(
        pool: &SqlitePool,
        contact_id: Option<DbId>,
    ) -> Result<Vec<Property>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} {FROM}
             WHERE ($1 IS NULL OR p.contact_id = $1)
             ORDER BY p.name COLLATE NOCASE, p.id"
        );
        sqlx::query_as::<_, Property>(&query)
            .bind(contact_id)
            .fetch_all(pool)
            .await
    }

    /// Replace every editable column of a property.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &PropertyFields,
    ) -> Result<Option<Property>, sqlx::Error> {
        let query = format!(
            "UPDATE properties SET
                contact_id = $2,
                name = $3,
                address = $4,
                city = $5,
                state = $6,
                postal_code = $7,
                notes = $8,
                updated_at = {NOW}
             WHERE id = $1"
        );
        let result = sqlx::query(&query)
            .bind(id)
            .bind(input.contact_id)
            .bind(&input.name)
            .bind(&input.address)
            .bind(&input.city)
            .bind(&input.state)
            .bind(&input.postal_code)
            .bind(&input.notes)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        Self::find_by_id(pool, id).await
    }

    /// Permanently delete a property and its clocks and inspections.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM properties WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
