//! Repository for the `clocks` table.

use clockcheck_core::types::DbId;
use sqlx::SqlitePool;

use crate::models::clock::{Clock, ClockFields};
use crate::NOW;

/// Joined column list: the clock plus its property and contact.
const COLUMNS: &str = "cl.id, cl.property_id, cl.label, cl.manufacturer, cl.model, \
     cl.station_count, cl.location, cl.notes, cl.created_at, cl.updated_at, \
     p.name AS property_name, p.address AS property_address, c.name AS contact_name";

const FROM: &str = "FROM clocks cl \
     JOIN properties p ON p.id = cl.property_id \
     JOIN contacts c ON c.id = p.contact_id";

/// Provides CRUD operations for clocks.
pub struct ClockRepo;

impl ClockRepo {
    /// Insert a new clock, returning the joined row.
    pub async fn create(pool: &SqlitePool, input: &ClockFields) -> Result<Clock, sqlx::Error> {
        let id = sqlx::query_scalar::<_, DbId>(
            "INSERT INTO clocks
                (property_id, label, manufacturer, model, station_count, location, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING id",
        )
        .bind(input.property_id)
        .bind(&input.label)
        .bind(&input.manufacturer)
        .bind(&input.model)
        .bind(input.station_count)
        .bind(&input.location)
        .bind(&input.notes)
        .fetch_one(pool)
        .await?;

        Self::find_by_id(pool, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Find a clock by its ID.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Clock>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} {FROM} WHERE cl.id = $1");
        sqlx::query_as::<_, Clock>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a clock with the given ID exists.
    pub async fn exists(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM clocks WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// List clocks, optionally only those at `property_id`, ordered by label
    /// case-insensitively.
    pub async fn list(
        pool: &SqlitePool,
        property_id: Option<DbId>,
    ) -> Result<Vec<Clock>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} {FROM}
             WHERE ($1 IS NULL OR cl.property_id = $1)
             ORDER BY cl.label COLLATE NOCASE, cl.id"
        );
        sqlx::query_as::<_, Clock>(&query)
            .bind(property_id)
            .fetch_all(pool)
            .await
    }

    /// Replace every editable column of a clock.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &ClockFields,
    ) -> Result<Option<Clock>, sqlx::Error> {
        let query = format!(
            "UPDATE clocks SET
                property_id = $2,
                label = $3,
                manufacturer = $4,
                model = $5,
                station_count = $6,
                location = $7,
                notes = $8,
                updated_at = {NOW}
             WHERE id = $1"
        );
        let result = sqlx::query(&query)
            .bind(id)
            .bind(input.property_id)
            .bind(&input.label)
            .bind(&input.manufacturer)
            .bind(&input.model)
            .bind(input.station_count)
            .bind(&input.location)
            .bind(&input.notes)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        Self::find_by_id(pool, id).await
    }

    /// Permanently delete a clock and its inspections. Returns `true` if a
    /// row was removed.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM clocks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
