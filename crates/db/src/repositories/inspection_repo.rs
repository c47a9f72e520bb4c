//! Repository for the `inspections` table.

use clockcheck_core::inspection::STATUS_IN_PROGRESS;
use clockcheck_core::types::DbId;
use sqlx::SqlitePool;

use crate::models::inspection::{Inspection, InspectionChanges, InspectionFilter, NewInspection};
use crate::NOW;

/// Joined column list: the inspection plus its clock, property and contact.
const COLUMNS: &str = "i.id, i.clock_id, i.status, i.started_at, i.completed_at, i.summary, \
     i.notes, i.created_at, i.updated_at, \
     cl.label AS clock_label, cl.property_id, \
     p.name AS property_name, p.address AS property_address, c.name AS contact_name";

const FROM: &str = "FROM inspections i \
     JOIN clocks cl ON cl.id = i.clock_id \
     JOIN properties p ON p.id = cl.property_id \
     JOIN contacts c ON c.id = p.contact_id";

/// Most recent first. `julianday` normalizes the mixed `Z` / `+00:00`
/// suffixes and keeps sub-second precision.
const ORDER_BY: &str =
    "ORDER BY julianday(i.started_at) DESC, julianday(i.updated_at) DESC, i.id DESC";

/// Provides lifecycle operations for inspections.
pub struct InspectionRepo;

impl InspectionRepo {
    /// Start a new `in_progress` inspection.
    ///
    /// The insert is guarded in the same statement, so it only happens when
    /// the clock has no other in-progress inspection. Returns `None` when the
    /// guard blocks it. The partial unique index `uq_inspections_active_clock`
    /// backs the guard up.
    pub async fn start(
        pool: &SqlitePool,
        input: &NewInspection,
    ) -> Result<Option<Inspection>, sqlx::Error> {
        let query = format!(
            "INSERT INTO inspections (clock_id, status, started_at, summary, notes)
             SELECT $1, '{STATUS_IN_PROGRESS}', COALESCE($2, {NOW}), $3, $4
             WHERE NOT EXISTS (
                 SELECT 1 FROM inspections
                 WHERE clock_id = $1 AND status = '{STATUS_IN_PROGRESS}'
             )
             RETURNING id"
        );
        let id = sqlx::query_scalar::<_, DbId>(&query)
            .bind(input.clock_id)
            .bind(input.started_at)
            .bind(&input.summary)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await?;

        match id {
            Some(id) => Self::find_by_id(pool, id).await,
            None => Ok(None),
        }
    }

    /// Whether the clock currently has an in-progress inspection.
    pub async fn has_active(pool: &SqlitePool, clock_id: DbId) -> Result<bool, sqlx::Error> {
        let query = format!(
            "SELECT EXISTS(
                 SELECT 1 FROM inspections
                 WHERE clock_id = $1 AND status = '{STATUS_IN_PROGRESS}'
             )"
        );
        sqlx::query_scalar::<_, bool>(&query)
            .bind(clock_id)
            .fetch_one(pool)
            .await
    }

    /// Find an inspection by its ID.
    pub async fn find_by_id(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<Option<Inspection>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} {FROM} WHERE i.id = $1");
        sqlx::query_as::<_, Inspection>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List inspections matching `filter`, most recently started first.
    pub async fn list(
        pool: &SqlitePool,
        filter: &InspectionFilter,
    ) -> Result<Vec<Inspection>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} {FROM}
             WHERE ($1 IS NULL OR i.clock_id = $1)
               AND ($2 IS NULL OR i.status = $2)
             {ORDER_BY}"
        );
        sqlx::query_as::<_, Inspection>(&query)
            .bind(filter.clock_id)
            .bind(filter.status.map(|s| s.as_str()))
            .fetch_all(pool)
            .await
    }

    /// Apply a partial update. Only `Some` fields in `changes` are written;
    /// `updated_at` is always refreshed.
    ///
    /// Returns `None` if no row with the given `id` exists. Moving a second
    /// inspection of the same clock back to `in_progress` fails with a unique
    /// violation; leaving an in-progress inspection with a completion time
    /// fails the `ck_inspections_completion` check.
    pub async fn patch(
        pool: &SqlitePool,
        id: DbId,
        changes: &InspectionChanges,
    ) -> Result<Option<Inspection>, sqlx::Error> {
        let query = format!(
            "UPDATE inspections SET
                status = COALESCE($2, status),
                summary = COALESCE($3, summary),
                notes = COALESCE($4, notes),
                started_at = COALESCE($5, started_at),
                completed_at = COALESCE($6, completed_at),
                updated_at = {NOW}
             WHERE id = $1"
        );
        let result = sqlx::query(&query)
            .bind(id)
            .bind(changes.status.map(|s| s.as_str()))
            .bind(changes.summary.as_deref())
            .bind(changes.notes.as_deref())
            .bind(changes.started_at)
            .bind(changes.completed_at)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        Self::find_by_id(pool, id).await
    }

    /// Permanently delete an inspection. Returns `true` if a row was removed.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM inspections WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
