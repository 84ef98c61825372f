//! Repository for the `crises` table.

use pulsewatch_core::types::Timestamp;
use sqlx::PgExecutor;
use uuid::Uuid;

use crate::models::CrisisRow;

/// Column list for `crises` queries.
const COLUMNS: &str = "id, device_id, start_time, end_time, max_bpm, avg_bpm";

/// CRUD operations for crisis episodes.
pub struct CrisisRepo;

impl CrisisRepo {
    /// The device's currently open crisis (end_time IS NULL), if any.
    ///
    /// The partial unique index `uq_crises_open_per_device` guarantees at
    /// most one row can match.
    pub async fn find_open(
        executor: impl PgExecutor<'_>,
        device_id: &str,
    ) -> Result<Option<CrisisRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM crises WHERE device_id = $1 AND end_time IS NULL"
        );
        sqlx::query_as::<_, CrisisRow>(&query)
            .bind(device_id)
            .fetch_optional(executor)
            .await
    }

    /// Open a new crisis with a client-generated id.
    pub async fn open(
        executor: impl PgExecutor<'_>,
        id: Uuid,
        device_id: &str,
        start_time: Timestamp,
        max_bpm: i32,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO crises (id, device_id, start_time, max_bpm) VALUES ($1, $2, $3, $4)",
        )
        .bind(id)
        .bind(device_id)
        .bind(start_time)
        .bind(max_bpm)
        .execute(executor)
        .await?;
        Ok(())
    }

    /// Raise the running max of an open crisis.
    pub async fn update_max(
        executor: impl PgExecutor<'_>,
        id: Uuid,
        max_bpm: i32,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE crises SET max_bpm = $2 WHERE id = $1")
            .bind(id)
            .bind(max_bpm)
            .execute(executor)
            .await?;
        Ok(())
    }

    /// Close a crisis, finalizing end time, max and average bpm.
    pub async fn close(
        executor: impl PgExecutor<'_>,
        id: Uuid,
        end_time: Timestamp,
        max_bpm: i32,
        avg_bpm: i32,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE crises SET end_time = $2, max_bpm = $3, avg_bpm = $4 WHERE id = $1")
            .bind(id)
            .bind(end_time)
            .bind(max_bpm)
            .bind(avg_bpm)
            .execute(executor)
            .await?;
        Ok(())
    }

    /// All crises for a device, most recent first.
    pub async fn list_for_device(
        executor: impl PgExecutor<'_>,
        device_id: &str,
    ) -> Result<Vec<CrisisRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM crises WHERE device_id = $1 ORDER BY start_time DESC"
        );
        sqlx::query_as::<_, CrisisRow>(&query)
            .bind(device_id)
            .fetch_all(executor)
            .await
    }
}
