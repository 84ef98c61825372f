//! Repository for the `devices` table.

use sqlx::PgExecutor;

use crate::models::DeviceRow;

/// Column list for `devices` queries.
const COLUMNS: &str = "id, name";

/// Provides lookup and lazy creation for devices.
pub struct DeviceRepo;

impl DeviceRepo {
    /// Insert a device with `name = id` unless it already exists.
    ///
    /// `ON CONFLICT DO NOTHING` makes concurrent first-contact inserts for
    /// the same id race-free: exactly one row results.
    pub async fn insert_if_absent(
        executor: impl PgExecutor<'_>,
        device_id: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO devices (id, name) VALUES ($1, $1) ON CONFLICT (id) DO NOTHING")
            .bind(device_id)
            .execute(executor)
            .await?;
        Ok(())
    }

    /// Find a device by its id.
    pub async fn find_by_id(
        executor: impl PgExecutor<'_>,
        device_id: &str,
    ) -> Result<Option<DeviceRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM devices WHERE id = $1");
        sqlx::query_as::<_, DeviceRow>(&query)
            .bind(device_id)
            .fetch_optional(executor)
            .await
    }
}
