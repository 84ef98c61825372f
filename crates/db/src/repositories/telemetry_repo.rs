//! Repository for the append-only `telemetry` table.

use pulsewatch_core::types::TelemetrySample;
use sqlx::PgExecutor;

/// Insert-only access to raw telemetry history.
pub struct TelemetryRepo;

impl TelemetryRepo {
    /// Append one immutable sample.
    pub async fn insert(
        executor: impl PgExecutor<'_>,
        sample: &TelemetrySample,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO telemetry (device_id, timestamp, bpm, baseline_bpm, status)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(&sample.device_id)
        .bind(sample.timestamp)
        .bind(sample.bpm)
        .bind(sample.baseline_bpm)
        .bind(sample.status.as_str())
        .execute(executor)
        .await?;
        Ok(())
    }
}
