//! Durable [`TelemetryStore`] backend on PostgreSQL.

use pulsewatch_core::detector::CrisisMutation;
use pulsewatch_core::error::StoreError;
use pulsewatch_core::store::TelemetryStore;
use pulsewatch_core::types::{Crisis, Device, TelemetrySample};
use uuid::Uuid;

use crate::repositories::{CrisisRepo, DeviceRepo, TelemetryRepo};
use crate::DbPool;

/// PostgreSQL-backed store.
///
/// Wraps the shared connection pool; cheap to clone.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn backend(err: sqlx::Error) -> StoreError {
    StoreError::Backend(err.into())
}

#[async_trait::async_trait]
impl TelemetryStore for PgStore {
    async fn get_or_create_device(&self, device_id: &str) -> Result<Device, StoreError> {
        DeviceRepo::insert_if_absent(&self.pool, device_id)
            .await
            .map_err(backend)?;
        let row = DeviceRepo::find_by_id(&self.pool, device_id)
            .await
            .map_err(backend)?
            // The insert above guarantees the row exists and devices are
            // never deleted.
            .ok_or_else(|| StoreError::Backend(anyhow::anyhow!("device vanished after upsert")))?;
        Ok(row.into())
    }

    async fn open_crisis(&self, device_id: &str) -> Result<Option<Crisis>, StoreError> {
        let row = CrisisRepo::find_open(&self.pool, device_id)
            .await
            .map_err(backend)?;
        Ok(row.map(Into::into))
    }

    async fn apply_sample(
        &self,
        sample: &TelemetrySample,
        mutation: &CrisisMutation,
    ) -> Result<Option<Uuid>, StoreError> {
        let mut tx = self.pool.begin().await.map_err(backend)?;

        TelemetryRepo::insert(&mut *tx, sample)
            .await
            .map_err(backend)?;

        let crisis_id = match mutation {
            CrisisMutation::None => None,
            CrisisMutation::Open {
                start_time,
                initial_max_bpm,
            } => {
                let id = Uuid::new_v4();
                CrisisRepo::open(&mut *tx, id, &sample.device_id, *start_time, *initial_max_bpm)
                    .await
                    .map_err(backend)?;
                Some(id)
            }
            CrisisMutation::Update { crisis_id, max_bpm } => {
                CrisisRepo::update_max(&mut *tx, *crisis_id, *max_bpm)
                    .await
                    .map_err(backend)?;
                Some(*crisis_id)
            }
            CrisisMutation::Close {
                crisis_id,
                end_time,
                max_bpm,
                avg_bpm,
            } => {
                CrisisRepo::close(&mut *tx, *crisis_id, *end_time, *max_bpm, *avg_bpm)
                    .await
                    .map_err(backend)?;
                Some(*crisis_id)
            }
        };

        tx.commit().await.map_err(backend)?;
        Ok(crisis_id)
    }

    async fn crises_for_device(&self, device_id: &str) -> Result<Vec<Crisis>, StoreError> {
        let rows = CrisisRepo::list_for_device(&self.pool, device_id)
            .await
            .map_err(backend)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
