//! Abstract persistence backend for devices, telemetry, and crises.

use uuid::Uuid;

use crate::detector::CrisisMutation;
use crate::error::StoreError;
use crate::types::{Crisis, Device, TelemetrySample};

/// Persistence backend consumed by the ingestion pipeline and the query
/// handlers.
///
/// Implementations: [`MemoryStore`](crate::memory::MemoryStore) (ephemeral)
/// and `PgStore` in `pulsewatch-db` (durable).
///
/// The open-crisis invariant is re-derivable from persisted state alone --
/// no in-memory crisis state is authoritative, so a restart simply
/// re-reads the store.
#[async_trait::async_trait]
pub trait TelemetryStore: Send + Sync {
    /// Return the device with the given id, creating it (name = id) if it
    /// does not exist yet.
    ///
    /// Safe under concurrent calls for the same unseen id: exactly one
    /// device record results.
    async fn get_or_create_device(&self, device_id: &str) -> Result<Device, StoreError>;

    /// The device's currently open crisis, if any.
    async fn open_crisis(&self, device_id: &str) -> Result<Option<Crisis>, StoreError>;

    /// Persist `sample` and apply `mutation` in one atomic unit -- either
    /// both commit or neither does.
    ///
    /// Returns the id of the crisis the mutation touched (the freshly
    /// created one for [`CrisisMutation::Open`]), or `None` for
    /// [`CrisisMutation::None`].
    async fn apply_sample(
        &self,
        sample: &TelemetrySample,
        mutation: &CrisisMutation,
    ) -> Result<Option<Uuid>, StoreError>;

    /// All crisis records for a device, ordered by start time, most recent
    /// first.
    async fn crises_for_device(&self, device_id: &str) -> Result<Vec<Crisis>, StoreError>;
}
