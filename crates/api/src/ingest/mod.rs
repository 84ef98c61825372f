//! Telemetry ingestion pipeline.
//!
//! One [`IngestService::ingest`] call takes a raw sample through the full
//! sequence: validate, ensure the device exists, evaluate the crisis
//! detector against the store's current open-crisis state, commit the
//! sample and the crisis mutation atomically, and publish the outcome on
//! the event bus for dashboard fan-out.

mod locks;

use std::sync::Arc;

use chrono::Utc;
use pulsewatch_core::detector;
use pulsewatch_core::error::CoreError;
use pulsewatch_core::store::TelemetryStore;
use pulsewatch_core::types::{CrisisEvent, TelemetrySample, TelemetryStatus, Timestamp};
use pulsewatch_events::{EventBus, TelemetryUpdate};
use serde::Deserialize;

use crate::error::{AppError, AppResult};

pub use locks::DeviceLocks;

/// An incoming telemetry sample, as posted by a device (or the field-side
/// bridge relaying for it).
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryIn {
    pub device_id: String,
    /// Defaults to the ingestion time when absent.
    pub timestamp: Option<Timestamp>,
    pub bpm: i32,
    pub baseline_bpm: Option<i32>,
    pub status: TelemetryStatus,
}

impl TelemetryIn {
    /// Validate and normalize into a [`TelemetrySample`].
    ///
    /// Rejection happens here, before any store interaction, so a
    /// malformed sample never causes a partial write.
    fn into_sample(self) -> Result<TelemetrySample, CoreError> {
        if self.device_id.trim().is_empty() {
            return Err(CoreError::Validation("device_id must not be empty".into()));
        }
        if self.bpm < 0 {
            return Err(CoreError::Validation(format!(
                "bpm must be non-negative, got {}",
                self.bpm
            )));
        }
        Ok(TelemetrySample {
            device_id: self.device_id,
            timestamp: self.timestamp.unwrap_or_else(Utc::now),
            bpm: self.bpm,
            baseline_bpm: self.baseline_bpm,
            status: self.status,
        })
    }
}

/// Orchestrates device registry, crisis detector, store, and event bus
/// for every incoming sample.
pub struct IngestService {
    store: Arc<dyn TelemetryStore>,
    bus: Arc<EventBus>,
    locks: DeviceLocks,
}

impl IngestService {
    pub fn new(store: Arc<dyn TelemetryStore>, bus: Arc<EventBus>) -> Self {
        Self {
            store,
            bus,
            locks: DeviceLocks::new(),
        }
    }

    /// Ingest one sample, returning the crisis event it produced, if any.
    ///
    /// Holds the device's lock across the open-crisis read and the atomic
    /// commit, so the at-most-one-open-crisis invariant survives
    /// concurrent same-device streams. Publishing on the bus never blocks
    /// and never fails the call.
    pub async fn ingest(&self, input: TelemetryIn) -> AppResult<Option<CrisisEvent>> {
        let sample = input.into_sample().map_err(AppError::Core)?;

        let _guard = self.locks.acquire(&sample.device_id).await;

        self.store.get_or_create_device(&sample.device_id).await?;

        let open = self.store.open_crisis(&sample.device_id).await?;
        let (mutation, event_kind) = detector::evaluate(open.as_ref(), &sample);
        let crisis_id = self.store.apply_sample(&sample, &mutation).await?;

        let crisis_event =
            event_kind
                .zip(crisis_id)
                .map(|(kind, crisis_id)| CrisisEvent { kind, crisis_id });

        if let Some(event) = &crisis_event {
            tracing::info!(
                device_id = %sample.device_id,
                crisis_id = %event.crisis_id,
                kind = ?event.kind,
                "Crisis lifecycle event"
            );
        }

        self.bus
            .publish(TelemetryUpdate::from_sample(&sample, crisis_event));

        Ok(crisis_event)
    }
}
