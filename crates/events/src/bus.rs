//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the hand-off point between the ingestion pipeline and
//! the dashboard fan-out task. Publishing never blocks and never waits on
//! subscribers, so a slow dashboard can never stall ingestion. It is
//! designed to be shared via `Arc<EventBus>` across the application.

use pulsewatch_core::types::{CrisisEvent, TelemetrySample, TelemetryStatus, Timestamp};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// TelemetryUpdate
// ---------------------------------------------------------------------------

/// One ingestion outcome, as pushed to live dashboards.
///
/// Serializes to the dashboard wire shape:
/// `{device_id, timestamp, bpm, baseline_bpm, status, crisis_event}` where
/// `crisis_event` is `null` unless this sample opened or closed a crisis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryUpdate {
    pub device_id: String,
    pub timestamp: Timestamp,
    pub bpm: i32,
    pub baseline_bpm: Option<i32>,
    pub status: TelemetryStatus,
    pub crisis_event: Option<CrisisEvent>,
}

impl TelemetryUpdate {
    /// Build the update for an ingested sample and its detector outcome.
    pub fn from_sample(sample: &TelemetrySample, crisis_event: Option<CrisisEvent>) -> Self {
        Self {
            device_id: sample.device_id.clone(),
            timestamp: sample.timestamp,
            bpm: sample.bpm,
            baseline_bpm: sample.baseline_bpm,
            status: sample.status,
            crisis_event,
        }
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// Wraps a [`broadcast::Sender`] so any number of subscribers can
/// independently receive every published [`TelemetryUpdate`].
pub struct EventBus {
    sender: broadcast::Sender<TelemetryUpdate>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest un-consumed updates are dropped
    /// and slow receivers observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an update to all current subscribers.
    ///
    /// If there are no active subscribers the update is silently dropped --
    /// the durable record was already committed by the store.
    pub fn publish(&self, update: TelemetryUpdate) {
        // Ignore the SendError -- it only means there are zero receivers.
        let _ = self.sender.send(update);
    }

    /// Subscribe to all updates published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<TelemetryUpdate> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
