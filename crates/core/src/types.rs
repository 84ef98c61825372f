//! Domain entity types shared across the workspace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = DateTime<Utc>;

/// A wearable device known to the system.
///
/// Devices are created lazily: the first telemetry sample referencing an
/// unknown id creates a record with `name` equal to the id. Devices are
/// never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    /// Opaque device identifier, assigned by the wearable itself.
    pub id: String,
    pub name: String,
}

/// Classification attached to a telemetry sample by the wearable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TelemetryStatus {
    Normal,
    SuspectedMovement,
    CrisisConfirmed,
}

impl TelemetryStatus {
    /// Wire representation, as sent by devices and dashboards.
    pub fn as_str(&self) -> &'static str {
        match self {
            TelemetryStatus::Normal => "NORMAL",
            TelemetryStatus::SuspectedMovement => "SUSPECTED_MOVEMENT",
            TelemetryStatus::CrisisConfirmed => "CRISIS_CONFIRMED",
        }
    }
}

impl std::fmt::Display for TelemetryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TelemetryStatus {
    type Err = crate::error::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NORMAL" => Ok(TelemetryStatus::Normal),
            "SUSPECTED_MOVEMENT" => Ok(TelemetryStatus::SuspectedMovement),
            "CRISIS_CONFIRMED" => Ok(TelemetryStatus::CrisisConfirmed),
            other => Err(crate::error::CoreError::Validation(format!(
                "unknown telemetry status: {other}"
            ))),
        }
    }
}

/// One heart-rate reading from a device.
///
/// Immutable once stored. Timestamps are trusted as provided by the
/// upstream device; out-of-order arrival is accepted and feeds the max
/// computation exactly like in-order samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySample {
    pub device_id: String,
    pub timestamp: Timestamp,
    /// Heart rate in beats per minute.
    pub bpm: i32,
    /// Calibrated resting rate, when the device has one.
    pub baseline_bpm: Option<i32>,
    pub status: TelemetryStatus,
}

/// A seizure-like episode derived from telemetry.
///
/// `end_time == None` means the crisis is still open. At most one open
/// crisis exists per device at any instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crisis {
    pub id: Uuid,
    pub device_id: String,
    pub start_time: Timestamp,
    pub end_time: Option<Timestamp>,
    /// Highest bpm observed while the crisis was open. Never decreases.
    pub max_bpm: Option<i32>,
    /// Populated at close. Defined equal to the final max -- literal
    /// behavior inherited from the product rule, pending clarification.
    pub avg_bpm: Option<i32>,
}

impl Crisis {
    pub fn is_open(&self) -> bool {
        self.end_time.is_none()
    }
}

/// Lifecycle transition announced to dashboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CrisisEventKind {
    CrisisStarted,
    CrisisEnded,
}

/// A crisis lifecycle event tied to a concrete crisis record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrisisEvent {
    #[serde(rename = "type")]
    pub kind: CrisisEventKind,
    pub crisis_id: Uuid,
}
