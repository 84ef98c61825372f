//! Crisis-detection state machine.
//!
//! [`evaluate`] is a pure function of (current open crisis, incoming
//! sample). It decides what should happen to the device's crisis state and
//! which lifecycle event, if any, to announce. All persistence and
//! concurrency control live with the caller -- the function itself never
//! fails on well-typed input.

use uuid::Uuid;

use crate::types::{Crisis, CrisisEventKind, Timestamp, TelemetrySample, TelemetryStatus};

/// Store mutation derived from one telemetry sample.
///
/// `Update` and `Close` carry the id of the open crisis they apply to, so
/// the store can commit them without re-querying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrisisMutation {
    /// Nothing to change.
    None,
    /// Open a new crisis for the sample's device.
    Open {
        start_time: Timestamp,
        initial_max_bpm: i32,
    },
    /// Raise the running max of the open crisis.
    Update { crisis_id: Uuid, max_bpm: i32 },
    /// Close the open crisis.
    Close {
        crisis_id: Uuid,
        end_time: Timestamp,
        max_bpm: i32,
        avg_bpm: i32,
    },
}

/// Evaluate one sample against the device's current open crisis.
///
/// Transition rules:
///
/// 1. `CRISIS_CONFIRMED` with no open crisis opens one and announces
///    [`CrisisEventKind::CrisisStarted`].
/// 2. While a crisis is open, every sample raises the running max;
///    `NORMAL` additionally closes the crisis and announces
///    [`CrisisEventKind::CrisisEnded`]. Any other status (including a
///    repeated `CRISIS_CONFIRMED`) only updates the max, so at most one
///    crisis is ever open per device. The close time is floored at the
///    crisis start time, so an out-of-order closing sample can never
///    produce a crisis that ends before it starts.
/// 3. Anything else is a no-op. In particular `SUSPECTED_MOVEMENT` with no
///    open crisis changes nothing.
///
/// The closing average equals the observed max. That mirrors the original
/// product rule and is kept deliberately, pending clarification.
pub fn evaluate(
    open: Option<&Crisis>,
    sample: &TelemetrySample,
) -> (CrisisMutation, Option<CrisisEventKind>) {
    match open {
        None if sample.status == TelemetryStatus::CrisisConfirmed => (
            CrisisMutation::Open {
                start_time: sample.timestamp,
                initial_max_bpm: sample.bpm,
            },
            Some(CrisisEventKind::CrisisStarted),
        ),
        Some(crisis) => {
            let max_bpm = crisis.max_bpm.unwrap_or(0).max(sample.bpm);
            if sample.status == TelemetryStatus::Normal {
                (
                    CrisisMutation::Close {
                        crisis_id: crisis.id,
                        // A late-arriving sample may carry a timestamp from
                        // before the crisis opened; a crisis never ends
                        // before it starts.
                        end_time: sample.timestamp.max(crisis.start_time),
                        max_bpm,
                        avg_bpm: max_bpm,
                    },
                    Some(CrisisEventKind::CrisisEnded),
                )
            } else {
                (
                    CrisisMutation::Update {
                        crisis_id: crisis.id,
                        max_bpm,
                    },
                    None,
                )
            }
        }
        None => (CrisisMutation::None, None),
    }
}
