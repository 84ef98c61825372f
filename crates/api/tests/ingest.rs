//! Tests for the ingestion pipeline, exercised directly against the
//! in-memory store.

use std::sync::Arc;

use pulsewatch_core::memory::MemoryStore;
use pulsewatch_core::store::TelemetryStore;
use pulsewatch_core::types::{CrisisEventKind, TelemetryStatus, Timestamp};
use pulsewatch_events::EventBus;

use pulsewatch_api::ingest::{IngestService, TelemetryIn};

fn service() -> (Arc<IngestService>, Arc<MemoryStore>, Arc<EventBus>) {
    let store = Arc::new(MemoryStore::new());
    let bus = Arc::new(EventBus::default());
    let service = Arc::new(IngestService::new(
        Arc::clone(&store) as _,
        Arc::clone(&bus),
    ));
    (service, store, bus)
}

fn input(
    device_id: &str,
    status: TelemetryStatus,
    bpm: i32,
    timestamp: Option<Timestamp>,
) -> TelemetryIn {
    TelemetryIn {
        device_id: device_id.to_string(),
        timestamp,
        bpm,
        baseline_bpm: None,
        status,
    }
}

// ---------------------------------------------------------------------------
// Test: a status sequence produces the expected event sequence
// ---------------------------------------------------------------------------

#[tokio::test]
async fn status_sequence_produces_expected_events() {
    let (service, store, _) = service();
    use TelemetryStatus::*;

    let mut events = Vec::new();
    for (status, bpm) in [(CrisisConfirmed, 120), (SuspectedMovement, 130), (Normal, 90)] {
        let event = service
            .ingest(input("bracelet-01", status, bpm, None))
            .await
            .unwrap();
        events.push(event.map(|e| e.kind));
    }

    assert_eq!(
        events,
        vec![
            Some(CrisisEventKind::CrisisStarted),
            None,
            Some(CrisisEventKind::CrisisEnded),
        ]
    );

    let crises = store.crises_for_device("bracelet-01").await.unwrap();
    assert_eq!(crises.len(), 1);
    assert!(!crises[0].is_open());
    assert_eq!(crises[0].max_bpm, Some(130));
    assert_eq!(crises[0].avg_bpm, Some(130));
}

// ---------------------------------------------------------------------------
// Test: concurrent same-device samples keep at most one crisis open
// ---------------------------------------------------------------------------

#[tokio::test]
async fn concurrent_confirmed_samples_open_exactly_one_crisis() {
    let (service, store, _) = service();

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let service = Arc::clone(&service);
            tokio::spawn(async move {
                service
                    .ingest(input(
                        "bracelet-02",
                        TelemetryStatus::CrisisConfirmed,
                        115,
                        None,
                    ))
                    .await
            })
        })
        .collect();

    let mut started = 0;
    for task in tasks {
        if let Some(event) = task.await.unwrap().unwrap() {
            assert_eq!(event.kind, CrisisEventKind::CrisisStarted);
            started += 1;
        }
    }

    // Exactly one sample won the race to open the crisis.
    assert_eq!(started, 1);
    let crises = store.crises_for_device("bracelet-02").await.unwrap();
    assert_eq!(crises.len(), 1);
    assert!(crises[0].is_open());
    assert_eq!(store.sample_count().await, 8);
}

// ---------------------------------------------------------------------------
// Test: different devices are fully independent
// ---------------------------------------------------------------------------

#[tokio::test]
async fn devices_are_independent() {
    let (service, store, _) = service();

    for device in ["a", "b", "c"] {
        service
            .ingest(input(device, TelemetryStatus::CrisisConfirmed, 110, None))
            .await
            .unwrap();
    }
    service
        .ingest(input("a", TelemetryStatus::Normal, 80, None))
        .await
        .unwrap();

    assert!(store.open_crisis("a").await.unwrap().is_none());
    assert!(store.open_crisis("b").await.unwrap().is_some());
    assert!(store.open_crisis("c").await.unwrap().is_some());
    assert_eq!(store.device_count().await, 3);
}

// ---------------------------------------------------------------------------
// Test: every ingested sample is published to the event bus in order
// ---------------------------------------------------------------------------

#[tokio::test]
async fn ingestion_publishes_updates_in_order() {
    let (service, _, bus) = service();
    let mut rx = bus.subscribe();

    use TelemetryStatus::*;
    for (status, bpm) in [(CrisisConfirmed, 120), (SuspectedMovement, 125), (Normal, 88)] {
        service
            .ingest(input("bracelet-03", status, bpm, None))
            .await
            .unwrap();
    }

    let first = rx.recv().await.unwrap();
    assert_eq!(first.bpm, 120);
    assert_eq!(
        first.crisis_event.unwrap().kind,
        CrisisEventKind::CrisisStarted
    );

    let second = rx.recv().await.unwrap();
    assert_eq!(second.bpm, 125);
    assert!(second.crisis_event.is_none());

    let third = rx.recv().await.unwrap();
    assert_eq!(third.bpm, 88);
    assert_eq!(
        third.crisis_event.unwrap().kind,
        CrisisEventKind::CrisisEnded
    );
}

// ---------------------------------------------------------------------------
// Test: validation failures never touch the store or the bus
// ---------------------------------------------------------------------------

#[tokio::test]
async fn invalid_samples_are_rejected_before_any_side_effect() {
    let (service, store, bus) = service();
    let mut rx = bus.subscribe();

    let result = service
        .ingest(input("", TelemetryStatus::Normal, 80, None))
        .await;
    assert!(result.is_err());

    let result = service
        .ingest(input("bracelet-04", TelemetryStatus::Normal, -1, None))
        .await;
    assert!(result.is_err());

    assert_eq!(store.sample_count().await, 0);
    assert_eq!(store.device_count().await, 0);
    assert!(rx.try_recv().is_err());
}

// ---------------------------------------------------------------------------
// Test: out-of-order timestamps are accepted, not rejected
// ---------------------------------------------------------------------------

#[tokio::test]
async fn out_of_order_timestamps_are_accepted() {
    let (service, store, _) = service();
    let base: Timestamp = "2026-08-27T12:00:00Z".parse().unwrap();

    service
        .ingest(input(
            "bracelet-05",
            TelemetryStatus::CrisisConfirmed,
            120,
            Some(base),
        ))
        .await
        .unwrap();

    // An earlier-stamped sample arrives late; it still feeds the max.
    service
        .ingest(input(
            "bracelet-05",
            TelemetryStatus::SuspectedMovement,
            140,
            Some(base - chrono::Duration::seconds(30)),
        ))
        .await
        .unwrap();

    let open = store.open_crisis("bracelet-05").await.unwrap().unwrap();
    assert_eq!(open.max_bpm, Some(140));
}

// ---------------------------------------------------------------------------
// Test: a late-stamped closing sample never ends a crisis before it starts
// ---------------------------------------------------------------------------

#[tokio::test]
async fn late_stamped_normal_closes_without_reversing_time_order() {
    let (service, store, _) = service();
    let base: Timestamp = "2026-08-27T12:00:00Z".parse().unwrap();

    service
        .ingest(input(
            "bracelet-06",
            TelemetryStatus::CrisisConfirmed,
            125,
            Some(base),
        ))
        .await
        .unwrap();

    // The closing NORMAL arrives stamped a minute before the crisis opened.
    let event = service
        .ingest(input(
            "bracelet-06",
            TelemetryStatus::Normal,
            85,
            Some(base - chrono::Duration::seconds(60)),
        ))
        .await
        .unwrap();
    assert_eq!(event.unwrap().kind, CrisisEventKind::CrisisEnded);

    let crises = store.crises_for_device("bracelet-06").await.unwrap();
    assert_eq!(crises.len(), 1);
    let crisis = &crises[0];
    assert!(!crisis.is_open());
    // The close time is floored at the start time.
    assert_eq!(crisis.end_time, Some(crisis.start_time));
    assert_eq!(crisis.start_time, base);
}
