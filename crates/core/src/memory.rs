//! In-memory [`TelemetryStore`] backend.
//!
//! Backs the integration tests and is usable as an ephemeral store when no
//! database is configured. A single `RwLock` over the whole state makes
//! every [`apply_sample`](TelemetryStore::apply_sample) call trivially
//! atomic.

use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::detector::CrisisMutation;
use crate::error::StoreError;
use crate::store::TelemetryStore;
use crate::types::{Crisis, Device, TelemetrySample};

#[derive(Default)]
struct State {
    devices: HashMap<String, Device>,
    samples: Vec<TelemetrySample>,
    crises: Vec<Crisis>,
}

/// Ephemeral store holding all records in process memory.
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored telemetry samples. Test observability helper.
    pub async fn sample_count(&self) -> usize {
        self.state.read().await.samples.len()
    }

    /// Number of stored device records. Test observability helper.
    pub async fn device_count(&self) -> usize {
        self.state.read().await.devices.len()
    }
}

#[async_trait::async_trait]
impl TelemetryStore for MemoryStore {
    async fn get_or_create_device(&self, device_id: &str) -> Result<Device, StoreError> {
        let mut state = self.state.write().await;
        let device = state
            .devices
            .entry(device_id.to_string())
            .or_insert_with(|| Device {
                id: device_id.to_string(),
                name: device_id.to_string(),
            });
        Ok(device.clone())
    }

    async fn open_crisis(&self, device_id: &str) -> Result<Option<Crisis>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .crises
            .iter()
            .find(|c| c.device_id == device_id && c.is_open())
            .cloned())
    }

    async fn apply_sample(
        &self,
        sample: &TelemetrySample,
        mutation: &CrisisMutation,
    ) -> Result<Option<Uuid>, StoreError> {
        let mut state = self.state.write().await;
        state.samples.push(sample.clone());

        let crisis_id = match mutation {
            CrisisMutation::None => None,
            CrisisMutation::Open {
                start_time,
                initial_max_bpm,
            } => {
                let crisis = Crisis {
                    id: Uuid::new_v4(),
                    device_id: sample.device_id.clone(),
                    start_time: *start_time,
                    end_time: None,
                    max_bpm: Some(*initial_max_bpm),
                    avg_bpm: None,
                };
                let id = crisis.id;
                state.crises.push(crisis);
                Some(id)
            }
            CrisisMutation::Update { crisis_id, max_bpm } => {
                if let Some(crisis) = state.crises.iter_mut().find(|c| c.id == *crisis_id) {
                    crisis.max_bpm = Some(*max_bpm);
                }
                Some(*crisis_id)
            }
            CrisisMutation::Close {
                crisis_id,
                end_time,
                max_bpm,
                avg_bpm,
            } => {
                if let Some(crisis) = state.crises.iter_mut().find(|c| c.id == *crisis_id) {
                    crisis.end_time = Some(*end_time);
                    crisis.max_bpm = Some(*max_bpm);
                    crisis.avg_bpm = Some(*avg_bpm);
                }
                Some(*crisis_id)
            }
        };
        Ok(crisis_id)
    }

    async fn crises_for_device(&self, device_id: &str) -> Result<Vec<Crisis>, StoreError> {
        let state = self.state.read().await;
        let mut crises: Vec<Crisis> = state
            .crises
            .iter()
            .filter(|c| c.device_id == device_id)
            .cloned()
            .collect();
        crises.sort_by(|a, b| b.start_time.cmp(&a.start_time));
        Ok(crises)
    }
}
