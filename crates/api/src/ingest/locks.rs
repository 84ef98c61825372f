//! Per-device mutual exclusion for crisis-state mutation.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::OwnedMutexGuard;

/// Hands out one async lock per device id.
///
/// Ingestion holds a device's lock across its read-evaluate-apply
/// sequence, so two concurrent samples for the same device can never both
/// observe "no open crisis" and both open one. Samples for different
/// devices proceed fully in parallel.
///
/// The map only ever grows, one entry per device seen; devices number in
/// the dozens, not millions, so no eviction is needed.
#[derive(Default)]
pub struct DeviceLocks {
    locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl DeviceLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for `device_id`, creating it on first contact.
    pub async fn acquire(&self, device_id: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().expect("device lock map poisoned");
            Arc::clone(locks.entry(device_id.to_string()).or_default())
        };
        lock.lock_owned().await
    }
}
