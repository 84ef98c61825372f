//! Per-device configuration flags.
//!
//! Holds the `use_hr_check` flag the field-side bridge polls to decide
//! whether heart-rate corroboration is required before trusting a
//! `CRISIS_CONFIRMED` signal. Process-lifetime only: constructed at
//! startup, injected into the handlers, never persisted.

use std::collections::HashMap;
use std::sync::RwLock;

/// Thread-safe device id → `use_hr_check` mapping.
///
/// Reads for a device that was never configured return `false` -- the flag
/// must not block crisis confirmation while a device's baseline bpm is
/// still uncalibrated.
#[derive(Default)]
pub struct DeviceConfigStore {
    flags: RwLock<HashMap<String, bool>>,
}

impl DeviceConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current flag for `device_id`, defaulting to `false`.
    pub fn get(&self, device_id: &str) -> bool {
        self.flags
            .read()
            .expect("device config lock poisoned")
            .get(device_id)
            .copied()
            .unwrap_or(false)
    }

    /// Set the flag for `device_id`.
    pub fn set(&self, device_id: &str, use_hr_check: bool) {
        self.flags
            .write()
            .expect("device config lock poisoned")
            .insert(device_id.to_string(), use_hr_check);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_device_defaults_to_false() {
        let store = DeviceConfigStore::new();
        assert!(!store.get("never-seen"));
    }

    #[test]
    fn set_then_get_round_trips() {
        let store = DeviceConfigStore::new();

        store.set("bracelet-01", true);
        assert!(store.get("bracelet-01"));

        store.set("bracelet-01", false);
        assert!(!store.get("bracelet-01"));
    }

    #[test]
    fn flags_are_independent_per_device() {
        let store = DeviceConfigStore::new();
        store.set("a", true);
        assert!(store.get("a"));
        assert!(!store.get("b"));
    }
}
