//! Pulsewatch domain logic.
//!
//! This crate holds everything that does not touch the network or a
//! database directly:
//!
//! - [`types`] -- devices, telemetry samples, crisis records.
//! - [`detector`] -- the pure crisis-detection state machine.
//! - [`store`] -- the abstract [`TelemetryStore`] backend trait.
//! - [`memory`] -- an in-memory `TelemetryStore` used by tests and as an
//!   ephemeral backing.
//! - [`device_config`] -- the process-lifetime per-device flag store.

pub mod detector;
pub mod device_config;
pub mod error;
pub mod memory;
pub mod store;
pub mod types;

pub use detector::{evaluate, CrisisMutation};
pub use device_config::DeviceConfigStore;
pub use error::{CoreError, StoreError};
pub use memory::MemoryStore;
pub use store::TelemetryStore;
pub use types::{Crisis, CrisisEvent, CrisisEventKind, Device, TelemetrySample, TelemetryStatus};
