//! Pulsewatch in-process event infrastructure.
//!
//! - [`EventBus`] -- publish/subscribe hub backed by
//!   `tokio::sync::broadcast`, decoupling telemetry ingestion from
//!   dashboard delivery.
//! - [`TelemetryUpdate`] -- the canonical per-sample event envelope pushed
//!   to live dashboards.

pub mod bus;

pub use bus::{EventBus, TelemetryUpdate};
