//! HTTP request handlers.

pub mod crisis;
pub mod device_config;
pub mod telemetry;
