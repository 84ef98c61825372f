//! Data-access repositories, one per table.

pub mod crisis_repo;
pub mod device_repo;
pub mod telemetry_repo;

pub use crisis_repo::CrisisRepo;
pub use device_repo::DeviceRepo;
pub use telemetry_repo::TelemetryRepo;
