//! Row models for the Pulsewatch tables.

pub mod crisis;
pub mod device;

pub use crisis::CrisisRow;
pub use device::DeviceRow;
