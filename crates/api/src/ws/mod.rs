//! WebSocket infrastructure for live dashboard delivery.
//!
//! Provides connection management, heartbeat monitoring, and the HTTP
//! upgrade handler used by the Axum routes.

mod handler;
mod heartbeat;
pub mod manager;

pub use handler::dashboard_ws_handler;
pub use heartbeat::start_heartbeat;
pub use manager::WsManager;
