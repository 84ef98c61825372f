//! Pulsewatch API server library.
//!
//! Exposes the building blocks (config, state, error handling, ingestion
//! pipeline, routes, WebSocket infrastructure) so integration tests and
//! the binary entrypoint can both access them.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod handlers;
pub mod ingest;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
pub mod ws;
