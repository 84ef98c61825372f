/// Domain-level error taxonomy.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Failure of a [`TelemetryStore`](crate::store::TelemetryStore) backend.
///
/// Backends wrap their native error (sqlx, etc.) in [`Backend`]; callers
/// treat any variant as "the whole ingestion call failed, nothing was
/// committed".
///
/// [`Backend`]: StoreError::Backend
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(#[from] anyhow::Error),
}
