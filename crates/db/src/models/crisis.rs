use pulsewatch_core::types::{Crisis, Timestamp};
use sqlx::FromRow;
use uuid::Uuid;

/// A row from the `crises` table.
#[derive(Debug, Clone, FromRow)]
pub struct CrisisRow {
    pub id: Uuid,
    pub device_id: String,
    pub start_time: Timestamp,
    pub end_time: Option<Timestamp>,
    pub max_bpm: Option<i32>,
    pub avg_bpm: Option<i32>,
}

impl From<CrisisRow> for Crisis {
    fn from(row: CrisisRow) -> Self {
        Crisis {
            id: row.id,
            device_id: row.device_id,
            start_time: row.start_time,
            end_time: row.end_time,
            max_bpm: row.max_bpm,
            avg_bpm: row.avg_bpm,
        }
    }
}
