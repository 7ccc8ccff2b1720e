//! Journal error types

use crate::model::ValidationError;
use crate::store::StoreError;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur when mutating or reading the journal
#[derive(Debug, Error)]
pub enum JournalError {
    /// A field edit or new record failed validation; nothing was committed
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The calorie log is at capacity; the caller should delete old entries
    #[error("the calorie log is full ({max} entries); delete old entries to make room")]
    LogFull { max: usize },

    /// A water day-bucket is at capacity
    #[error("the water log for {day} is full ({max} entries); delete old entries to make room")]
    DayFull { day: String, max: usize },

    /// No calorie log entry with this id
    #[error("no log entry with id {0}")]
    EntryNotFound(Uuid),

    /// No water entry with this id on this day
    #[error("no water entry with id {id} on {day}")]
    WaterEntryNotFound { day: String, id: Uuid },

    /// The underlying store rejected the write; prior state is retained
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type alias for journal operations
pub type JournalResult<T> = Result<T, JournalError>;
