//! Error types for FUNNEL operations
//!
//! Two layers, two policies: `StoreError` covers backend faults that the
//! adapter's read path absorbs (logged, defaults returned); `CrmError` covers
//! domain failures that must reach the caller loudly.

use crate::{EntityId, EntityKind};
use thiserror::Error;

/// Storage layer errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Read failed for key {key}: {reason}")]
    ReadFailed { key: String, reason: String },

    #[error("Write failed for key {key}: {reason}")]
    WriteFailed { key: String, reason: String },

    #[error("Malformed data under key {key}: {reason}")]
    Corrupt { key: String, reason: String },

    #[error("Storage lock poisoned")]
    LockPoisoned,
}

/// Master error type for all FUNNEL domain operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CrmError {
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: EntityKind, id: EntityId },

    #[error("Stage {stage_id} still has {deal_count} deal(s) and no later stage in its pipeline to take them")]
    StageHasDeals { stage_id: EntityId, deal_count: usize },

    #[error("Invalid backup payload: {reason}")]
    InvalidBackup { reason: String },

    #[error("Invalid value for {field}: {reason}")]
    Validation { field: String, reason: String },
}

/// Result type alias for FUNNEL operations.
pub type CrmResult<T> = Result<T, CrmError>;

impl CrmError {
    /// Shorthand for the not-found case, used by every "expected to exist"
    /// operation (toggle, send, convert, close).
    pub fn not_found(entity: EntityKind, id: EntityId) -> Self {
        CrmError::NotFound { entity, id }
    }

    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CrmError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
