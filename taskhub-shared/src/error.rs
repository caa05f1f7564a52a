//! Data-layer error types
//!
//! Lookups that find nothing are not errors: they come back as `None` or
//! `false`. The only failure this layer detects on its own is a reference to
//! a user or category that does not exist; everything else is the store's
//! own error passed through unchanged.

use crate::models::EntityKind;

/// Result type for data-access operations that perform referential checks
pub type DataResult<T> = Result<T, DataError>;

/// Errors returned by the data-access layer
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// A referenced row (task owner or category) does not exist
    ///
    /// Raised before any write, so nothing has been committed.
    #[error("{entity} with ID {id} not found")]
    ReferencedEntityNotFound { entity: EntityKind, id: i64 },

    /// Store failure, including uniqueness and foreign-key violations
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl DataError {
    /// Returns true if the store rejected the write on a UNIQUE constraint
    pub fn is_unique_violation(&self) -> bool {
        match self {
            DataError::Database(sqlx::Error::Database(db_err)) => db_err.is_unique_violation(),
            _ => false,
        }
    }

    /// Returns the entity kind and id of a failed reference, if that is what this is
    pub fn missing_reference(&self) -> Option<(EntityKind, i64)> {
        match self {
            DataError::ReferencedEntityNotFound { entity, id } => Some((*entity, *id)),
            DataError::Database(_) => None,
        }
    }
}
