use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// A lookup by something other than the primary key matched no rows.
    #[error("No {entity} records found for {filter}")]
    NoMatches { entity: &'static str, filter: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// A decrement asked for more students than the major's records hold.
    #[error("Insufficient capacity: {remaining} students of major {major} could not be subtracted")]
    InsufficientCapacity { major: String, remaining: i64 },

    #[error("Internal error: {0}")]
    Internal(String),
}
