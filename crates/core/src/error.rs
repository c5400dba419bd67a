//! Domain error taxonomy shared by all crates.

/// Errors produced by domain operations.
///
/// `Validation` failures abort the operation with no partial mutation.
/// Lookup misses inside the substitution engine are *not* errors -- they
/// degrade to empty output -- so `NotFound` here always refers to an entity
/// addressed by id (a template, a library item, a field index).
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
