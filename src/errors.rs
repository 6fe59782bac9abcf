use sea_orm::error::DbErr;
use thiserror::Error;
use uuid::Uuid;

/// Top-level error for service operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DbErr),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    #[error("Event error: {0}")]
    EventError(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Concurrent modification: {0}")]
    ConcurrentModification(Uuid),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Insufficient stock: {0}")]
    InsufficientStock(String),
}

impl ServiceError {
    /// Convenience constructor for missing-record errors keyed by entity
    /// name and id.
    pub fn not_found(entity: &str, id: Uuid) -> Self {
        ServiceError::NotFound(format!("{} {} not found", entity, id))
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ServiceError::ValidationError(errors.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity_and_id() {
        let id = Uuid::new_v4();
        let err = ServiceError::not_found("Estimate", id);
        let msg = err.to_string();
        assert!(msg.contains("Estimate"));
        assert!(msg.contains(&id.to_string()));
    }

    #[test]
    fn db_error_converts() {
        let err: ServiceError = DbErr::RecordNotFound("lead".into()).into();
        assert!(matches!(err, ServiceError::DatabaseError(_)));
    }
}
