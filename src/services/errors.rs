use crate::db::RepositoryError;
use crate::services::lifecycle::LifecycleError;
use crate::services::pricing::PricingError;
use log::error;
use thiserror::Error;
use uuid::Uuid;

/// What callers of the core see. Each variant maps to one HTTP status.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{field}: {message}")]
    Validation { field: String, message: String },
    #[error("not permitted")]
    Forbidden,
    #[error("{0} not found")]
    NotFound(String),
    #[error("order {0} was changed by another request, reload and retry")]
    Conflict(Uuid),
    #[error("service dependency failed")]
    Dependency(String),
}

impl ServiceError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ServiceError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound(what) => ServiceError::NotFound(what),
            RepositoryError::VersionConflict(order_id) => ServiceError::Conflict(order_id),
            other => {
                error!("repository failure: {}", other);
                ServiceError::Dependency(other.to_string())
            }
        }
    }
}

impl From<LifecycleError> for ServiceError {
    fn from(e: LifecycleError) -> Self {
        match e {
            LifecycleError::RoleNotPermitted { .. } => ServiceError::Forbidden,
            LifecycleError::MissingReason => ServiceError::validation("reason", e.to_string()),
            LifecycleError::MissingCollector => {
                ServiceError::validation("collected_by_user_id", e.to_string())
            }
            LifecycleError::AlreadyFinal(_) | LifecycleError::OutOfSequence { .. } => {
                ServiceError::validation("status", e.to_string())
            }
            LifecycleError::UnknownOrderItem(_)
            | LifecycleError::DuplicateReceivedItem(_)
            | LifecycleError::ReceivedOutOfRange { .. } => {
                ServiceError::validation("received_items", e.to_string())
            }
            LifecycleError::Pricing(p) => p.into(),
        }
    }
}

impl From<PricingError> for ServiceError {
    fn from(e: PricingError) -> Self {
        let field = match e {
            PricingError::NegativeQuantity { .. } => "quantity",
            PricingError::NegativePrice { .. } => "price",
            PricingError::Overflow { .. } => "total",
        };
        ServiceError::validation(field, e.to_string())
    }
}
