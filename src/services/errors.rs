use pushkind_common::repository::errors::RepositoryError;
use thiserror::Error;

use crate::forms::products::ProductFormError;

/// Result type returned by service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failures surfaced by the service layer and mapped to HTTP responses by the routes.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// No authenticated user is attached to the request.
    #[error("unauthorized")]
    Unauthorized,
    /// The payload failed schema validation; the message is shown to the client.
    #[error("{0}")]
    Validation(String),
    /// The request body could not be parsed at all.
    #[error("malformed request: {0}")]
    Malformed(String),
    /// Storage failure.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<ProductFormError> for ServiceError {
    fn from(err: ProductFormError) -> Self {
        match err {
            ProductFormError::Malformed(_) => ServiceError::Malformed(err.to_string()),
            _ => ServiceError::Validation(err.to_string()),
        }
    }
}
