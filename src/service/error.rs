use axum::http::StatusCode;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    error::HttpError,
    models::requestmodel::RequestStatus,
};

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Service request {0} not found")]
    RequestNotFound(Uuid),

    #[error("Provider profile not found for user {0}")]
    ProviderNotFound(Uuid),

    #[error("Job already taken")]
    JobAlreadyTaken,

    #[error("Invalid status transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: RequestStatus,
        to: RequestStatus,
    },

    #[error("Request can no longer be cancelled")]
    CancellationTooLate,

    #[error("User {0} is not authorized to perform this action on request {1}")]
    UnauthorizedRequestAccess(Uuid, Uuid),

    #[error("Provider is not verified")]
    ProviderNotVerified,

    #[error("Provider is not available")]
    ProviderUnavailable,

    #[error("Provider is blocked")]
    ProviderBlocked,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::RequestNotFound(_) | ServiceError::ProviderNotFound(_) => {
                StatusCode::NOT_FOUND
            }

            ServiceError::JobAlreadyTaken | ServiceError::CancellationTooLate => {
                StatusCode::CONFLICT
            }

            ServiceError::InvalidTransition { .. } | ServiceError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }

            ServiceError::UnauthorizedRequestAccess(_, _) => StatusCode::FORBIDDEN,

            ServiceError::ProviderNotVerified
            | ServiceError::ProviderUnavailable
            | ServiceError::ProviderBlocked => StatusCode::FORBIDDEN,

            ServiceError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for HttpError {
    fn from(error: ServiceError) -> Self {
        let status = error.status_code();
        HttpError::new(error.to_string(), status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_errors_map_to_409() {
        assert_eq!(
            ServiceError::JobAlreadyTaken.status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ServiceError::CancellationTooLate.status_code(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_invalid_transition_is_bad_request() {
        let err = ServiceError::InvalidTransition {
            from: RequestStatus::Accepted,
            to: RequestStatus::Completed,
        };
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        let http: HttpError = err.into();
        assert_eq!(http.status, StatusCode::BAD_REQUEST);
    }
}
