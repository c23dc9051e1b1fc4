use models::errors::ModelError;
use service::errors::ServiceError;
use thiserror::Error;
use tonic::Status;
use tracing::error;

/// Wraps a `ServiceError` on its way out through the gRPC boundary.
#[derive(Debug)]
pub struct ApiError(pub ServiceError);

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self { Self(e) }
}

impl From<ApiError> for Status {
    fn from(err: ApiError) -> Self {
        match err.0 {
            ServiceError::Model(ModelError::InvalidId(_)) => Status::invalid_argument("cannot parse id"),
            ServiceError::Validation(msg) => Status::invalid_argument(msg),
            ServiceError::NotFound(_) => Status::not_found("document not found"),
            other => {
                error!(error = %other, "storage failure");
                Status::internal(format!("internal error: {}", other))
            }
        }
    }
}

/// Shorthand for `map_err` at RPC call sites.
pub fn into_status(e: ServiceError) -> Status { ApiError(e).into() }

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("runtime check failed: {0}")]
    Runtime(String),
}
