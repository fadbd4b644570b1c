//! Request error types
//!
//! Every failure a handler can produce maps to one status code and one
//! client-facing message. Internal detail (decoder output, auth reason)
//! stays in the error log.

use hyper::StatusCode;
use thiserror::Error;

use crate::auth::AuthError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid employee payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
    #[error("employee payload is empty")]
    MissingPayload,
    #[error("employee id must be positive, got {0}")]
    NonPositiveId(i32),
    #[error("invalid employee id: {0:?}")]
    InvalidId(Option<String>),
    #[error("employee {0} not found")]
    NotFound(i32),
    #[error("unauthorized: {0}")]
    Unauthorized(#[from] AuthError),
    #[error("failed to read request body: {0}")]
    BodyRead(String),
    #[error("request body exceeds {0} bytes")]
    PayloadTooLarge(u64),
}

impl ApiError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidPayload(_)
            | Self::MissingPayload
            | Self::NonPositiveId(_)
            | Self::InvalidId(_)
            | Self::BodyRead(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }

    /// Message written to the response body
    pub const fn public_message(&self) -> &'static str {
        match self {
            Self::InvalidPayload(_) | Self::MissingPayload | Self::BodyRead(_) => {
                "Invalid employee payload."
            }
            Self::NonPositiveId(_) => "Employee id must be a positive integer.",
            Self::InvalidId(_) => "Invalid employee id.",
            Self::NotFound(_) => "Employee not found.",
            Self::Unauthorized(_) => "You are not authorized to delete.",
            Self::PayloadTooLarge(_) => "413 Payload Too Large",
        }
    }
}
