use std::error::Error as StdError;

use axum::http::header::ACCESS_CONTROL_ALLOW_ORIGIN;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use domain::error::{DomainErrorKind, Error as DomainError, InternalErrorKind};
use log::*;
use tokio::task::JoinError;

use crate::response::ErrorBody;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug)]
pub struct Error(DomainError);

impl StdError for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> core::result::Result<(), std::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

// List of possible StatusCode variants https://docs.rs/http/latest/http/status/struct.StatusCode.html
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        error!("Request failed: {}", self.0);

        let (status, message) = match self.0.error_kind {
            DomainErrorKind::Internal(internal_error_kind) => match internal_error_kind {
                InternalErrorKind::Serialization => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to encode archive event",
                ),
                InternalErrorKind::Other(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
                }
            },
            DomainErrorKind::External(_) => (StatusCode::BAD_GATEWAY, "Bad gateway"),
        };

        (
            status,
            [(ACCESS_CONTROL_ALLOW_ORIGIN, "*")],
            Json(ErrorBody::new(message)),
        )
            .into_response()
    }
}

impl From<DomainError> for Error {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

// A blocking archive run that panicked or was aborted.
impl From<JoinError> for Error {
    fn from(err: JoinError) -> Self {
        Self(DomainError::internal(InternalErrorKind::Other(
            "archive run task failed".to_string(),
        )))
        .with_source(err)
    }
}

impl Error {
    fn with_source(self, source: impl StdError + Send + Sync + 'static) -> Self {
        Self(self.0.with_source(source))
    }
}
