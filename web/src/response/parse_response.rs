use axum::body::Body;
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    ACCESS_CONTROL_MAX_AGE, CACHE_CONTROL, CONNECTION, CONTENT_TYPE,
};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::ErrorBody;

pub(crate) const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method not allowed";

/// Every shape the archive endpoint answers with.
#[derive(Debug, PartialEq)]
pub enum ParseResponse {
    /// CORS pre-flight answer.
    Options,
    /// Any method other than POST or OPTIONS.
    MethodNotAllowed,
    /// A finished run, rendered as one event-stream body.
    StreamOk(String),
}

impl IntoResponse for ParseResponse {
    fn into_response(self) -> Response {
        match self {
            ParseResponse::Options => (
                StatusCode::OK,
                [
                    (ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
                    (ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"),
                    (ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
                    (ACCESS_CONTROL_MAX_AGE, "86400"),
                ],
                Body::empty(),
            )
                .into_response(),
            // Json sets `Content-Type: application/json`
            ParseResponse::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                [(ACCESS_CONTROL_ALLOW_ORIGIN, "*")],
                Json(ErrorBody::new(METHOD_NOT_ALLOWED_MESSAGE)),
            )
                .into_response(),
            ParseResponse::StreamOk(body) => (
                StatusCode::OK,
                [
                    (ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
                    (CONTENT_TYPE, "text/event-stream"),
                    (CACHE_CONTROL, "no-cache"),
                    (CONNECTION, "keep-alive"),
                ],
                body,
            )
                .into_response(),
        }
    }
}
