use crate::response::ParseResponse;
use crate::AppState;
use async_stream::stream;
use axum::extract::State;
use axum::http::header::ACCESS_CONTROL_ALLOW_ORIGIN;
use axum::http::Method;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use log::*;
use std::convert::Infallible;

/// POST run the simulated Keno archive parser and stream each event as it is produced
#[utoipa::path(
    post,
    path = "/parse-keno/stream",
    responses(
        (status = 200, description = "Server-Sent Events, one `data:` frame per step then the completion frame", content_type = "text/event-stream", body = String),
        (status = 405, description = "Method other than POST or OPTIONS", body = crate::response::ErrorBody)
    )
)]
pub(crate) async fn stream_handler(method: Method, State(app_state): State<AppState>) -> Response {
    match method {
        Method::POST => {}
        Method::OPTIONS => return ParseResponse::Options.into_response(),
        other => {
            warn!("Rejecting {other} request to /parse-keno/stream");
            return ParseResponse::MethodNotAllowed.into_response();
        }
    }

    let (run_id, mut rx, handle) = ::sse::spawn_archive_run(app_state.parser().clone());
    debug!("Streaming archive run {}", run_id.as_str());
    ::sse::watch_run(run_id.clone(), handle);

    // Events arrive from the producer's channel. Once this stream is dropped
    // (client gone) the receiver goes with it and the producer stops.
    let stream = stream! {
        while let Some(event) = rx.recv().await {
            match ::sse::message::to_sse_event(&event) {
                Ok(sse_event) => yield Ok::<Event, Infallible>(sse_event),
                Err(e) => {
                    error!("Dropping archive run {}: {e}", run_id.as_str());
                    break;
                }
            }
        }

        debug!("Archive stream {} closed", run_id.as_str());
    };

    (
        [(ACCESS_CONTROL_ALLOW_ORIGIN, "*")],
        Sse::new(stream).keep_alive(KeepAlive::default()),
    )
        .into_response()
}
