use crate::error::Result;
use crate::response::ParseResponse;
use crate::AppState;
use axum::extract::State;
use axum::http::Method;
use log::*;

/// POST run the simulated Keno archive parser and return every event in one body
#[utoipa::path(
    post,
    path = "/parse-keno",
    responses(
        (status = 200, description = "Finished run as `data: <json>` frames, 100 progress events then one completion event", content_type = "text/event-stream", body = String),
        (status = 405, description = "Method other than POST or OPTIONS", body = crate::response::ErrorBody),
        (status = 500, description = "Internal Server Error", body = crate::response::ErrorBody)
    )
)]
pub async fn parse(method: Method, State(app_state): State<AppState>) -> Result<ParseResponse> {
    match method {
        Method::OPTIONS => Ok(ParseResponse::Options),
        Method::POST => {
            let parser = app_state.parser().clone();
            debug!(
                "Starting buffered archive run of {} draws",
                parser.total()
            );

            // The run sleeps between steps, keep it off the async workers.
            let body = tokio::task::spawn_blocking(move || parser.run_buffered()).await??;

            Ok(ParseResponse::StreamOk(body))
        }
        other => {
            warn!("Rejecting {other} request to /parse-keno");
            Ok(ParseResponse::MethodNotAllowed)
        }
    }
}
