use crate::controller::{health_check_controller, parse_controller};
use crate::sse::handler as sse_handler;
use crate::{response, AppState};
use axum::{
    routing::{any, get},
    Router,
};

use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

// This is the global definition of our OpenAPI spec. To be a part
// of the rendered spec, a path and schema must be listed here.
#[derive(OpenApi)]
#[openapi(
        info(
            title = "Keno Archive API"
        ),
        paths(
            health_check_controller::health_check,
            parse_controller::parse,
            sse_handler::stream_handler,
        ),
        components(
            schemas(
                domain::DrawRecord,
                domain::ProgressEvent,
                domain::CompletionEvent,
                response::ErrorBody,
            )
        ),
        tags(
            (name = "keno_archive", description = "Simulated Keno draw archive parser")
        )
    )]
struct ApiDoc;

pub fn define_routes(app_state: AppState) -> Router {
    Router::new()
        .merge(parse_routes(app_state))
        .merge(health_routes())
        .merge(RapiDoc::with_openapi("/api-docs/openapi.json", ApiDoc::openapi()).path("/rapidoc"))
}

// Method dispatch happens in the handlers so every method gets the CORS-aware answer.
fn parse_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/parse-keno", any(parse_controller::parse))
        .route("/parse-keno/stream", any(sse_handler::stream_handler))
        .with_state(app_state)
}

fn health_routes() -> Router {
    Router::new().route("/health", get(health_check_controller::health_check))
}
