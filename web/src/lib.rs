use log::*;
use tokio::net::TcpListener;

pub use service::AppState;

mod controller;
mod error;
pub mod response;
mod router;
mod sse;

pub use router::define_routes;

/// Binds the configured address and serves the router until the process exits.
pub async fn init_server(app_state: AppState) -> std::io::Result<()> {
    let listen_addr = app_state.config.listen_addr();
    let router = define_routes(app_state);

    let listener = TcpListener::bind(&listen_addr).await?;
    info!("Server starting... listening for connections on http://{listen_addr}");

    axum::serve(listener, router).await
}
