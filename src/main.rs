use log::*;
use service::{config::Config, logging::Logger, AppState};

#[tokio::main]
async fn main() {
    let config = Config::new();
    Logger::init_logger(&config);

    info!(
        "Starting Keno archive server [{}] on {}",
        config.runtime_env(),
        config.listen_addr()
    );

    let app_state = AppState::new(config);

    if let Err(e) = web::init_server(app_state).await {
        error!("Server terminated with error: {e}");
        std::process::exit(1);
    }
}
