//! mcplink server binary
//!
//! Loads settings once, builds the model backend and SSE connector, and
//! serves the bridge endpoint. The settings path comes from
//! `MCPLINK_CONFIG` (default `config.yaml`).

use std::sync::Arc;

use mcplink_core::backend::GenaiBackend;
use mcplink_core::lifecycle::RequestController;
use mcplink_core::logging::{ConsoleLogger, Logger};
use mcplink_core::session::SseConnector;
use mcplink_core::settings::Settings;

mod routes;

use routes::{router, AppState};

#[tokio::main]
async fn main() {
    let logger: Arc<dyn Logger> = Arc::new(ConsoleLogger::new());

    let config_path =
        std::env::var("MCPLINK_CONFIG").unwrap_or_else(|_| "config.yaml".to_string());
    let settings = Settings::from_yaml_file(&config_path).expect("failed to load settings");
    logger.info(&format!(
        "Loaded settings from {} (model: {})",
        config_path, settings.backend.model
    ));

    let controller = Arc::new(RequestController::new(
        Arc::new(GenaiBackend::new(
            settings.backend.clone(),
            Arc::clone(&logger),
        )),
        Arc::new(SseConnector::new(Arc::clone(&logger))),
        settings.request.clone(),
        Arc::clone(&logger),
    ));

    let app = router(AppState { controller });

    let listener = tokio::net::TcpListener::bind(&settings.server.listen_addr)
        .await
        .expect("failed to bind to address");

    logger.info(&format!(
        "listening on http://{}",
        settings.server.listen_addr
    ));

    axum::serve(listener, app.into_make_service())
        .await
        .expect("server error");
}
