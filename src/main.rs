#[macro_use]
extern crate log;
extern crate pretty_env_logger;

use actix_web::HttpServer;
use dotenvy::dotenv;
use food_orders::config::AppConfig;
use food_orders::{build_app, AppState};
use std::io;

#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = dotenv() {
        eprintln!("Failed to load .env file: {}", e);
    }

    // Setup logging
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    pretty_env_logger::init();

    let config = AppConfig::from_env().map_err(|e| {
        error!("Invalid configuration: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e.to_string())
    })?;

    info!("Initializing database connection pool...");
    let state = AppState::from_config(&config).map_err(|e| {
        error!("Unable to initialise storage: {}", e);
        io::Error::other(e.to_string())
    })?;

    info!(
        "Order sequencing: {}, management catalog edits: {}",
        state.order_service.sequencing(),
        config.policy.catalog_writes.management_can_edit
    );
    info!("Starting server at http://{}:{}", config.host, config.port);

    let session_cfg = config.session.clone();
    HttpServer::new(move || build_app(state.clone(), session_cfg.clone()))
        .bind((config.host.as_str(), config.port))?
        .run()
        .await
}
