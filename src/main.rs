//! # Content Server - Entry Point
//! src/main.rs
//!
//! Punto de entrada: parsea la configuración, inicializa el logging y
//! corre el accept loop.

use content_server::config::Config;
use content_server::server::Server;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() {
    // Crear configuración (CLI + variables de entorno)
    let config = Config::new();

    // RUST_LOG tiene prioridad sobre --log-level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Content Server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let server = match Server::bind(config) {
        Ok(server) => server,
        Err(e) => {
            error!("Error fatal: {}", e);
            std::process::exit(1);
        }
    };

    // Bloquea el thread hasta alcanzar el límite de conexiones (si hay)
    match server.run() {
        Ok(accepted) => info!(accepted, "servidor detenido"),
        Err(e) => {
            error!("Error fatal: {}", e);
            std::process::exit(1);
        }
    }
}
