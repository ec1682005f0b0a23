//! # Tiny HTTP Server - Entry Point
//! src/main.rs
//!
//! Lee la configuración, carga la página de inicio y atiende conexiones
//! una a la vez hasta que el proceso termine.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tiny_http_server::assets::Assets;
use tiny_http_server::config::Config;
use tiny_http_server::error::Result;
use tiny_http_server::router::Router;
use tiny_http_server::server::{RequestHandler, Server};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tiny_http_server=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run(Config::new()) {
        tracing::error!(error = %e, "fatal");
        std::process::exit(1);
    }
}

fn run(config: Config) -> Result<()> {
    config.validate()?;

    tracing::info!(
        address = %config.address(),
        index = %config.index_path,
        read_timeout_secs = config.read_timeout_secs,
        max_header_bytes = config.max_header_bytes,
        "configuration loaded"
    );

    let assets = Assets::load(&config.index_path)?;
    let handler = RequestHandler::new(Router::new(assets))
        .with_limits(config.max_header_bytes, config.read_chunk_bytes);

    let server = Server::bind(&config, handler)?;
    server.run()
}
