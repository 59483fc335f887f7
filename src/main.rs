//! FileGate Server - Entry Point
//!
//! An authenticated HTTP file browser backend: session-gated directory
//! listings and file downloads, all scoped beneath a fixed root directory.

use log::{error, info};

use filegate_server::Server;
use filegate_server::config::ServerConfig;

#[tokio::main]
async fn main() {
    // Initialize the logger (env_logger picks up RUST_LOG environment variable)
    env_logger::init();

    info!("Launching FileGate server...");

    let config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    let server = Server::new(config).await;
    server.start().await;
}
