//! Server core
//!
//! Binds the listener, prepares the root directory, and serves the API.

use log::{error, info, warn};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

use crate::auth::{CredentialStore, SessionRegistry};
use crate::config::ServerConfig;
use crate::http;

/// Shared state handed to every request handler.
///
/// Everything here is either immutable after startup (config, root,
/// credentials) or guarded (sessions); requests share nothing else.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub root: Arc<PathBuf>,
    pub credentials: Arc<CredentialStore>,
    pub sessions: Arc<Mutex<SessionRegistry>>,
}

pub struct Server {
    listener: TcpListener,
    state: AppState,
}

impl Server {
    pub async fn new(config: ServerConfig) -> Self {
        let socket = config.socket_addr();

        let listener = match TcpListener::bind(&socket).await {
            Ok(listener) => {
                info!("Server bound to {}", socket);
                listener
            }
            Err(e) => {
                error!("Failed to bind to {}: {}", socket, e);
                panic!("Server startup failed on socket {}: {}", socket, e);
            }
        };

        if let Err(e) = tokio::fs::create_dir_all(config.root_path()).await {
            warn!("Failed to create root files directory: {}", e);
        }

        // Canonicalize once; the containment check compares against this
        // exact path for the lifetime of the server.
        let root = match config.root_path().canonicalize() {
            Ok(root) => root,
            Err(e) => {
                error!(
                    "Root files directory {} is not usable: {}",
                    config.root_path().display(),
                    e
                );
                panic!("Server startup failed: invalid root files directory");
            }
        };
        info!("Serving files from {}", root.display());

        let state = AppState {
            credentials: Arc::new(CredentialStore::from_users(&config.users)),
            sessions: Arc::new(Mutex::new(SessionRegistry::new())),
            root: Arc::new(root),
            config: Arc::new(config),
        };

        Self { listener, state }
    }

    pub async fn start(self) {
        match self.listener.local_addr() {
            Ok(addr) => info!(
                "Starting FileGate server on {} ({} users configured)",
                addr,
                self.state.credentials.len()
            ),
            Err(e) => warn!("Could not read local address: {}", e),
        }

        let app = http::router(self.state);

        if let Err(e) = axum::serve(self.listener, app).await {
            error!("Server error: {}", e);
        }
    }
}
