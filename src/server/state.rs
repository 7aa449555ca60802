//! Server shared state
//!
//! Holds configuration and the atlas session for the HTTP server.

use crate::climate::open_meteo::OpenMeteoClient;
use crate::config::Config;
use crate::inat::client::InatClient;
use crate::session::AtlasSession;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared state for the HTTP server
pub struct AppState {
    /// Configuration
    pub config: Arc<RwLock<Config>>,

    /// Atlas session over the real upstream clients
    pub session: AtlasSession<InatClient, OpenMeteoClient>,
}

impl AppState {
    /// Create new application state
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            session: AtlasSession::new(InatClient::new(), OpenMeteoClient::new()),
        }
    }

    /// The configured default grid size in kilometers
    pub async fn default_grid_km(&self) -> f64 {
        self.config.read().await.defaults.grid_km
    }
}
