//! Server shared state
//!
//! Holds configuration and shared resources for the HTTP server.

use crate::cluster::ClusterEngine;
use crate::config::Config;
use crate::error::Result;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;

/// Shared state for the HTTP server
pub struct AppState {
    /// Configuration
    pub config: Arc<RwLock<Config>>,

    started: Instant,
}

impl AppState {
    /// Create new application state
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            started: Instant::now(),
        }
    }

    /// Cluster engine built from the current `[cluster]` settings
    pub async fn engine(&self) -> Result<ClusterEngine> {
        let params = self.config.read().await.cluster_params();
        ClusterEngine::new(params)
    }

    /// Configured demo post spacing
    pub async fn demo_spacing(&self) -> f64 {
        self.config.read().await.demo.spacing
    }

    /// Seconds since the state was created
    pub fn uptime_secs(&self) -> u64 {
        self.started.elapsed().as_secs()
    }
}
