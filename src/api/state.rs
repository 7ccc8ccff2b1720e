//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use crate::collab::{IdentityProvider, MealEstimator, ProfileDirectory};
use crate::journal::Journal;
use crate::notify::ReminderScheduler;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state for all handlers
pub struct AppState {
    /// The journal engine behind every read and write
    pub journal: Arc<Journal>,
    /// Owned reminder scheduler, reconfigured on settings changes
    pub scheduler: Arc<ReminderScheduler>,
    /// Calorie estimation collaborator (optional)
    pub estimator: Option<Arc<dyn MealEstimator>>,
    /// Identity collaborator supplying the nullable current user (optional)
    pub identity: Option<Arc<dyn IdentityProvider>>,
    /// Remote profile directory collaborator (optional)
    pub directory: Option<Arc<dyn ProfileDirectory>>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Create a new AppState without external collaborators
    pub fn new(journal: Arc<Journal>, scheduler: Arc<ReminderScheduler>, config: ApiConfig) -> Self {
        Self {
            journal,
            scheduler,
            estimator: None,
            identity: None,
            directory: None,
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Builder: attach the estimation collaborator
    pub fn with_estimator(mut self, estimator: Arc<dyn MealEstimator>) -> Self {
        self.estimator = Some(estimator);
        self
    }

    /// Builder: attach the identity collaborator
    pub fn with_identity(mut self, identity: Arc<dyn IdentityProvider>) -> Self {
        self.identity = Some(identity);
        self
    }

    /// Builder: attach the profile directory collaborator
    pub fn with_directory(mut self, directory: Arc<dyn ProfileDirectory>) -> Self {
        self.directory = Some(directory);
        self
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Allowed CORS origins (empty means permissive)
    pub cors_origins: Vec<String>,
    /// Enable the export endpoint
    pub enable_export: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8083,
            cors_origins: Vec::new(),
            enable_export: true,
        }
    }
}

impl ApiConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
