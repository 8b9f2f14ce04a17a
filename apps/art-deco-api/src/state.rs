//! Shared application state passed to route builders.

use database::redis::ConnectionManager;

/// Cheap to clone: the connection manager shares one multiplexed connection.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// Auto-reconnecting Redis connection
    pub redis: ConnectionManager,
}
