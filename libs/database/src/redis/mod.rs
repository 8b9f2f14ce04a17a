//! Redis connector and utilities

mod config;
mod connector;
mod health;

pub use config::RedisConfig;
pub use connector::{connect, connect_from_config_with_retry, connect_with_retry};
pub use health::check_health;

// Re-export redis types for convenience
pub use redis::aio::ConnectionManager;
pub use redis::{AsyncCommands, RedisResult};
