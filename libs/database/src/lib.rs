//! Database connectors and connection utilities
//!
//! # Features
//!
//! - `redis` (default) - Redis connection management and health checks
//! - `config` - `core_config::FromEnv` support for connection settings
//!
//! # Example
//!
//! ```ignore
//! use database::redis::{self, RedisConfig};
//! use redis::AsyncCommands;
//!
//! let config = RedisConfig::new("redis://127.0.0.1:6379");
//! let mut conn = redis::connect_from_config_with_retry(&config, None).await?;
//! conn.set::<_, _, ()>("key", "value").await?;
//! ```

pub mod common;

#[cfg(feature = "redis")]
pub mod redis;

pub use common::{DatabaseError, DatabaseResult};
