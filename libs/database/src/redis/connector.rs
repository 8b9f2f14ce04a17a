use redis::Client;
use redis::aio::ConnectionManager;
use tracing::info;

use super::RedisConfig;
use crate::common::{RetryConfig, retry, retry_with_backoff};

/// Connect to Redis and return a ConnectionManager
///
/// The manager reconnects on its own after connection failures and is
/// cheap to clone; clones share one multiplexed connection.
///
/// # Example
/// ```ignore
/// use database::redis::connect;
/// use redis::AsyncCommands;
///
/// let mut conn = connect("redis://127.0.0.1:6379").await?;
/// conn.set::<_, _, ()>("key", "value").await?;
/// ```
pub async fn connect(url: &str) -> redis::RedisResult<ConnectionManager> {
    let client = Client::open(url)?;
    let manager = ConnectionManager::new(client).await?;

    // Verify connection with PING
    let mut conn = manager.clone();
    let _: String = redis::cmd("PING").query_async(&mut conn).await?;

    Ok(manager)
}

/// Connect with exponential backoff; `None` uses [`RetryConfig::default`]
pub async fn connect_with_retry(
    url: &str,
    retry_config: Option<RetryConfig>,
) -> redis::RedisResult<ConnectionManager> {
    match retry_config {
        Some(config) => retry_with_backoff(|| connect(url), config).await,
        None => retry(|| connect(url)).await,
    }
}

/// Connect from a [`RedisConfig`] with automatic retry on failure
///
/// # Example
/// ```ignore
/// use database::redis::{RedisConfig, connect_from_config_with_retry};
/// use database::common::RetryConfig;
///
/// let config = RedisConfig::from_env()?;
/// let retry_config = RetryConfig::new().with_max_retries(5);
/// let conn = connect_from_config_with_retry(&config, Some(retry_config)).await?;
/// ```
pub async fn connect_from_config_with_retry(
    config: &RedisConfig,
    retry_config: Option<RetryConfig>,
) -> redis::RedisResult<ConnectionManager> {
    info!("Connecting to Redis at {}", config.redacted_url());
    let manager = connect_with_retry(&config.build_url(), retry_config).await?;
    info!("Successfully connected to Redis");
    Ok(manager)
}
