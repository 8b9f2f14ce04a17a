use core_config::{
    AppInfo, ConfigError, FromEnv, app_info, cors::CorsConfig, env_parse_optional,
    server::ServerConfig,
};
use database::redis::RedisConfig;
use domain_items::{DistanceMetric, IndexAlgorithm, IndexSchema};

pub use core_config::Environment;

/// Application-specific configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub redis: RedisConfig,
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub environment: Environment,
    /// Vector index to create at startup, if `ITEM_INDEX_DIM` is set
    pub index: Option<IndexSchema>,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        Ok(Self {
            app: app_info!(),
            redis: RedisConfig::from_env()?,
            server: ServerConfig::from_env()?,
            cors: CorsConfig::from_env()?,
            environment: Environment::from_env(),
            index: index_schema_from_env()?,
        })
    }
}

/// `ITEM_INDEX_DIM` enables the bootstrap; `ITEM_INDEX_ALGORITHM` (FLAT/HNSW)
/// and `ITEM_INDEX_DISTANCE_METRIC` (COSINE/L2/IP) refine it.
fn index_schema_from_env() -> Result<Option<IndexSchema>, ConfigError> {
    let Some(dim) = env_parse_optional::<usize>("ITEM_INDEX_DIM")? else {
        return Ok(None);
    };
    if dim == 0 {
        return Err(ConfigError::ParseError {
            key: "ITEM_INDEX_DIM".to_string(),
            details: "dimension must be positive".to_string(),
        });
    }

    let algorithm = env_parse_optional::<IndexAlgorithm>("ITEM_INDEX_ALGORITHM")?;
    let distance_metric = env_parse_optional::<DistanceMetric>("ITEM_INDEX_DISTANCE_METRIC")?;

    Ok(Some(
        IndexSchema::new(dim)
            .with_algorithm(algorithm.unwrap_or_default())
            .with_distance_metric(distance_metric.unwrap_or_default()),
    ))
}
