use axum::http::HeaderValue;
use axum::http::header::InvalidHeaderValue;
use core_config::cors::CorsConfig;
use std::time::Duration;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

/// Creates the CORS layer for the configured origins.
///
/// - Only the listed origins are allowed
/// - Credentials allowed
/// - Any method and any request header, mirrored back from the preflight
///   (wildcards are not allowed together with credentials)
/// - 1 hour max age
pub fn create_cors_layer(config: &CorsConfig) -> Result<CorsLayer, InvalidHeaderValue> {
    let origins = config
        .allowed_origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600)))
}
