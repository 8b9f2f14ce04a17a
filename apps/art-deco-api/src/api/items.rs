//! Wires the items domain to Redis.

use axum::Router;
use domain_items::{IndexSchema, ItemRepository, ItemService, RedisItemRepository, handlers};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let repository = RedisItemRepository::new(state.redis.clone());
    let service = ItemService::new(repository);

    handlers::router(service)
}

/// Create `item:index` if it does not exist yet
pub async fn ensure_index(state: &AppState, schema: &IndexSchema) -> eyre::Result<()> {
    let repository = RedisItemRepository::new(state.redis.clone());
    repository.ensure_index(schema).await?;
    Ok(())
}
