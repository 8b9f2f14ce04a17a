//! Redis implementation of ItemRepository

use async_trait::async_trait;
use database::redis::ConnectionManager;
use redis::Value;
use std::collections::HashMap;
use tracing::{info, instrument};

use crate::error::ItemResult;
use crate::index::{self, IndexSchema};
use crate::models::{StoredItem, StoredSearchHit, item_key};
use crate::repository::ItemRepository;
use crate::search;

/// Items as hashes at `item:<id>`, searched through `item:index`
#[derive(Clone)]
pub struct RedisItemRepository {
    conn: ConnectionManager,
}

impl RedisItemRepository {
    /// ```ignore
    /// let conn = database::redis::connect("redis://localhost:6379").await?;
    /// let repo = RedisItemRepository::new(conn);
    /// ```
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl ItemRepository for RedisItemRepository {
    #[instrument(skip(self, item), fields(item_id = %item.id))]
    async fn save(&self, item: &StoredItem) -> ItemResult<()> {
        let mut conn = self.conn.clone();

        redis::cmd("HSET")
            .arg(item.key())
            .arg("id")
            .arg(&item.id)
            .arg("title")
            .arg(&item.title)
            .arg("author")
            .arg(&item.author)
            .arg("image_url")
            .arg(&item.image_url)
            .arg("embedding")
            .arg(&item.embedding[..])
            .query_async::<()>(&mut conn)
            .await?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &str) -> ItemResult<Option<StoredItem>> {
        let mut conn = self.conn.clone();

        let fields: HashMap<String, Vec<u8>> = redis::cmd("HGETALL")
            .arg(item_key(id))
            .query_async(&mut conn)
            .await?;

        StoredItem::from_fields(fields)
    }

    #[instrument(skip(self))]
    async fn exists(&self, id: &str) -> ItemResult<bool> {
        let mut conn = self.conn.clone();

        let count: u64 = redis::cmd("EXISTS")
            .arg(item_key(id))
            .query_async(&mut conn)
            .await?;

        Ok(count > 0)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> ItemResult<u64> {
        let mut conn = self.conn.clone();

        let removed: u64 = redis::cmd("UNLINK")
            .arg(item_key(id))
            .query_async(&mut conn)
            .await?;

        Ok(removed)
    }

    #[instrument(skip(self, blob), fields(blob_len = blob.len()))]
    async fn knn_search(&self, blob: &[u8], k: usize) -> ItemResult<Vec<StoredSearchHit>> {
        let mut conn = self.conn.clone();

        let reply: Value = search::knn_command(blob, k)
            .query_async(&mut conn)
            .await?;

        search::parse_search_reply(reply)
    }

    #[instrument(skip(self))]
    async fn ensure_index(&self, schema: &IndexSchema) -> ItemResult<bool> {
        let mut conn = self.conn.clone();

        match index::info_command().query_async::<Value>(&mut conn).await {
            Ok(_) => {
                info!(index = index::ITEM_INDEX, "Search index already exists");
                Ok(false)
            }
            Err(e) if index::is_unknown_index(&e) => {
                schema.create_command().query_async::<()>(&mut conn).await?;
                info!(
                    index = index::ITEM_INDEX,
                    dim = schema.dim,
                    algorithm = %schema.algorithm,
                    distance_metric = %schema.distance_metric,
                    "Created search index"
                );
                Ok(true)
            }
            Err(e) => Err(e.into()),
        }
    }
}
