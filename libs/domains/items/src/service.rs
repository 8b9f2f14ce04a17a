//! Item Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::codec::{decode_embedding, encode_embedding};
use crate::error::{ItemError, ItemResult};
use crate::index::IndexSchema;
use crate::models::{
    CreateItem, Item, ItemId, ItemWithScore, SearchItems, StoredItem, UpdateItem,
};
use crate::repository::ItemRepository;
use crate::search::KNN_LIMIT;

/// Item operations over a repository.
///
/// Mints ids, validates input, and converts embeddings between base64 text
/// and the raw bytes the repository stores.
pub struct ItemService<R: ItemRepository> {
    repository: Arc<R>,
}

impl<R: ItemRepository> ItemService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Store a new item under a freshly minted id
    #[instrument(skip(self, input), fields(title = %input.title))]
    pub async fn add(&self, input: CreateItem) -> ItemResult<Item> {
        self.save(Uuid::now_v7().to_string(), input).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> ItemResult<Option<Item>> {
        let stored = self.repository.find_by_id(id).await?;
        Ok(stored.map(to_item))
    }

    /// Replace every field of an existing item. `None` if the id is unknown.
    ///
    /// Existence check and write are separate commands; a concurrent delete
    /// in between recreates the item (last writer wins).
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: &str, input: UpdateItem) -> ItemResult<Option<Item>> {
        if !self.item_exists(id).await? {
            return Ok(None);
        }

        self.save(id.to_string(), input.into()).await.map(Some)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> ItemResult<Option<ItemId>> {
        let removed = self.repository.delete(id).await?;
        Ok((removed > 0).then(|| ItemId { id: id.to_string() }))
    }

    /// Nearest items to the query vector, closest first, at most five
    #[instrument(skip(self, input))]
    pub async fn search(&self, input: SearchItems) -> ItemResult<Vec<ItemWithScore>> {
        validate(&input)?;
        let blob = decode_embedding(&input.embedding)?;

        let mut results: Vec<ItemWithScore> = self
            .repository
            .knn_search(&blob, KNN_LIMIT)
            .await?
            .into_iter()
            .map(|hit| ItemWithScore::new(to_item(hit.item), hit.score))
            .collect();

        results.sort_by(|a, b| a.score.total_cmp(&b.score));
        results.truncate(KNN_LIMIT);

        tracing::debug!(hits = results.len(), "Search completed");
        Ok(results)
    }

    #[instrument(skip(self))]
    pub async fn item_exists(&self, id: &str) -> ItemResult<bool> {
        self.repository.exists(id).await
    }

    /// Create the vector index if it is missing. Returns true if it was created.
    #[instrument(skip(self))]
    pub async fn ensure_index(&self, schema: &IndexSchema) -> ItemResult<bool> {
        self.repository.ensure_index(schema).await
    }

    async fn save(&self, id: String, input: CreateItem) -> ItemResult<Item> {
        validate(&input)?;
        let embedding = decode_embedding(&input.embedding)?;

        let stored = StoredItem {
            id,
            title: input.title,
            author: input.author,
            image_url: input.image_url,
            embedding,
        };
        self.repository.save(&stored).await?;

        Ok(to_item(stored))
    }
}

impl<R: ItemRepository> Clone for ItemService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

fn validate(input: &impl Validate) -> ItemResult<()> {
    input
        .validate()
        .map_err(|e| ItemError::Validation(e.to_string()))
}

fn to_item(stored: StoredItem) -> Item {
    Item {
        id: stored.id,
        title: stored.title,
        author: stored.author,
        image_url: stored.image_url,
        embedding: encode_embedding(&stored.embedding),
    }
}
