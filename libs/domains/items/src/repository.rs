use async_trait::async_trait;

use crate::error::ItemResult;
use crate::index::IndexSchema;
use crate::models::{StoredItem, StoredSearchHit};

/// Data access for items.
///
/// Implementations deal in [`StoredItem`] (raw embedding bytes); text
/// encoding is the service's concern.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Write every field of the item, replacing any previous value
    async fn save(&self, item: &StoredItem) -> ItemResult<()>;

    async fn find_by_id(&self, id: &str) -> ItemResult<Option<StoredItem>>;

    async fn exists(&self, id: &str) -> ItemResult<bool>;

    /// Number of keys removed (0 or 1)
    async fn delete(&self, id: &str) -> ItemResult<u64>;

    /// Up to `k` nearest items to the query vector, closest first
    async fn knn_search(&self, blob: &[u8], k: usize) -> ItemResult<Vec<StoredSearchHit>>;

    /// Create the search index unless it already exists. Returns true if it was created.
    async fn ensure_index(&self, schema: &IndexSchema) -> ItemResult<bool>;
}
