//! Items Domain
//!
//! Items (title, author, image URL, embedding) stored as Redis hashes, with
//! nearest-neighbour search through the Redis query engine.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Ids, validation, base64 embedding codec
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + Redis implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_items::{handlers, RedisItemRepository, ItemService};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let conn = database::redis::connect("redis://localhost:6379").await?;
//!
//! let repository = RedisItemRepository::new(conn);
//! let service = ItemService::new(repository);
//!
//! let router = axum::Router::new().nest("/items", handlers::router(service));
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod error;
pub mod handlers;
pub mod index;
pub mod models;
pub mod redis_repository;
pub mod repository;
pub mod search;
pub mod service;

pub use error::{ItemError, ItemResult};
pub use handlers::ApiDoc;
pub use index::{DistanceMetric, ITEM_INDEX, IndexAlgorithm, IndexSchema};
pub use models::{
    CreateItem, Item, ItemId, ItemWithScore, SearchItems, StoredItem, StoredSearchHit, UpdateItem,
};
pub use redis_repository::RedisItemRepository;
pub use repository::ItemRepository;
pub use service::ItemService;
