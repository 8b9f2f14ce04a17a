use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{ItemError, ItemResult};

/// Prefix shared by every item hash key
pub const ITEM_KEY_PREFIX: &str = "item:";

/// Redis key holding the item's hash
pub fn item_key(id: &str) -> String {
    format!("{ITEM_KEY_PREFIX}{id}")
}

/// Item as exposed over HTTP
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Item {
    /// Opaque id; new items get a UUIDv7, sortable by creation time
    #[schema(example = "0190f5e4-7d3c-7b1a-9a51-2f1c0b7e6d11")]
    pub id: String,
    pub title: String,
    pub author: String,
    pub image_url: String,
    /// Vector embedding as standard base64
    #[schema(example = "AACAPwAAAEA=")]
    pub embedding: String,
}

/// Confirmation of a deleted item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ItemId {
    pub id: String,
}

/// Search hit; lower score means closer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ItemWithScore {
    pub id: String,
    pub title: String,
    pub author: String,
    pub image_url: String,
    pub embedding: String,
    pub score: f64,
}

impl ItemWithScore {
    pub fn new(item: Item, score: f64) -> Self {
        Self {
            id: item.id,
            title: item.title,
            author: item.author,
            image_url: item.image_url,
            embedding: item.embedding,
            score,
        }
    }
}

/// DTO for creating a new item
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateItem {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub author: String,
    #[validate(length(min = 1))]
    pub image_url: String,
    /// Standard base64
    pub embedding: String,
}

/// DTO for replacing every field of an existing item
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateItem {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub author: String,
    #[validate(length(min = 1))]
    pub image_url: String,
    pub embedding: String,
}

impl From<UpdateItem> for CreateItem {
    fn from(update: UpdateItem) -> Self {
        Self {
            title: update.title,
            author: update.author,
            image_url: update.image_url,
            embedding: update.embedding,
        }
    }
}

/// Query vector for a nearest-neighbour search
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SearchItems {
    /// Standard base64, same layout as stored embeddings
    pub embedding: String,
}

/// Item as stored in the `item:<id>` hash, embedding as raw bytes
#[derive(Debug, Clone, PartialEq)]
pub struct StoredItem {
    pub id: String,
    pub title: String,
    pub author: String,
    pub image_url: String,
    pub embedding: Vec<u8>,
}

/// Stored item plus the distance reported by the KNN query
#[derive(Debug, Clone, PartialEq)]
pub struct StoredSearchHit {
    pub item: StoredItem,
    pub score: f64,
}

impl StoredItem {
    pub fn key(&self) -> String {
        item_key(&self.id)
    }

    /// Build from a hash reply. An empty hash is a missing item.
    pub fn from_fields(mut fields: HashMap<String, Vec<u8>>) -> ItemResult<Option<Self>> {
        if fields.is_empty() {
            return Ok(None);
        }

        Ok(Some(Self {
            id: take_text(&mut fields, "id")?,
            title: take_text(&mut fields, "title")?,
            author: take_text(&mut fields, "author")?,
            image_url: take_text(&mut fields, "image_url")?,
            embedding: take(&mut fields, "embedding")?,
        }))
    }
}

fn take(fields: &mut HashMap<String, Vec<u8>>, name: &str) -> ItemResult<Vec<u8>> {
    fields
        .remove(name)
        .ok_or_else(|| ItemError::MalformedReply(format!("missing field '{name}'")))
}

fn take_text(fields: &mut HashMap<String, Vec<u8>>, name: &str) -> ItemResult<String> {
    String::from_utf8(take(fields, name)?)
        .map_err(|_| ItemError::MalformedReply(format!("field '{name}' is not UTF-8")))
}
