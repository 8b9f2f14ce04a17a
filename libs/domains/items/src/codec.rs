//! Text transport for binary embeddings.
//!
//! Embeddings travel over HTTP as standard (padded) base64 and are stored as
//! raw bytes. Only the service crosses this boundary.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::{ItemError, ItemResult};

pub fn decode_embedding(text: &str) -> ItemResult<Vec<u8>> {
    STANDARD
        .decode(text)
        .map_err(|e| ItemError::InvalidEmbedding(e.to_string()))
}

pub fn encode_embedding(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}
