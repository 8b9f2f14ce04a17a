//! Shared test utilities for domain testing
//!
//! - `TestRedis`: Redis 8 container (with the query engine) and automatic cleanup (feature: "redis")
//! - `TestDataBuilder`: Deterministic test data generation (always available)
//! - `assertions`: Custom assertion helpers (always available)
//!
//! # Redis Testing
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { workspace = true, features = ["redis"] }
//! ```
//!
//! ```rust,ignore
//! use test_utils::{TestDataBuilder, TestRedis};
//!
//! #[tokio::test]
//! async fn my_redis_test() {
//!     let redis = TestRedis::new().await;
//!     let conn = redis.connection_manager().await;
//!     let builder = TestDataBuilder::from_test_name("my_redis_test");
//!
//!     let title = builder.title("main");
//!     let vector = builder.embedding(4);
//! }
//! ```

use uuid::Uuid;

#[cfg(feature = "redis")]
mod redis;

#[cfg(feature = "redis")]
pub use redis::TestRedis;

/// Builder for test data with deterministic randomization
///
/// Same seed, same data: tests stay reproducible.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from a hash of the test name
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_item");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Deterministic UUID derived from the seed
    pub fn item_id(&self) -> Uuid {
        let bytes = self.seed.to_le_bytes();
        let mut uuid_bytes = [0u8; 16];
        uuid_bytes[..8].copy_from_slice(&bytes);
        uuid_bytes[8..16].copy_from_slice(&bytes);
        Uuid::from_bytes(uuid_bytes)
    }

    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(7);
    /// assert_eq!(builder.title("main"), "test-title-7-main");
    /// ```
    pub fn title(&self, suffix: &str) -> String {
        format!("test-title-{}-{}", self.seed, suffix)
    }

    /// A `dim`-component vector with values in [0, 1)
    pub fn embedding(&self, dim: usize) -> Vec<f32> {
        let mut state = self.seed | 1;
        (0..dim)
            .map(|_| {
                // xorshift64
                state ^= state << 13;
                state ^= state >> 7;
                state ^= state << 17;
                (state >> 40) as f32 / (1u64 << 24) as f32
            })
            .collect()
    }

    /// [`embedding`](Self::embedding) as little-endian FLOAT32 bytes
    pub fn embedding_bytes(&self, dim: usize) -> Vec<u8> {
        vector_bytes(&self.embedding(dim))
    }
}

/// Little-endian FLOAT32 bytes of `vector`, the layout vector fields are stored in
pub fn vector_bytes(vector: &[f32]) -> Vec<u8> {
    vector.iter().flat_map(|v| v.to_le_bytes()).collect()
}

/// Test assertion helpers
pub mod assertions {
    use uuid::Uuid;

    pub fn assert_uuid_eq(actual: Uuid, expected: Uuid, context: &str) {
        assert_eq!(
            actual, expected,
            "{}: expected UUID {}, got {}",
            context, expected, actual
        );
    }

    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_builder_deterministic() {
        let builder1 = TestDataBuilder::new(42);
        let builder2 = TestDataBuilder::new(42);

        assert_eq!(builder1.item_id(), builder2.item_id());
        assert_eq!(builder1.title("a"), builder2.title("a"));
        assert_eq!(builder1.embedding(8), builder2.embedding(8));
    }

    #[test]
    fn test_data_builder_different_names() {
        let builder1 = TestDataBuilder::from_test_name("test1");
        let builder2 = TestDataBuilder::from_test_name("test2");

        assert_ne!(builder1.item_id(), builder2.item_id());
        assert_ne!(builder1.embedding(4), builder2.embedding(4));
    }

    #[test]
    fn test_embedding_values_and_bytes() {
        let builder = TestDataBuilder::from_test_name("embedding");
        let vector = builder.embedding(16);

        assert_eq!(vector.len(), 16);
        assert!(vector.iter().all(|v| (0.0..1.0).contains(v)));
        assert_eq!(builder.embedding_bytes(16).len(), 64);
        assert_eq!(vector_bytes(&[1.0]), vec![0x00, 0x00, 0x80, 0x3f]);
    }
}
