//! Vector index definition for `item:index`.

use redis::Cmd;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::models::ITEM_KEY_PREFIX;

/// Name of the search index over item hashes
pub const ITEM_INDEX: &str = "item:index";

/// Vector index algorithm
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum IndexAlgorithm {
    /// Brute force, exact
    #[default]
    Flat,
    /// Approximate, graph based
    Hnsw,
}

/// Distance used to rank neighbours; all three report lower as closer
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum DistanceMetric {
    #[default]
    Cosine,
    L2,
    Ip,
}

/// Shape of the embedding vector field. Vectors are FLOAT32.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexSchema {
    pub dim: usize,
    pub algorithm: IndexAlgorithm,
    pub distance_metric: DistanceMetric,
}

impl IndexSchema {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            algorithm: IndexAlgorithm::default(),
            distance_metric: DistanceMetric::default(),
        }
    }

    pub fn with_algorithm(mut self, algorithm: IndexAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_distance_metric(mut self, distance_metric: DistanceMetric) -> Self {
        self.distance_metric = distance_metric;
        self
    }

    /// `FT.CREATE item:index ON HASH PREFIX 1 item: SCHEMA ...`
    pub fn create_command(&self) -> Cmd {
        let mut cmd = redis::cmd("FT.CREATE");
        cmd.arg(ITEM_INDEX)
            .arg("ON")
            .arg("HASH")
            .arg("PREFIX")
            .arg(1)
            .arg(ITEM_KEY_PREFIX)
            .arg("SCHEMA")
            .arg("title")
            .arg("TEXT")
            .arg("author")
            .arg("TEXT")
            .arg("image_url")
            .arg("TEXT")
            .arg("embedding")
            .arg("VECTOR")
            .arg(self.algorithm.to_string())
            .arg(6)
            .arg("TYPE")
            .arg("FLOAT32")
            .arg("DIM")
            .arg(self.dim)
            .arg("DISTANCE_METRIC")
            .arg(self.distance_metric.to_string());
        cmd
    }
}

/// `FT.INFO item:index`
pub fn info_command() -> Cmd {
    let mut cmd = redis::cmd("FT.INFO");
    cmd.arg(ITEM_INDEX);
    cmd
}

/// Whether an `FT.INFO` error means the index does not exist
pub fn is_unknown_index(err: &redis::RedisError) -> bool {
    let message = err.to_string().to_lowercase();
    message.contains("unknown index") || message.contains("no such index")
}

#[cfg(test)]
pub(crate) fn command_text(cmd: &Cmd) -> String {
    String::from_utf8_lossy(&cmd.get_packed_command()).into_owned()
}
