// Storage / disk models

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiskInfo {
    pub model: String,
    pub size_bytes: u64,
    pub drive_type: String,
    /// Partition device names; absolute `/dev/...` form on Linux.
    pub partitions: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartitionInfo {
    pub mount: String,
    #[serde(rename = "type")]
    pub type_: String,
    pub opts: Vec<String>,
    /// Total capacity; stays 0 when the usage lookup for the mount fails.
    pub total_bytes: u64,
}
