// Host identity, CPU, memory and snapshot models

use serde::{Deserialize, Serialize};

use super::{DiskInfo, InterfaceInfo, PartitionInfo};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostInfo {
    pub name: String,
    pub uptime_secs: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OsInfo {
    pub name: String,
    pub platform: String,
    pub platform_version: String,
    /// Installation time, epoch seconds; 0 when the platform probe fails.
    pub install_epoch_secs: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KernelInfo {
    pub version: String,
    pub arch: String,
}

/// One logical-processor record from the OS topology.
/// `core_id`/`physical_id` come from text and fall back to 0 on parse failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpuCore {
    pub processor: i32,
    pub model: String,
    pub core_id: u32,
    pub cores: u32,
    pub physical_id: u32,
    pub mhz: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpuInfo {
    pub physical: u32,
    pub logical: u32,
    pub cores: Vec<CpuCore>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryInfo {
    pub physical_bytes: u64,
    pub swap_bytes: u64,
}

/// One point-in-time inventory record. Fields are independent: a failed
/// source query leaves just that field at its zero/empty value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub timestamp_ms: u64,
    pub host: HostInfo,
    pub os: OsInfo,
    pub kernel: KernelInfo,
    pub cpu: CpuInfo,
    pub memory: MemoryInfo,
    pub disks: Vec<DiskInfo>,
    pub partitions: Vec<PartitionInfo>,
    pub gateway: String,
    pub interfaces: Vec<InterfaceInfo>,
}
