// Static host inventory via sysinfo plus /proc and /sys probes

mod linux;

use std::collections::HashMap;

use sysinfo::{Disks, Networks, System};
use tracing::instrument;

use crate::config::CollectionConfig;
use crate::models::*;

/// Failure of a single inventory probe. Never crosses the snapshot boundary:
/// every occurrence is logged and replaced by the field's zero/empty value.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("unsupported on this platform: {0}")]
    Unsupported(&'static str),
    #[error("{0} not present")]
    Missing(&'static str),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Log a failed probe and degrade to the zero/empty value, keeping sibling
/// fields unaffected.
fn best_effort<T: Default>(operation: &'static str, result: Result<T, ProbeError>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(error = %e, operation, "inventory probe failed");
            T::default()
        }
    }
}

// Subset of the Linux IFF_* bits reported per interface, in bit order.
const LINK_FLAGS: [(u64, &str); 6] = [
    (0x1, "up"),
    (0x2, "broadcast"),
    (0x8, "loopback"),
    (0x10, "pointtopoint"),
    (0x40, "running"),
    (0x1000, "multicast"),
];

/// Decode a raw link-flag bitmask into named tokens, stable order, no duplicates.
pub fn decode_link_flags(raw: u64) -> Vec<String> {
    LINK_FLAGS
        .iter()
        .filter(|(bit, _)| raw & bit != 0)
        .map(|(_, name)| (*name).to_string())
        .collect()
}

/// Fill each partition's total from the per-mountpoint usage table.
/// A missing entry is logged and leaves that partition's total at zero; the
/// entry itself stays in the list.
pub fn fill_partition_usage(partitions: &mut [PartitionInfo], totals: &HashMap<String, u64>) {
    for partition in partitions {
        match totals.get(&partition.mount) {
            Some(total) => partition.total_bytes = *total,
            None => tracing::warn!(
                mount = %partition.mount,
                operation = "partition_usage",
                "no usage entry for mount"
            ),
        }
    }
}

pub struct InventoryRepo {
    sys: System,
    disks: Disks,
    networks: Networks,
    exclude_fstypes: Vec<String>,
}

impl InventoryRepo {
    pub fn new(config: &CollectionConfig) -> Self {
        let mut sys = System::new_all();
        sys.refresh_all();
        let disks = Disks::new_with_refreshed_list();
        let networks = Networks::new_with_refreshed_list();
        Self {
            sys,
            disks,
            networks,
            exclude_fstypes: config.exclude_fstypes.clone(),
        }
    }

    /// Capture one inventory snapshot. Never fails as an operation: each
    /// collection step degrades independently to zero/empty values.
    #[instrument(skip(self), fields(repo = "inventory", operation = "snapshot"))]
    pub fn snapshot(&mut self) -> Snapshot {
        self.sys.refresh_memory();
        self.sys.refresh_cpu_all();
        self.disks.refresh(true);
        self.networks.refresh(true);

        let timestamp_ms = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, operation = "get_timestamp", "system time error");
                0
            });

        let (host, os, kernel) = self.collect_host();
        let cpu = self.collect_cpu();
        let memory = self.collect_memory();
        let disks = self.collect_disks();
        let partitions = self.collect_partitions();
        let (gateway, interfaces) = self.collect_network();

        Snapshot {
            timestamp_ms,
            host,
            os,
            kernel,
            cpu,
            memory,
            disks,
            partitions,
            gateway,
            interfaces,
        }
    }

    fn collect_host(&self) -> (HostInfo, OsInfo, KernelInfo) {
        let host = HostInfo {
            name: System::host_name().unwrap_or_default(),
            uptime_secs: System::uptime(),
        };
        let os = OsInfo {
            name: std::env::consts::OS.into(),
            platform: System::distribution_id(),
            platform_version: System::os_version().unwrap_or_default(),
            install_epoch_secs: best_effort("install_time", linux::install_time()),
        };
        let kernel = KernelInfo {
            version: System::kernel_version().unwrap_or_default(),
            arch: System::cpu_arch(),
        };
        (host, os, kernel)
    }

    fn collect_cpu(&self) -> CpuInfo {
        let physical = match System::physical_core_count() {
            Some(n) => n as u32,
            None => {
                tracing::warn!(
                    operation = "physical_core_count",
                    "physical core count unavailable"
                );
                0
            }
        };
        let logical = self.sys.cpus().len() as u32;
        // Counts already obtained survive a failed descriptor probe.
        let cores = best_effort("cpu_cores", linux::cpu_cores());
        CpuInfo {
            physical,
            logical,
            cores,
        }
    }

    fn collect_memory(&self) -> MemoryInfo {
        MemoryInfo {
            physical_bytes: self.sys.total_memory(),
            swap_bytes: self.sys.total_swap(),
        }
    }

    fn collect_disks(&self) -> Vec<DiskInfo> {
        best_effort("block_devices", linux::block_devices())
    }

    fn collect_partitions(&self) -> Vec<PartitionInfo> {
        let mut partitions = best_effort(
            "mounted_partitions",
            linux::mounted_partitions(&self.exclude_fstypes),
        );
        let totals: HashMap<String, u64> = self
            .disks
            .list()
            .iter()
            .map(|d| (d.mount_point().to_string_lossy().into_owned(), d.total_space()))
            .collect();
        fill_partition_usage(&mut partitions, &totals);
        partitions
    }

    fn collect_network(&self) -> (String, Vec<InterfaceInfo>) {
        let gateway = best_effort("default_gateway", linux::default_gateway());
        let mut interfaces: Vec<InterfaceInfo> = self
            .networks
            .list()
            .iter()
            .map(|(name, data)| InterfaceInfo {
                index: linux::interface_index(name),
                name: name.clone(),
                mtu: data.mtu(),
                flags: decode_link_flags(linux::interface_flags(name)),
                mac_address: data.mac_address().to_string(),
                addresses: data
                    .ip_networks()
                    .iter()
                    .map(|n| format!("{}/{}", n.addr, n.prefix))
                    .collect(),
            })
            .collect();
        // Networks iterates a map; sort for deterministic payloads.
        interfaces.sort_by(|a, b| a.index.cmp(&b.index).then_with(|| a.name.cmp(&b.name)));
        (gateway, interfaces)
    }
}
