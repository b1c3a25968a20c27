// Linux-specific probes: /proc/cpuinfo, /sys/block, mounts, route table, /sys/class/net.

use std::path::Path;

use crate::models::{CpuCore, DiskInfo, PartitionInfo};

use super::ProbeError;

const SECTOR_SIZE: u64 = 512;

/// Installation time as the change time of /etc, epoch seconds.
pub(super) fn install_time() -> Result<u64, ProbeError> {
    #[cfg(target_os = "linux")]
    {
        use std::os::linux::fs::MetadataExt;
        let meta = std::fs::metadata("/etc")?;
        Ok(meta.st_ctime().max(0) as u64)
    }
    #[cfg(not(target_os = "linux"))]
    Err(ProbeError::Unsupported("install time"))
}

/// Per-core descriptors from /proc/cpuinfo.
pub(super) fn cpu_cores() -> Result<Vec<CpuCore>, ProbeError> {
    #[cfg(target_os = "linux")]
    {
        let text = std::fs::read_to_string("/proc/cpuinfo")?;
        Ok(parse_cpuinfo(&text))
    }
    #[cfg(not(target_os = "linux"))]
    Err(ProbeError::Unsupported("per-core cpu descriptors"))
}

fn parse_cpuinfo(text: &str) -> Vec<CpuCore> {
    let mut cores = Vec::new();
    for block in text.split("\n\n").filter(|b| !b.trim().is_empty()) {
        let mut core = CpuCore::default();
        let mut seen_processor = false;
        for line in block.lines() {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let (key, value) = (key.trim(), value.trim());
            match key {
                "processor" => {
                    core.processor = value.parse().unwrap_or_default();
                    seen_processor = true;
                }
                "model name" => core.model = value.to_string(),
                // Numeric ids are text; a malformed value yields 0, not an error.
                "core id" => core.core_id = value.parse().unwrap_or_default(),
                "cpu cores" => core.cores = value.parse().unwrap_or_default(),
                "physical id" => core.physical_id = value.parse().unwrap_or_default(),
                "cpu MHz" => core.mhz = value.parse().unwrap_or_default(),
                _ => {}
            }
        }
        if seen_processor {
            cores.push(core);
        }
    }
    cores
}

/// Block devices from /sys/block. Devices without a classifiable storage
/// controller (loop, ram, ...) are excluded.
pub(super) fn block_devices() -> Result<Vec<DiskInfo>, ProbeError> {
    #[cfg(target_os = "linux")]
    {
        Ok(scan_block_devices(Path::new("/sys/block"))?)
    }
    #[cfg(not(target_os = "linux"))]
    Err(ProbeError::Unsupported("block device inventory"))
}

fn scan_block_devices(sysfs_block: &Path) -> std::io::Result<Vec<DiskInfo>> {
    let mut entries: Vec<_> = std::fs::read_dir(sysfs_block)?.collect::<Result<_, _>>()?;
    entries.sort_by_key(|e| e.file_name());

    let mut disks = Vec::new();
    for entry in entries {
        let name = entry.file_name().to_string_lossy().into_owned();
        let dev = entry.path();
        if storage_controller(&dev).is_none() {
            continue;
        }
        let model = read_trimmed(&dev.join("device/model")).unwrap_or_default();
        let size_bytes = read_u64(&dev.join("size"))
            .unwrap_or(0)
            .saturating_mul(SECTOR_SIZE);
        let partitions = partition_names(&dev, &name)
            .map(|names| names.into_iter().map(|p| format!("/dev/{p}")).collect())
            .unwrap_or_default();
        disks.push(DiskInfo {
            model,
            size_bytes,
            drive_type: drive_type(&dev, &name),
            partitions,
        });
    }
    Ok(disks)
}

fn storage_controller(dev: &Path) -> Option<&'static str> {
    let target = std::fs::read_link(dev.join("device/subsystem")).ok()?;
    match target.file_name()?.to_str()? {
        "nvme" => Some("NVMe"),
        "scsi" => Some("SCSI"),
        "virtio" => Some("virtio"),
        "mmc" => Some("MMC"),
        "ide" => Some("IDE"),
        _ => None,
    }
}

fn drive_type(dev: &Path, name: &str) -> String {
    if name.starts_with("fd") {
        return "FDD".into();
    }
    if name.starts_with("sr") || name.starts_with("scd") {
        return "ODD".into();
    }
    match read_trimmed(&dev.join("queue/rotational")).as_deref() {
        Some("1") => "HDD".into(),
        Some("0") => "SSD".into(),
        _ => "Unknown".into(),
    }
}

fn partition_names(dev: &Path, disk: &str) -> std::io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dev)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with(disk) && entry.path().is_dir() {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}

/// Mounted filesystem partitions from /proc/self/mounts, without usage totals.
pub(super) fn mounted_partitions(
    exclude_fstypes: &[String],
) -> Result<Vec<PartitionInfo>, ProbeError> {
    #[cfg(target_os = "linux")]
    {
        // /proc/self/mounts reflects the caller's mount namespace.
        let text = std::fs::read_to_string("/proc/self/mounts")
            .or_else(|_| std::fs::read_to_string("/proc/mounts"))?;
        Ok(parse_mounts(&text, exclude_fstypes))
    }
    #[cfg(not(target_os = "linux"))]
    Err(ProbeError::Unsupported("mounted partitions"))
}

fn parse_mounts(text: &str, exclude_fstypes: &[String]) -> Vec<PartitionInfo> {
    let mut partitions = Vec::new();
    for line in text.lines() {
        let mut fields = line.split_whitespace();
        let (Some(_device), Some(mount), Some(fstype), Some(opts)) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            continue;
        };
        if exclude_fstypes.iter().any(|e| e == fstype) {
            continue;
        }
        partitions.push(PartitionInfo {
            mount: unescape_mount(mount),
            type_: fstype.to_string(),
            opts: opts.split(',').map(str::to_string).collect(),
            total_bytes: 0,
        });
    }
    partitions
}

// Octal escapes used by the kernel in mount paths.
fn unescape_mount(s: &str) -> String {
    s.replace("\\040", " ")
        .replace("\\011", "\t")
        .replace("\\134", "\\")
}

/// Default IPv4 gateway from /proc/net/route.
pub(super) fn default_gateway() -> Result<String, ProbeError> {
    #[cfg(target_os = "linux")]
    {
        let text = std::fs::read_to_string("/proc/net/route")?;
        parse_route_gateway(&text).ok_or(ProbeError::Missing("default route"))
    }
    #[cfg(not(target_os = "linux"))]
    Err(ProbeError::Unsupported("default gateway"))
}

fn parse_route_gateway(text: &str) -> Option<String> {
    for line in text.lines().skip(1) {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 3 || fields[1] != "00000000" {
            continue;
        }
        // Gateway is little-endian hex.
        let Ok(raw) = u32::from_str_radix(fields[2], 16) else {
            continue;
        };
        if raw == 0 {
            continue;
        }
        return Some(std::net::Ipv4Addr::from(raw.swap_bytes()).to_string());
    }
    None
}

/// Interface index from /sys/class/net/<name>/ifindex, or 0 if unavailable.
pub(super) fn interface_index(name: &str) -> u32 {
    #[cfg(target_os = "linux")]
    {
        let path = format!("/sys/class/net/{name}/ifindex");
        if let Ok(content) = std::fs::read_to_string(&path)
            && let Ok(index) = content.trim().parse::<u32>()
        {
            return index;
        }
    }
    0
}

/// Raw link-flag bitmask from /sys/class/net/<name>/flags (hex), or 0.
pub(super) fn interface_flags(name: &str) -> u64 {
    #[cfg(target_os = "linux")]
    {
        let path = format!("/sys/class/net/{name}/flags");
        if let Ok(content) = std::fs::read_to_string(&path)
            && let Ok(flags) = u64::from_str_radix(content.trim().trim_start_matches("0x"), 16)
        {
            return flags;
        }
    }
    0
}

fn read_trimmed(path: &Path) -> Option<String> {
    let s = std::fs::read_to_string(path).ok()?;
    let s = s.trim();
    if s.is_empty() { None } else { Some(s.to_string()) }
}

fn read_u64(path: &Path) -> Option<u64> {
    read_trimmed(path)?.parse().ok()
}
