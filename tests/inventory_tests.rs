// Inventory collection tests: flag decoding, usage fill, live snapshot smoke test

use std::collections::HashMap;

use hostinv::config::CollectionConfig;
use hostinv::inventory_repo::{InventoryRepo, decode_link_flags, fill_partition_usage};
use hostinv::models::PartitionInfo;

#[test]
fn test_decode_link_flags_up_broadcast() {
    assert_eq!(decode_link_flags(0x3), vec!["up", "broadcast"]);
}

#[test]
fn test_decode_link_flags_zero_is_empty() {
    assert!(decode_link_flags(0).is_empty());
}

#[test]
fn test_decode_link_flags_stable_order_no_duplicates() {
    // Typical running ethernet interface: up | broadcast | running | multicast.
    let flags = decode_link_flags(0x1 | 0x2 | 0x40 | 0x1000);
    assert_eq!(flags, vec!["up", "broadcast", "running", "multicast"]);
    let all = decode_link_flags(u64::MAX);
    assert_eq!(
        all,
        vec![
            "up",
            "broadcast",
            "loopback",
            "pointtopoint",
            "running",
            "multicast"
        ]
    );
}

#[test]
fn test_decode_link_flags_ignores_unreported_bits() {
    // IFF_DEBUG (0x4) and IFF_NOARP (0x80) have no token.
    assert!(decode_link_flags(0x4 | 0x80).is_empty());
}

#[test]
fn test_fill_partition_usage_keeps_entries_without_totals() {
    let mut partitions = vec![
        PartitionInfo {
            mount: "/".into(),
            type_: "ext4".into(),
            opts: vec!["rw".into()],
            total_bytes: 0,
        },
        PartitionInfo {
            mount: "/mnt/nfs".into(),
            type_: "nfs4".into(),
            opts: vec!["rw".into(), "noatime".into()],
            total_bytes: 0,
        },
    ];
    let totals = HashMap::from([("/".to_string(), 42_000_000_000u64)]);
    fill_partition_usage(&mut partitions, &totals);

    assert_eq!(partitions[0].total_bytes, 42_000_000_000);
    // The entry with no usage lookup stays recorded, total left at zero.
    assert_eq!(partitions[1].mount, "/mnt/nfs");
    assert_eq!(partitions[1].type_, "nfs4");
    assert_eq!(partitions[1].opts, vec!["rw", "noatime"]);
    assert_eq!(partitions[1].total_bytes, 0);
}

#[test]
fn test_snapshot_smoke() {
    let mut repo = InventoryRepo::new(&CollectionConfig::default());
    let snapshot = repo.snapshot();

    assert!(snapshot.timestamp_ms > 0);
    assert!(snapshot.cpu.logical > 0);
    for partition in &snapshot.partitions {
        assert!(!partition.mount.is_empty());
        assert!(!partition.type_.is_empty());
    }
    for disk in &snapshot.disks {
        assert!(!disk.drive_type.is_empty());
    }

    // The record always serializes whole.
    let json = serde_json::to_string(&snapshot).unwrap();
    assert!(json.contains("\"timestampMs\""));
}

#[test]
fn test_snapshot_repeated_calls_are_independent() {
    let mut repo = InventoryRepo::new(&CollectionConfig::default());
    let first = repo.snapshot();
    let second = repo.snapshot();
    assert_eq!(first.cpu.logical, second.cpu.logical);
    assert_eq!(first.host.name, second.host.name);
}
