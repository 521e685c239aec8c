//! Builds the final snapshot out of per-host records.

use std::collections::BTreeMap;
use std::net::Ipv4Addr;

use netmap_common::heuristics::HeuristicTable;
use netmap_common::network::category::{Category, DeviceClass};
use netmap_common::network::host::{DiscoveredHost, ProbeResult};
use netmap_common::snapshot::{DeviceRecord, ScanMeta, ScanSnapshot};

use crate::classify::{self, ClassifyInput};

/// Records of a scan without probes: the class is the vendor label.
pub fn shallow_records(hosts: Vec<DiscoveredHost>) -> Vec<DeviceRecord> {
    hosts
        .into_iter()
        .map(|host| {
            let class = host.vendor.clone();
            DeviceRecord::new(host, ProbeResult::empty(), class)
        })
        .collect()
}

pub fn classified_records(
    table: &HeuristicTable,
    gateway: Option<Ipv4Addr>,
    probed: Vec<(DiscoveredHost, ProbeResult)>,
) -> Vec<DeviceRecord> {
    probed
        .into_iter()
        .map(|(host, probe)| {
            let category = classify::classify(table, &ClassifyInput::from_probe(&host, &probe, gateway));
            DeviceRecord::new(host, probe, category)
        })
        .collect()
}

pub fn aggregate(records: Vec<DeviceRecord>, gateway: Option<Ipv4Addr>, deep: bool) -> ScanSnapshot {
    aggregate_at(records, gateway, deep, unix_now())
}

/// Sorts by address, keeps the last record per address and forces the
/// gateway class. Applying it twice gives the same devices.
pub fn aggregate_at(
    records: Vec<DeviceRecord>,
    gateway: Option<Ipv4Addr>,
    deep: bool,
    ts: f64,
) -> ScanSnapshot {
    let mut by_ip: BTreeMap<Ipv4Addr, DeviceRecord> = BTreeMap::new();
    for record in records {
        by_ip.insert(record.ip, record);
    }

    let devices = by_ip
        .into_values()
        .map(|mut record| {
            if gateway == Some(record.ip) {
                record.class = DeviceClass::from(Category::Gateway);
            }
            record
        })
        .collect();

    ScanSnapshot {
        meta: ScanMeta { deep, ts },
        devices,
    }
}

fn unix_now() -> f64 {
    chrono::Utc::now().timestamp_micros() as f64 / 1_000_000.0
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
