//! The persisted result of one scan.
//!
//! This document is what renderers and job runners read, so field names,
//! `null` TTLs and empty arrays must stay exactly as serialised here:
//!
//! ```json
//! { "_meta": { "deep": true, "ts": 1718000000.5 },
//!   "devices": [ { "ip": "10.0.0.1", "mac": "aa:bb:cc:00:00:01", "vendor": "Cisco",
//!                  "ttl": 64, "open_ports": [80, 443], "ssdp": [],
//!                  "class": "Router (gateway)" } ] }
//! ```

use std::fs;
use std::net::Ipv4Addr;
use std::path::Path;

use pnet::util::MacAddr;
use serde::{Deserialize, Serialize};

use crate::error::SnapshotError;
use crate::network::category::DeviceClass;
use crate::network::host::{DiscoveredHost, ProbeResult};
use crate::network::mac;

pub const DEFAULT_SNAPSHOT_FILE: &str = "netmap_results.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceRecord {
    pub ip: Ipv4Addr,
    #[serde(with = "mac::serde_str")]
    pub mac: MacAddr,
    pub vendor: String,
    pub ttl: Option<u8>,
    pub open_ports: Vec<u16>,
    pub ssdp: Vec<String>,
    pub class: DeviceClass,
}

impl DeviceRecord {
    pub fn new(host: DiscoveredHost, probe: ProbeResult, class: impl Into<DeviceClass>) -> Self {
        Self {
            ip: host.ip,
            mac: host.mac,
            vendor: host.vendor,
            ttl: probe.ttl,
            open_ports: probe.open_ports.into_iter().collect(),
            ssdp: probe.ssdp,
            class: class.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScanMeta {
    pub deep: bool,
    /// Unix time in seconds.
    pub ts: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanSnapshot {
    #[serde(rename = "_meta")]
    pub meta: ScanMeta,
    pub devices: Vec<DeviceRecord>,
}

impl ScanSnapshot {
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Replaces whatever snapshot `path` held before.
    pub fn write_to(&self, path: &Path) -> Result<(), SnapshotError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn read_from(path: &Path) -> Result<Self, SnapshotError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
