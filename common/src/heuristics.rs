//! Static lookup tables driving device classification.
//!
//! The tables are plain data so they can be tuned from a TOML file without
//! touching the rule engine. Any key missing from the file keeps its built-in
//! value.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Inclusive TTL window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TtlRange {
    pub min: u8,
    pub max: u8,
}

impl TtlRange {
    pub const fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, ttl: u8) -> bool {
        self.min <= ttl && ttl <= self.max
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicTable {
    pub printer_ports: BTreeSet<u16>,
    pub nas_ports: BTreeSet<u16>,
    pub tv_ports: BTreeSet<u16>,
    /// Probed on every host regardless of device family.
    pub common_ports: BTreeSet<u16>,
    pub web_ports: BTreeSet<u16>,
    pub management_ports: BTreeSet<u16>,

    pub infra_vendors: Vec<String>,
    pub iot_vendors: Vec<String>,
    pub chip_vendors: Vec<String>,
    pub mobile_brands: Vec<String>,

    /// Windows hosts start at 128.
    pub windows_ttl: TtlRange,
    /// Linux, Android, iOS and most embedded stacks start at 64.
    pub unix_ttl: TtlRange,
}

impl Default for HeuristicTable {
    fn default() -> Self {
        Self {
            printer_ports: ports(&[515, 631, 9100]),
            nas_ports: ports(&[5000, 5001, 32400]),
            tv_ports: ports(&[5500, 7000, 8008, 8009, 8443, 8200, 32469]),
            common_ports: ports(&[22, 80, 443, 445]),
            web_ports: ports(&[80, 443]),
            management_ports: ports(&[22, 445]),
            infra_vendors: names(&[
                "cisco", "ubiquiti", "tplink", "tp-link", "netgear", "mikrotik", "aruba",
                "juniper", "d-link", "huawei", "zyxel",
            ]),
            iot_vendors: names(&[
                "espressif", "tuya", "sonoff", "shelly", "tapo", "hikvision", "ring", "dahua",
            ]),
            chip_vendors: names(&["realtek", "broadcom", "qualcomm", "mediatek", "intel"]),
            mobile_brands: names(&[
                "apple", "samsung", "xiaomi", "huawei", "oppo", "oneplus", "motorola", "sony",
                "google",
            ]),
            windows_ttl: TtlRange::new(120, 130),
            unix_ttl: TtlRange::new(58, 66),
        }
    }
}

impl HeuristicTable {
    pub fn from_toml_str(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::HeuristicsIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw).map_err(|source| ConfigError::HeuristicsParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Every port the port probe should try, ascending.
    pub fn candidate_ports(&self) -> Vec<u16> {
        let all: BTreeSet<u16> = self
            .common_ports
            .iter()
            .chain(&self.printer_ports)
            .chain(&self.nas_ports)
            .chain(&self.tv_ports)
            .copied()
            .collect();
        all.into_iter().collect()
    }

    pub fn is_infra_vendor(&self, vendor: &str) -> bool {
        matches_any(&self.infra_vendors, vendor)
    }

    pub fn is_iot_vendor(&self, vendor: &str) -> bool {
        matches_any(&self.iot_vendors, vendor)
    }

    pub fn is_chip_vendor(&self, vendor: &str) -> bool {
        matches_any(&self.chip_vendors, vendor)
    }

    pub fn is_mobile_brand(&self, vendor: &str) -> bool {
        matches_any(&self.mobile_brands, vendor)
    }
}

/// Case-insensitive substring match of `vendor` against any entry of `list`.
fn matches_any(list: &[String], vendor: &str) -> bool {
    let vendor = vendor.to_lowercase();
    list.iter()
        .any(|needle| !needle.is_empty() && vendor.contains(&needle.to_lowercase()))
}

fn ports(list: &[u16]) -> BTreeSet<u16> {
    list.iter().copied().collect()
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
