//! Rule engine turning probe signals into a device [`Category`].
//!
//! Rules are evaluated top to bottom and the first match wins:
//!
//! 1. the default gateway is always [`Category::Gateway`];
//! 2. an open printer port, then an open media port, decide on their own;
//! 3. network-gear vendors are access points when they serve a web UI or
//!    answer SSDP, possible infrastructure otherwise;
//! 4. IoT vendors;
//! 5. randomised MACs and phone brands;
//! 6. with an echo reply, the TTL family and management ports;
//! 7. everything else is [`Category::Unknown`].

use std::collections::BTreeSet;
use std::net::Ipv4Addr;

use netmap_common::heuristics::HeuristicTable;
use netmap_common::network::category::Category;
use netmap_common::network::host::{DiscoveredHost, ProbeResult};
use netmap_common::network::mac::{UNKNOWN_VENDOR, is_locally_administered};
use pnet::util::MacAddr;

/// Everything the rules look at for one device.
#[derive(Debug, Clone, Copy)]
pub struct ClassifyInput<'a> {
    pub vendor: &'a str,
    pub ip: Ipv4Addr,
    pub gateway: Option<Ipv4Addr>,
    pub mac: MacAddr,
    pub ttl: Option<u8>,
    pub open_ports: &'a BTreeSet<u16>,
    pub ssdp: &'a [String],
}

impl<'a> ClassifyInput<'a> {
    pub fn from_probe(host: &'a DiscoveredHost, probe: &'a ProbeResult, gateway: Option<Ipv4Addr>) -> Self {
        Self {
            vendor: &host.vendor,
            ip: host.ip,
            gateway,
            mac: host.mac,
            ttl: probe.ttl,
            open_ports: &probe.open_ports,
            ssdp: &probe.ssdp,
        }
    }
}

pub fn classify(table: &HeuristicTable, input: &ClassifyInput<'_>) -> Category {
    let vendor = if input.vendor.trim().is_empty() {
        UNKNOWN_VENDOR
    } else {
        input.vendor
    };
    let open = input.open_ports;
    let any_open = |ports: &BTreeSet<u16>| !open.is_disjoint(ports);

    if input.gateway == Some(input.ip) {
        return Category::Gateway;
    }

    if any_open(&table.printer_ports) {
        return Category::Printer;
    }
    if any_open(&table.tv_ports) {
        return Category::Media;
    }

    if table.is_infra_vendor(vendor) {
        if any_open(&table.web_ports) || !input.ssdp.is_empty() {
            return Category::Infrastructure;
        }
        return Category::PossibleInfrastructure;
    }

    if table.is_iot_vendor(vendor) {
        return Category::Iot;
    }

    if is_locally_administered(input.mac) || table.is_mobile_brand(vendor) {
        return Category::Mobile;
    }

    // A TTL of zero never comes back in a real reply; treat it as missing.
    if let Some(ttl) = input.ttl.filter(|ttl| *ttl > 0) {
        if table.windows_ttl.contains(ttl)
            || any_open(&table.management_ports)
            || table.is_chip_vendor(vendor)
        {
            return Category::Workstation;
        }
        if table.unix_ttl.contains(ttl) {
            if any_open(&table.web_ports) {
                return Category::Infrastructure;
            }
            if table.is_mobile_brand(vendor) {
                return Category::Mobile;
            }
            return Category::Workstation;
        }
    }

    Category::Unknown
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
