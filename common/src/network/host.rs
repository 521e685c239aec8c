use std::collections::BTreeSet;
use std::net::Ipv4Addr;

use pnet::util::MacAddr;

use super::mac::UNKNOWN_VENDOR;

/// A host that answered the ARP sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredHost {
    pub ip: Ipv4Addr,
    pub mac: MacAddr,
    pub vendor: String,
}

impl DiscoveredHost {
    pub fn new(ip: Ipv4Addr, mac: MacAddr) -> Self {
        Self {
            ip,
            mac,
            vendor: UNKNOWN_VENDOR.to_string(),
        }
    }

    pub fn with_vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor = vendor.into();
        self
    }
}

/// Signals gathered by the active probes of one host.
///
/// Every field may be absent: a host that ignores pings, has no open
/// candidate port and does not speak SSDP still gets a result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeResult {
    /// TTL of the echo reply, `None` if no reply arrived.
    pub ttl: Option<u8>,
    pub open_ports: BTreeSet<u16>,
    /// Raw SSDP answers, lossily decoded as UTF-8.
    pub ssdp: Vec<String>,
}

impl ProbeResult {
    pub fn empty() -> Self {
        Self::default()
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_host_has_unknown_vendor() {
        let host = DiscoveredHost::new(Ipv4Addr::new(10, 0, 0, 2), MacAddr::new(0, 1, 2, 3, 4, 5));
        assert_eq!(host.vendor, "Unknown");
    }
}
