use std::net::Ipv4Addr;

use pnet::ipnetwork::Ipv4Network;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Range {
    pub start_addr: Ipv4Addr,
    pub end_addr: Ipv4Addr,
}

impl Ipv4Range {
    pub fn new(start_addr: Ipv4Addr, end_addr: Ipv4Addr) -> Self {
        Self {
            start_addr,
            end_addr,
        }
    }

    pub fn to_iter(self) -> impl Iterator<Item = Ipv4Addr> {
        let start: u32 = self.start_addr.into();
        let end: u32 = self.end_addr.into();
        (start..=end).map(Ipv4Addr::from)
    }
}

/// Addresses of `net` that can belong to a host.
///
/// The network and broadcast addresses are skipped, except for /31 and /32
/// where every address is usable.
pub fn host_range(net: Ipv4Network) -> Ipv4Range {
    let start: u32 = net.network().into();
    let end: u32 = net.broadcast().into();
    if net.prefix() >= 31 {
        return Ipv4Range::new(start.into(), end.into());
    }
    Ipv4Range::new((start + 1).into(), (end - 1).into())
}

/// `addr/prefix` normalised to its network address.
pub fn enclosing_network(addr: Ipv4Addr, prefix: u8) -> Option<Ipv4Network> {
    let net = Ipv4Network::new(addr, prefix).ok()?;
    Ipv4Network::new(net.network(), prefix).ok()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
