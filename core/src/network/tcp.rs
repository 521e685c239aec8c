use std::collections::BTreeSet;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use tokio::net::TcpStream;
use tokio::time::timeout;

/// Ports of `addr` that complete a TCP handshake, tried one after another.
pub async fn open_ports(addr: Ipv4Addr, ports: &[u16], probe_timeout: Duration) -> BTreeSet<u16> {
    let mut open = BTreeSet::new();
    for &port in ports {
        if handshake_probe(SocketAddr::new(IpAddr::V4(addr), port), probe_timeout).await {
            open.insert(port);
        }
    }
    open
}

/// Refused, unreachable and timed-out connections all count as closed.
pub async fn handshake_probe(socket_addr: SocketAddr, probe_timeout: Duration) -> bool {
    matches!(
        timeout(probe_timeout, TcpStream::connect(socket_addr)).await,
        Ok(Ok(_))
    )
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
