use std::io;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use netmap_protocols::ssdp::{self, SEARCH_ALL, SSDP_PORT};
use tokio::net::UdpSocket;
use tokio::time::{Instant, timeout_at};
use tracing::debug;

/// Unicast `M-SEARCH` to `addr`, collecting what it answers within `window`.
pub async fn ssdp_responses(addr: Ipv4Addr, window: Duration) -> Vec<String> {
    match search(SocketAddr::new(IpAddr::V4(addr), SSDP_PORT), window).await {
        Ok(responses) => responses,
        Err(e) => {
            debug!("SSDP probe to {addr} failed: {e}");
            Vec::new()
        }
    }
}

/// Datagrams from other senders are dropped. The first receive error ends
/// the window early and keeps what was already collected.
pub(crate) async fn search(target: SocketAddr, window: Duration) -> io::Result<Vec<String>> {
    let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0)).await?;
    socket.send_to(&ssdp::create_m_search(SEARCH_ALL, 1), target).await?;

    let deadline = Instant::now() + window;
    let mut responses = Vec::new();
    let mut buffer = [0u8; 2048];
    loop {
        match timeout_at(deadline, socket.recv_from(&mut buffer)).await {
            Ok(Ok((len, from))) if from.ip() == target.ip() => {
                responses.push(ssdp::decode_response(&buffer[..len]));
            }
            Ok(Ok((_, from))) => debug!("ignoring SSDP datagram from {from}"),
            Ok(Err(e)) => {
                debug!("SSDP receive from {target} failed: {e}");
                break;
            }
            Err(_) => break,
        }
    }
    Ok(responses)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
