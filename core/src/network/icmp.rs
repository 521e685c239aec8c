use std::io::{self, Read};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::{Duration, Instant};

use netmap_protocols::icmp;
use socket2::{Domain, Protocol, SockAddr, Socket, Type};
use tracing::debug;

/// Sends one echo request and returns the TTL of the matching reply.
///
/// Any failure, including a missing raw-socket privilege, reads as "no reply".
pub async fn ping_ttl(addr: Ipv4Addr, wait: Duration) -> Option<u8> {
    match tokio::task::spawn_blocking(move || echo_once(addr, wait)).await {
        Ok(Ok(ttl)) => ttl,
        Ok(Err(e)) => {
            debug!("echo probe to {addr} failed: {e}");
            None
        }
        Err(e) => {
            debug!("echo probe task for {addr} failed: {e}");
            None
        }
    }
}

fn echo_once(addr: Ipv4Addr, wait: Duration) -> io::Result<Option<u8>> {
    let socket = Socket::new(Domain::IPV4, Type::RAW, Some(Protocol::ICMPV4))?;
    let identifier: u16 = rand::random();
    let request = icmp::create_echo_request(identifier, 1).map_err(io::Error::other)?;
    socket.send_to(&request, &SockAddr::from(SocketAddr::new(IpAddr::V4(addr), 0)))?;

    let deadline = Instant::now() + wait;
    let mut buffer = [0u8; 1500];
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Ok(None);
        }
        socket.set_read_timeout(Some(remaining))?;
        let len = match (&socket).read(&mut buffer) {
            Ok(len) => len,
            Err(e) if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut) => {
                return Ok(None);
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        // Raw sockets see every ICMP datagram; skip what is not ours.
        if let Some(ttl) = icmp::parse_echo_reply(&buffer[..len], addr, identifier) {
            return Ok(Some(ttl));
        }
    }
}
