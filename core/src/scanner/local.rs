//! A **local area network (LAN)** scanner.
//!
//! Broadcasts one ARP request per host address of the subnet and listens for
//! replies on the same datalink channel.
//!
//! This scanner requires **root privileges** to construct and intercept raw
//! Layer 2 packets via the operating system's network sockets.

use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use netmap_common::error::DiscoveryError;
use netmap_common::network::host::DiscoveredHost;
use netmap_common::network::interface::InterfaceContext;
use netmap_common::network::range::host_range;
use netmap_protocols::{MIN_ETH_FRAME_NO_FCS, arp};
use pnet::datalink::{self, Channel, Config, DataLinkReceiver, DataLinkSender, NetworkInterface};
use pnet::util::MacAddr;
use tracing::{debug, warn};

use super::NetworkScanner;
use crate::network::channel;

pub struct LocalScanner;

#[async_trait]
impl NetworkScanner for LocalScanner {
    async fn scan(
        &self,
        ctx: &InterfaceContext,
        timeout: Duration,
        retries: u32,
    ) -> Result<Vec<DiscoveredHost>, DiscoveryError> {
        let ctx = ctx.clone();
        tokio::task::spawn_blocking(move || sweep(&ctx, timeout, retries, datalink::channel))
            .await
            .map_err(|e| DiscoveryError::Task(e.to_string()))?
    }
}

pub(crate) fn sweep<F>(
    ctx: &InterfaceContext,
    timeout: Duration,
    retries: u32,
    channel_opener: F,
) -> Result<Vec<DiscoveredHost>, DiscoveryError>
where
    F: FnOnce(&NetworkInterface, Config) -> std::io::Result<Channel>,
{
    let (mut tx, mut rx) =
        channel::open_eth_channel(&ctx.interface, &channel::config(), channel_opener)?;

    let mut found: HashMap<Ipv4Addr, MacAddr> = HashMap::new();
    for round in 0..=retries {
        if round > 0 {
            debug!("no ARP replies on {}, retry {round}/{retries}", ctx.name());
        }
        send_requests(tx.as_mut(), ctx)?;
        collect_replies(rx.as_mut(), Instant::now() + timeout, ctx, &mut found);
        if !found.is_empty() {
            break;
        }
    }

    Ok(found
        .into_iter()
        .map(|(ip, mac)| DiscoveredHost::new(ip, mac))
        .collect())
}

/// Every host address of the subnet except our own.
fn targets(ctx: &InterfaceContext) -> impl Iterator<Item = Ipv4Addr> + '_ {
    host_range(ctx.subnet)
        .to_iter()
        .filter(move |addr| *addr != ctx.address)
}

/// Builds each request into one reused frame right before sending it.
///
/// Fails only when not a single request left the interface.
fn send_requests(tx: &mut dyn DataLinkSender, ctx: &InterfaceContext) -> Result<(), DiscoveryError> {
    let mut frame = [0u8; MIN_ETH_FRAME_NO_FCS];
    let mut attempted = 0usize;
    let mut sent = 0usize;
    let mut last_error = None;
    for dst in targets(ctx) {
        arp::write_request(&mut frame, ctx.mac, ctx.address, dst)
            .map_err(|e| DiscoveryError::Packet(e.to_string()))?;
        attempted += 1;
        match tx.send_to(&frame, None) {
            Some(Err(e)) => last_error = Some(e),
            _ => sent += 1,
        }
    }
    debug!("sent {sent} ARP requests on {}", ctx.name());
    match last_error {
        Some(source) if sent == 0 => Err(DiscoveryError::Send {
            interface: ctx.name().to_string(),
            source,
        }),
        Some(e) => {
            warn!(
                "{} of {attempted} ARP requests failed on {}: {e}",
                attempted - sent,
                ctx.name()
            );
            Ok(())
        }
        None => Ok(()),
    }
}

/// Reads frames until `deadline`. Later replies for an address overwrite
/// earlier ones.
fn collect_replies(
    rx: &mut dyn DataLinkReceiver,
    deadline: Instant,
    ctx: &InterfaceContext,
    found: &mut HashMap<Ipv4Addr, MacAddr>,
) {
    while Instant::now() < deadline {
        let Ok(frame) = rx.next() else {
            continue;
        };
        let Some(reply) = arp::parse_reply(frame) else {
            continue;
        };
        if reply.ip == ctx.address || !ctx.subnet.contains(reply.ip) {
            continue;
        }
        if let Some(previous) = found.insert(reply.ip, reply.mac) {
            if previous != reply.mac {
                debug!("{} moved from {previous} to {}", reply.ip, reply.mac);
            }
        }
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
