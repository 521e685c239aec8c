//! Active per-host probing for deep scans.
//!
//! Each host gets an echo request, a TCP connect sweep over the candidate
//! ports and a unicast SSDP search. None of them can fail the scan: a probe
//! that errors simply contributes nothing to the host's [`ProbeResult`].

use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use netmap_common::config::ScanConfig;
use netmap_common::error::ScanError;
use netmap_common::network::host::{DiscoveredHost, ProbeResult};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::network::{icmp, ssdp, tcp};

#[async_trait]
pub trait HostProber: Send + Sync {
    async fn probe(&self, host: &DiscoveredHost) -> ProbeResult;
}

pub struct NetworkProber {
    ports: Vec<u16>,
    ping_timeout: Duration,
    connect_timeout: Duration,
    ssdp_window: Duration,
}

impl NetworkProber {
    pub fn new(ports: Vec<u16>, ping_timeout: Duration, connect_timeout: Duration, ssdp_window: Duration) -> Self {
        Self {
            ports,
            ping_timeout,
            connect_timeout,
            ssdp_window,
        }
    }

    pub fn from_config(config: &ScanConfig) -> Self {
        Self::new(
            config.heuristics.candidate_ports(),
            config.ping_timeout,
            config.connect_timeout,
            config.ssdp_window,
        )
    }
}

#[async_trait]
impl HostProber for NetworkProber {
    async fn probe(&self, host: &DiscoveredHost) -> ProbeResult {
        let (ttl, open_ports, ssdp) = tokio::join!(
            icmp::ping_ttl(host.ip, self.ping_timeout),
            tcp::open_ports(host.ip, &self.ports, self.connect_timeout),
            ssdp::ssdp_responses(host.ip, self.ssdp_window),
        );
        debug!(
            "{}: ttl={ttl:?} ports={open_ports:?} ssdp={}",
            host.ip,
            ssdp.len()
        );
        ProbeResult {
            ttl,
            open_ports,
            ssdp,
        }
    }
}

/// Probes every host, at most `workers` at a time.
///
/// A new host starts as soon as any running probe finishes. Output order
/// follows the first appearance of each address in `hosts`; a repeated
/// address is probed once with its last entry. Cancellation is honoured
/// before every spawn and while waiting; a probe task that panics leaves its
/// host with an empty result instead of dropping it.
pub async fn probe_all(
    prober: Arc<dyn HostProber>,
    hosts: Vec<DiscoveredHost>,
    workers: usize,
    cancel: &CancellationToken,
) -> Result<Vec<(DiscoveredHost, ProbeResult)>, ScanError> {
    let hosts = unique_by_ip(hosts);
    let mut results: Vec<Option<ProbeResult>> = vec![None; hosts.len()];
    let mut pending = hosts.iter().cloned().enumerate();
    let mut tasks = JoinSet::new();

    loop {
        while tasks.len() < workers.max(1) {
            if cancel.is_cancelled() {
                tasks.abort_all();
                return Err(ScanError::Cancelled);
            }
            let Some((idx, host)) = pending.next() else {
                break;
            };
            let prober = Arc::clone(&prober);
            tasks.spawn(async move { (idx, prober.probe(&host).await) });
        }

        tokio::select! {
            _ = cancel.cancelled() => {
                tasks.abort_all();
                return Err(ScanError::Cancelled);
            }
            joined = tasks.join_next() => match joined {
                Some(Ok((idx, result))) => results[idx] = Some(result),
                Some(Err(e)) => warn!("probe task failed: {e}"),
                None => break,
            }
        }
    }

    Ok(hosts
        .into_iter()
        .zip(results)
        .map(|(host, result)| (host, result.unwrap_or_default()))
        .collect())
}

fn unique_by_ip(hosts: Vec<DiscoveredHost>) -> Vec<DiscoveredHost> {
    let mut position: HashMap<Ipv4Addr, usize> = HashMap::with_capacity(hosts.len());
    let mut unique: Vec<DiscoveredHost> = Vec::with_capacity(hosts.len());
    for host in hosts {
        match position.get(&host.ip) {
            Some(&idx) => {
                debug!("{} listed twice, probing its last entry", host.ip);
                unique[idx] = host;
            }
            None => {
                position.insert(host.ip, unique.len());
                unique.push(host);
            }
        }
    }
    unique
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
