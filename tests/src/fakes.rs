use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::time::Duration;

use async_trait::async_trait;
use netmap_common::error::DiscoveryError;
use netmap_common::network::host::{DiscoveredHost, ProbeResult};
use netmap_common::network::interface::InterfaceContext;
use netmap_core::probe::HostProber;
use netmap_core::scanner::NetworkScanner;
use netmap_core::system::{DefaultRoute, TopologyProvider};
use netmap_core::vendors::VendorRepository;
use pnet::datalink::NetworkInterface;
use pnet::ipnetwork::{IpNetwork, Ipv4Network};
use pnet::util::MacAddr;

pub const GATEWAY: Ipv4Addr = Ipv4Addr::new(10, 0, 0, 1);
pub const LOCAL: Ipv4Addr = Ipv4Addr::new(10, 0, 0, 5);

pub fn ip(last: u8) -> Ipv4Addr {
    Ipv4Addr::new(10, 0, 0, last)
}

/// Globally administered address whose last octet mirrors the host's.
pub fn burned_mac(oui: [u8; 3], last: u8) -> MacAddr {
    MacAddr::new(oui[0], oui[1], oui[2], 0, 0, last)
}

/// One wired interface on 10.0.0.0/24 behind 10.0.0.1.
pub struct FakeTopology;

impl TopologyProvider for FakeTopology {
    fn interfaces(&self) -> Vec<NetworkInterface> {
        vec![NetworkInterface {
            name: "eth0".to_string(),
            description: String::new(),
            index: 2,
            mac: Some(MacAddr::new(0x00, 0x16, 0x3e, 0x00, 0x00, 0x05)),
            ips: vec![IpNetwork::V4(Ipv4Network::new(LOCAL, 24).unwrap())],
            flags: 0,
        }]
    }

    fn default_routes(&self) -> Vec<DefaultRoute> {
        vec![DefaultRoute {
            gateway: Some(GATEWAY),
            device: "eth0".to_string(),
            metric: 100,
        }]
    }
}

/// Vendor registry keyed by the first three octets.
pub struct PrefixRepo(pub HashMap<[u8; 3], &'static str>);

impl VendorRepository for PrefixRepo {
    fn get_vendor(&self, mac: MacAddr) -> Option<String> {
        self.0.get(&[mac.0, mac.1, mac.2]).map(|v| v.to_string())
    }
}

/// Answers every sweep with the same hosts, duplicates included.
pub struct CannedScanner {
    pub hosts: Vec<DiscoveredHost>,
}

impl CannedScanner {
    pub fn new(replies: &[(Ipv4Addr, MacAddr)]) -> Self {
        Self {
            hosts: replies.iter().map(|(ip, mac)| DiscoveredHost::new(*ip, *mac)).collect(),
        }
    }
}

#[async_trait]
impl NetworkScanner for CannedScanner {
    async fn scan(
        &self,
        _ctx: &InterfaceContext,
        _timeout: Duration,
        _retries: u32,
    ) -> Result<Vec<DiscoveredHost>, DiscoveryError> {
        Ok(self.hosts.clone())
    }
}

/// A sweep that never finishes.
pub struct StuckScanner;

#[async_trait]
impl NetworkScanner for StuckScanner {
    async fn scan(
        &self,
        _ctx: &InterfaceContext,
        _timeout: Duration,
        _retries: u32,
    ) -> Result<Vec<DiscoveredHost>, DiscoveryError> {
        std::future::pending().await
    }
}

/// Replays prepared probe results; unknown hosts get an empty one.
#[derive(Default)]
pub struct TableProber {
    pub answers: HashMap<Ipv4Addr, ProbeResult>,
    pub delay: Duration,
}

impl TableProber {
    pub fn answer(mut self, ip: Ipv4Addr, ttl: Option<u8>, ports: &[u16]) -> Self {
        self.answers.insert(
            ip,
            ProbeResult {
                ttl,
                open_ports: ports.iter().copied().collect(),
                ssdp: vec![],
            },
        );
        self
    }

    pub fn ssdp(mut self, ip: Ipv4Addr, response: &str) -> Self {
        self.answers.entry(ip).or_default().ssdp.push(response.to_string());
        self
    }
}

#[async_trait]
impl HostProber for TableProber {
    async fn probe(&self, host: &DiscoveredHost) -> ProbeResult {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.answers.get(&host.ip).cloned().unwrap_or_default()
    }
}
