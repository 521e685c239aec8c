//! End-to-end scan: topology, discovery, optional probing, snapshot.

use std::sync::Arc;

use netmap_common::config::ScanConfig;
use netmap_common::error::{ScanError, TopologyError};
use netmap_common::network::interface::InterfaceContext;
use netmap_common::snapshot::ScanSnapshot;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::aggregate;
use crate::discovery::DiscoveryService;
use crate::probe::{self, HostProber, NetworkProber};
use crate::scanner::LocalScanner;
use crate::system::{SystemTopology, TopologyProvider};
use crate::topology;
use crate::vendors::MacOuiRepo;

pub struct Scan {
    config: ScanConfig,
    topology: Box<dyn TopologyProvider>,
    discovery: DiscoveryService,
    prober: Arc<dyn HostProber>,
}

impl Scan {
    pub fn new(
        config: ScanConfig,
        topology: Box<dyn TopologyProvider>,
        discovery: DiscoveryService,
        prober: Arc<dyn HostProber>,
    ) -> Self {
        Self {
            config,
            topology,
            discovery,
            prober,
        }
    }

    /// Wired to the real network: OS routes, raw ARP, bundled OUI registry.
    pub fn system(config: ScanConfig) -> Self {
        let prober = Arc::new(NetworkProber::from_config(&config));
        let discovery = DiscoveryService::new(Box::new(MacOuiRepo), Box::new(LocalScanner));
        Self::new(config, Box::new(SystemTopology), discovery, prober)
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn resolve_topology(&self) -> Result<InterfaceContext, TopologyError> {
        topology::resolve(self.topology.as_ref(), self.config.interface.as_deref())
    }

    pub async fn run(&self, cancel: &CancellationToken) -> Result<ScanSnapshot, ScanError> {
        self.config.validate()?;
        let ctx = self.resolve_topology()?;
        self.run_on(&ctx, cancel).await
    }

    /// Runs discovery and, for deep scans, probing on an already resolved context.
    pub async fn run_on(
        &self,
        ctx: &InterfaceContext,
        cancel: &CancellationToken,
    ) -> Result<ScanSnapshot, ScanError> {
        let cfg = &self.config;
        info!("Scanning {} on {} ({})", ctx.subnet, ctx.name(), ctx.address);

        let hosts = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ScanError::Cancelled),
            found = self.discovery.perform_discovery(ctx, cfg.arp_timeout, cfg.arp_retries) => found?,
        };

        if hosts.is_empty() {
            warn!("No hosts answered on {}", ctx.subnet);
            return Ok(aggregate::aggregate(Vec::new(), ctx.gateway, cfg.deep));
        }
        info!("Discovered {} hosts", hosts.len());

        let records = if cfg.deep {
            info!("Probing {} hosts with {} workers", hosts.len(), cfg.workers);
            let probed = probe::probe_all(Arc::clone(&self.prober), hosts, cfg.workers, cancel).await?;
            aggregate::classified_records(&cfg.heuristics, ctx.gateway, probed)
        } else {
            aggregate::shallow_records(hosts)
        };

        Ok(aggregate::aggregate(records, ctx.gateway, cfg.deep))
    }
}
