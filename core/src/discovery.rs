//! # Network Discovery Service
//!
//! Finds the devices of the local segment and names their manufacturers.

use std::time::Duration;

use netmap_common::error::DiscoveryError;
use netmap_common::network::host::DiscoveredHost;
use netmap_common::network::interface::InterfaceContext;
use tracing::debug;

use crate::scanner::NetworkScanner;
use crate::vendors::{self, VendorRepository};

/// Application Service for Network Discovery.
///
/// Orchestrates the discovery process by:
/// 1. delegating the sweep to the [`NetworkScanner`] trait.
/// 2. enriching the results with vendor names.
pub struct DiscoveryService {
    vendor_repo: Box<dyn VendorRepository>,
    scanner: Box<dyn NetworkScanner>,
}

impl DiscoveryService {
    pub fn new(vendor_repo: Box<dyn VendorRepository>, scanner: Box<dyn NetworkScanner>) -> Self {
        Self {
            vendor_repo,
            scanner,
        }
    }

    pub async fn perform_discovery(
        &self,
        ctx: &InterfaceContext,
        timeout: Duration,
        retries: u32,
    ) -> Result<Vec<DiscoveredHost>, DiscoveryError> {
        let mut hosts = self.scanner.scan(ctx, timeout, retries).await?;
        debug!("{} hosts answered on {}", hosts.len(), ctx.name());
        vendors::annotate(self.vendor_repo.as_ref(), &mut hosts);
        Ok(hosts)
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
    use async_trait::async_trait;
    use netmap_common::network::mac::{RANDOM_MAC_VENDOR, UNKNOWN_VENDOR};
    use pnet::datalink::dummy;
    use pnet::ipnetwork::Ipv4Network;
    use pnet::util::MacAddr;
    use std::net::Ipv4Addr;

    struct CannedScanner(Vec<DiscoveredHost>);

    #[async_trait]
    impl NetworkScanner for CannedScanner {
        async fn scan(
            &self,
            _ctx: &InterfaceContext,
            _timeout: Duration,
            _retries: u32,
        ) -> Result<Vec<DiscoveredHost>, DiscoveryError> {
            Ok(self.0.clone())
        }
    }

    struct PrefixRepo;

    impl VendorRepository for PrefixRepo {
        fn get_vendor(&self, mac: MacAddr) -> Option<String> {
            (mac.0 == 0x00 && mac.1 == 0x1b && mac.2 == 0x63).then(|| "Apple, Inc.".to_string())
        }
    }

    fn ctx() -> InterfaceContext {
        InterfaceContext {
            interface: dummy::dummy_interface(0),
            mac: MacAddr::new(0x02, 0, 0, 0, 0, 1),
            address: Ipv4Addr::new(10, 0, 0, 5),
            subnet: Ipv4Network::new(Ipv4Addr::new(10, 0, 0, 0), 24).unwrap(),
            gateway: None,
        }
    }

    #[tokio::test]
    async fn perform_discovery_labels_every_host() {
        let scanner = CannedScanner(vec![
            DiscoveredHost::new(Ipv4Addr::new(10, 0, 0, 2), MacAddr::new(0x00, 0x1b, 0x63, 1, 2, 3)),
            DiscoveredHost::new(Ipv4Addr::new(10, 0, 0, 3), MacAddr::new(0x00, 0x50, 0x56, 1, 2, 3)),
            DiscoveredHost::new(Ipv4Addr::new(10, 0, 0, 4), MacAddr::new(0x7a, 0x50, 0x56, 1, 2, 3)),
        ]);
        let service = DiscoveryService::new(Box::new(PrefixRepo), Box::new(scanner));

        let hosts = service
            .perform_discovery(&ctx(), Duration::from_secs(1), 0)
            .await
            .unwrap();

        let vendors: Vec<&str> = hosts.iter().map(|h| h.vendor.as_str()).collect();
        assert_eq!(vendors, vec!["Apple, Inc.", UNKNOWN_VENDOR, RANDOM_MAC_VENDOR]);
    }
}
