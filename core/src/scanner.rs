//! Host discovery abstraction.
//!
//! High-level code depends on [`NetworkScanner`] only, so the ARP sweep in
//! [`local`] can be swapped for a canned host list in tests.

use std::time::Duration;

use async_trait::async_trait;
use netmap_common::error::DiscoveryError;
use netmap_common::network::host::DiscoveredHost;
use netmap_common::network::interface::InterfaceContext;

mod local;

pub use local::LocalScanner;

#[async_trait]
pub trait NetworkScanner: Send + Sync {
    /// Every host of `ctx.subnet` that answered, one entry per address.
    ///
    /// `timeout` bounds each round of listening; `retries` extra rounds are
    /// sent while nothing has answered yet. Vendors are left unresolved.
    async fn scan(
        &self,
        ctx: &InterfaceContext,
        timeout: Duration,
        retries: u32,
    ) -> Result<Vec<DiscoveredHost>, DiscoveryError>;
}
