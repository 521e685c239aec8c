use std::time::Duration;

use crate::error::ConfigError;
use crate::heuristics::HeuristicTable;

pub const DEFAULT_WORKERS: usize = 12;

#[derive(Debug)]
pub struct ScanConfig {
    /// Forces the scan onto this interface instead of the default route's.
    pub interface: Option<String>,
    /// Runs the per-host probes and the classifier.
    ///
    /// Without it a device's class is its vendor label.
    pub deep: bool,
    /// Hosts probed at the same time. Only read when `deep` is set.
    pub workers: usize,
    pub arp_timeout: Duration,
    /// Extra ARP broadcasts sent when a round gets no answer.
    pub arp_retries: u32,
    pub ping_timeout: Duration,
    pub connect_timeout: Duration,
    pub ssdp_window: Duration,
    pub heuristics: HeuristicTable,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            interface: None,
            deep: false,
            workers: DEFAULT_WORKERS,
            arp_timeout: Duration::from_secs(3),
            arp_retries: 1,
            ping_timeout: Duration::from_secs(1),
            connect_timeout: Duration::from_millis(500),
            ssdp_window: Duration::from_millis(800),
            heuristics: HeuristicTable::default(),
        }
    }
}

impl ScanConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.deep {
            return Ok(());
        }
        if self.workers < 1 {
            return Err(ConfigError::InvalidWorkerCount(self.workers as i64));
        }
        if self.heuristics.candidate_ports().is_empty() {
            return Err(ConfigError::NoPorts);
        }
        Ok(())
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
