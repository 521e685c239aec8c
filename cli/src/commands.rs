pub mod scan;

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser};
use netmap_common::config::{DEFAULT_WORKERS, ScanConfig};
use netmap_common::error::ConfigError;
use netmap_common::heuristics::HeuristicTable;
use netmap_common::snapshot::DEFAULT_SNAPSHOT_FILE;
use tracing::warn;

#[derive(Parser, Debug)]
#[command(name = "netmap", version)]
#[command(about = "Discovers and classifies the devices of the local network.")]
pub struct CommandLine {
    /// Ping, port-probe and SSDP-query every host, then classify it
    #[arg(short, long)]
    pub deep: bool,

    /// Hosts probed at the same time (deep scans only) [default: 12]
    #[arg(short, long, allow_negative_numbers = true)]
    pub workers: Option<i64>,

    /// Interface to scan from instead of the default route's
    #[arg(short, long, value_name = "NAME")]
    pub iface: Option<String>,

    /// Where the JSON snapshot is written
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_SNAPSHOT_FILE)]
    pub output: PathBuf,

    /// TOML file overriding the classification tables
    #[arg(long, value_name = "PATH")]
    pub heuristics: Option<PathBuf>,

    /// Seconds to wait for ARP replies per round
    #[arg(short, long, value_name = "SECS", default_value = "3", value_parser = parse_secs)]
    pub timeout: Duration,

    /// Extra ARP rounds while nobody answers
    #[arg(short, long, default_value_t = 1)]
    pub retries: u32,

    /// More output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only warnings, errors and the results table
    #[arg(short, long)]
    pub quiet: bool,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn to_config(&self) -> Result<ScanConfig, ConfigError> {
        let workers = match (self.deep, self.workers) {
            (true, Some(n)) if n < 1 => return Err(ConfigError::InvalidWorkerCount(n)),
            (true, Some(n)) => usize::try_from(n).map_err(|_| ConfigError::InvalidWorkerCount(n))?,
            (false, Some(_)) => {
                warn!("--workers only applies to --deep scans, ignoring it");
                DEFAULT_WORKERS
            }
            (_, None) => DEFAULT_WORKERS,
        };

        let heuristics = match &self.heuristics {
            Some(path) => HeuristicTable::load(path)?,
            None => HeuristicTable::default(),
        };

        let cfg = ScanConfig {
            interface: self.iface.clone(),
            deep: self.deep,
            workers,
            arp_timeout: self.timeout,
            arp_retries: self.retries,
            heuristics,
            ..Default::default()
        };
        cfg.validate()?;
        Ok(cfg)
    }
}

fn parse_secs(raw: &str) -> Result<Duration, String> {
    let secs: f64 = raw.parse().map_err(|_| format!("`{raw}` is not a number of seconds"))?;
    if !(secs > 0.0) {
        return Err("timeout must be greater than zero".to_string());
    }
    Duration::try_from_secs_f64(secs).map_err(|e| e.to_string())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
