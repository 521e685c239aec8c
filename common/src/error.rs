//! Error taxonomy of a scan.
//!
//! Only failures that make the whole scan meaningless are represented here.
//! A single probe failing is not an error: probes report absence through
//! `Option` and empty collections instead.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("--workers must be an integer >= 1 when --deep is used (got {0})")]
    InvalidWorkerCount(i64),

    #[error("port list is empty")]
    NoPorts,

    #[error("failed to read heuristics file {path}: {source}")]
    HeuristicsIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid heuristics file {path}: {source}")]
    HeuristicsParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TopologyError {
    #[error("no usable network interface found; pass --iface explicitly")]
    NoInterface,

    #[error("interface {0} does not exist")]
    InterfaceNotFound(String),

    #[error("interface {0} has no IPv4 address assigned")]
    NoIpv4Address(String),

    #[error("interface {0} has no hardware address")]
    NoMacAddress(String),
}

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("failed to open datalink channel on {interface}: {source}")]
    ChannelOpen {
        interface: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{0} does not provide an ethernet channel")]
    UnsupportedChannel(String),

    #[error("failed to send ARP request on {interface}: {source}")]
    Send {
        interface: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to build ARP request: {0}")]
    Packet(String),

    #[error("discovery task failed: {0}")]
    Task(String),
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Fatal outcome of a scan.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error("scan cancelled")]
    Cancelled,
}
