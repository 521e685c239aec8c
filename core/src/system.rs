//! OS-facing half of topology resolution.
//!
//! Everything that shells out or reads kernel state lives behind
//! [`TopologyProvider`]. A provider never fails: a missing command or
//! unparsable output simply means "no routes".

use std::net::Ipv4Addr;
use std::process::Command;

use pnet::datalink::{self, NetworkInterface};
use tracing::debug;

/// One default route as reported by the OS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultRoute {
    pub gateway: Option<Ipv4Addr>,
    pub device: String,
    pub metric: u32,
}

pub trait TopologyProvider: Send + Sync {
    fn interfaces(&self) -> Vec<NetworkInterface>;
    fn default_routes(&self) -> Vec<DefaultRoute>;
}

pub struct SystemTopology;

impl TopologyProvider for SystemTopology {
    fn interfaces(&self) -> Vec<NetworkInterface> {
        datalink::interfaces()
    }

    fn default_routes(&self) -> Vec<DefaultRoute> {
        #[cfg(target_os = "linux")]
        {
            run("ip", &["-4", "route", "show", "default"])
                .map(|out| parse_ip_route(&out))
                .unwrap_or_default()
        }
        #[cfg(target_os = "macos")]
        {
            run("route", &["-n", "get", "default"])
                .and_then(|out| parse_bsd_route(&out))
                .into_iter()
                .collect()
        }
        #[cfg(not(any(target_os = "linux", target_os = "macos")))]
        {
            Vec::new()
        }
    }
}

#[allow(dead_code)]
fn run(program: &str, args: &[&str]) -> Option<String> {
    match Command::new(program).args(args).output() {
        Ok(output) if output.status.success() => {
            Some(String::from_utf8_lossy(&output.stdout).into_owned())
        }
        Ok(output) => {
            debug!("{program} exited with {}", output.status);
            None
        }
        Err(e) => {
            debug!("failed to run {program}: {e}");
            None
        }
    }
}

/// Parses `ip -4 route show default`.
///
/// ```text
/// default via 192.168.1.1 dev wlan0 proto dhcp metric 600
/// default dev ppp0 scope link
/// ```
pub fn parse_ip_route(output: &str) -> Vec<DefaultRoute> {
    output
        .lines()
        .filter_map(|line| {
            let mut tokens = line.split_whitespace();
            if tokens.next()? != "default" {
                return None;
            }
            let mut gateway = None;
            let mut device = None;
            let mut metric = 0;
            while let Some(key) = tokens.next() {
                match key {
                    "via" => gateway = tokens.next().and_then(|v| v.parse().ok()),
                    "dev" => device = tokens.next().map(str::to_string),
                    "metric" => metric = tokens.next().and_then(|v| v.parse().ok()).unwrap_or(0),
                    _ => {}
                }
            }
            Some(DefaultRoute {
                gateway,
                device: device?,
                metric,
            })
        })
        .collect()
}

/// Parses `route -n get default`.
pub fn parse_bsd_route(output: &str) -> Option<DefaultRoute> {
    let field = |name: &str| {
        output.lines().find_map(|line| {
            let (key, value) = line.split_once(':')?;
            (key.trim() == name).then(|| value.trim().to_string())
        })
    };
    Some(DefaultRoute {
        gateway: field("gateway").and_then(|gw| gw.parse().ok()),
        device: field("interface")?,
        metric: 0,
    })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
