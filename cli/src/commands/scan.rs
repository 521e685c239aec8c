use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Context;
use colored::*;
use netmap_common::config::ScanConfig;
use netmap_common::error::ScanError;
use netmap_common::network::interface::InterfaceContext;
use netmap_common::snapshot::ScanSnapshot;
use netmap_core::scan::Scan;
use netmap_protocols::ssdp;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::mprint;
use crate::terminal::print::{self, GLOBAL_KEY_WIDTH};
use crate::terminal::{colors, format, spinner};

/// Exit status after Ctrl-C, as shells report SIGINT.
const EXIT_INTERRUPTED: i32 = 130;

pub async fn scan(cfg: ScanConfig, output: &Path, quiet: bool) -> anyhow::Result<()> {
    if !is_root::is_root() {
        warn!("Not running as root: the ARP sweep and ICMP probes need raw socket access");
    }

    let scan = Scan::system(cfg);
    let ctx = scan.resolve_topology()?;
    print_context(&ctx, scan.config(), quiet);

    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, stopping the scan");
                cancel.cancel();
            }
        }
    });

    spinner::report_stage(&format!("Scanning {}", ctx.subnet));
    let start_time = Instant::now();
    let result = scan.run_on(&ctx, &cancel).await;
    spinner::get_spinner().finish_and_clear();

    let snapshot = match result {
        Ok(snapshot) => snapshot,
        Err(ScanError::Cancelled) => {
            warn!("Scan cancelled, {} left untouched", output.display());
            std::process::exit(EXIT_INTERRUPTED);
        }
        Err(e) => return Err(e.into()),
    };

    snapshot
        .write_to(output)
        .with_context(|| format!("failed to write {}", output.display()))?;

    scan_ends(&snapshot, start_time.elapsed(), quiet);
    info!("Results saved to {}", output.display());
    Ok(())
}

fn print_context(ctx: &InterfaceContext, cfg: &ScanConfig, quiet: bool) {
    if quiet {
        return;
    }
    print::header("scan setup", quiet);
    GLOBAL_KEY_WIDTH.set(9);
    print::aligned_line("Interface", ctx.name());
    print::aligned_line("Address", ctx.address.to_string().color(colors::IPV4_ADDR));
    print::aligned_line("Subnet", ctx.subnet.to_string().color(colors::IPV4_PREFIX));
    let gateway = match ctx.gateway {
        Some(gw) => gw.to_string().color(colors::IPV4_ADDR),
        None => "none".dimmed(),
    };
    print::aligned_line("Gateway", gateway);
    let mode = if cfg.deep {
        format!("deep ({} workers)", cfg.workers)
    } else {
        "shallow".to_string()
    };
    print::aligned_line("Mode", mode.color(colors::ACCENT));
    mprint!();
}

fn scan_ends(snapshot: &ScanSnapshot, total_time: Duration, quiet: bool) {
    if snapshot.is_empty() {
        print::header("zero devices detected", quiet);
        print::no_results(quiet);
        return;
    }

    print::header("devices found", quiet);
    for line in format::render_table(snapshot) {
        print::print(&line);
    }
    log_ssdp_servers(snapshot);

    let devices: ColoredString = format!("{} devices", snapshot.devices.len()).bold().green();
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let summary = format!("Scan Complete: {devices} identified in {total_time}");
    if quiet {
        print::print(&summary);
    } else {
        print::fat_separator();
        print::centerln(&summary);
    }
}

fn log_ssdp_servers(snapshot: &ScanSnapshot) {
    for device in &snapshot.devices {
        for response in &device.ssdp {
            if let Some(server) = ssdp::header(response, "SERVER") {
                debug!("{} announces {server}", device.ip);
            }
        }
    }
}
