use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

use netmap_common::config::ScanConfig;
use netmap_common::error::{ConfigError, ScanError, TopologyError};
use netmap_common::network::category::Category;
use netmap_common::network::mac::{RANDOM_MAC_VENDOR, UNKNOWN_VENDOR};
use netmap_common::snapshot::ScanSnapshot;
use netmap_core::discovery::DiscoveryService;
use netmap_core::probe::HostProber;
use netmap_core::scan::Scan;
use netmap_core::scanner::NetworkScanner;
use pnet::util::MacAddr;
use tokio_util::sync::CancellationToken;

use crate::fakes::{
    CannedScanner, FakeTopology, GATEWAY, PrefixRepo, StuckScanner, TableProber, burned_mac, ip,
};

const TPLINK: [u8; 3] = [0x50, 0xc7, 0xbf];
const HP: [u8; 3] = [0x3c, 0xd9, 0x2b];
const INTEL: [u8; 3] = [0x8c, 0x8d, 0x28];
const CISCO: [u8; 3] = [0x00, 0x1a, 0x2b];
const UNREGISTERED: [u8; 3] = [0x00, 0x99, 0x99];

fn repo() -> PrefixRepo {
    PrefixRepo(HashMap::from([
        (TPLINK, "TP-Link Technologies"),
        (HP, "HP Inc."),
        (INTEL, "Intel Corporate"),
        (CISCO, "Cisco Systems"),
    ]))
}

/// Gateway, printer, workstation, phone with a random MAC, a switch and an
/// unregistered box. Listed out of order on purpose.
fn office() -> Vec<(Ipv4Addr, MacAddr)> {
    vec![
        (ip(30), burned_mac(UNREGISTERED, 30)),
        (ip(10), burned_mac(INTEL, 10)),
        (ip(9), burned_mac(HP, 9)),
        (ip(1), burned_mac(TPLINK, 1)),
        (ip(20), MacAddr::new(0xda, 0x4f, 0x11, 0x22, 0x33, 0x20)),
        (ip(2), burned_mac(CISCO, 2)),
    ]
}

fn office_prober() -> TableProber {
    TableProber::default()
        .answer(ip(1), Some(64), &[80, 443])
        .answer(ip(9), Some(255), &[80, 9100])
        .answer(ip(10), Some(128), &[445])
        .answer(ip(20), Some(64), &[])
}

fn scan(config: ScanConfig, scanner: impl NetworkScanner + 'static, prober: impl HostProber + 'static) -> Scan {
    let discovery = DiscoveryService::new(Box::new(repo()), Box::new(scanner));
    Scan::new(config, Box::new(FakeTopology), discovery, Arc::new(prober))
}

fn deep(workers: usize) -> ScanConfig {
    ScanConfig {
        deep: true,
        workers,
        ..Default::default()
    }
}

fn classes(snapshot: &ScanSnapshot) -> Vec<(Ipv4Addr, String)> {
    snapshot
        .devices
        .iter()
        .map(|d| (d.ip, d.class.as_str().to_string()))
        .collect()
}

#[tokio::test]
async fn shallow_scan_reports_vendors_sorted_by_address() {
    let snapshot = scan(ScanConfig::default(), CannedScanner::new(&office()), TableProber::default())
        .run(&CancellationToken::new())
        .await
        .unwrap();

    assert!(!snapshot.meta.deep);
    let ips: Vec<Ipv4Addr> = snapshot.devices.iter().map(|d| d.ip).collect();
    assert_eq!(ips, vec![ip(1), ip(2), ip(9), ip(10), ip(20), ip(30)]);

    let by_ip: HashMap<Ipv4Addr, &str> =
        snapshot.devices.iter().map(|d| (d.ip, d.vendor.as_str())).collect();
    assert_eq!(by_ip[&ip(9)], "HP Inc.");
    assert_eq!(by_ip[&ip(20)], RANDOM_MAC_VENDOR);
    assert_eq!(by_ip[&ip(30)], UNKNOWN_VENDOR);

    for device in &snapshot.devices {
        assert_eq!(device.ttl, None);
        assert!(device.open_ports.is_empty());
        assert!(device.ssdp.is_empty());
        if device.ip != GATEWAY {
            assert_eq!(device.class.as_str(), device.vendor);
        }
    }
}

#[tokio::test]
async fn shallow_scan_still_marks_the_gateway() {
    let snapshot = scan(ScanConfig::default(), CannedScanner::new(&office()), TableProber::default())
        .run(&CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(snapshot.devices[0].ip, GATEWAY);
    assert_eq!(snapshot.devices[0].class.category(), Some(Category::Gateway));
    assert_eq!(snapshot.devices[0].vendor, "TP-Link Technologies");
}

#[tokio::test]
async fn deep_scan_classifies_every_device() {
    let snapshot = scan(deep(3), CannedScanner::new(&office()), office_prober())
        .run(&CancellationToken::new())
        .await
        .unwrap();

    assert!(snapshot.meta.deep);
    assert_eq!(
        classes(&snapshot),
        vec![
            (ip(1), Category::Gateway.label().to_string()),
            (ip(2), Category::PossibleInfrastructure.label().to_string()),
            (ip(9), Category::Printer.label().to_string()),
            (ip(10), Category::Workstation.label().to_string()),
            (ip(20), Category::Mobile.label().to_string()),
            (ip(30), Category::Unknown.label().to_string()),
        ]
    );

    let printer = &snapshot.devices[2];
    assert_eq!(printer.ttl, Some(255));
    assert_eq!(printer.open_ports, vec![80, 9100]);
}

#[tokio::test]
async fn ssdp_answer_promotes_network_gear() {
    let prober = office_prober().ssdp(ip(2), "HTTP/1.1 200 OK\r\nSERVER: IOS/15.2 UPnP/1.0\r\n\r\n");
    let snapshot = scan(deep(2), CannedScanner::new(&office()), prober)
        .run(&CancellationToken::new())
        .await
        .unwrap();

    let switch = &snapshot.devices[1];
    assert_eq!(switch.ip, ip(2));
    assert_eq!(switch.class.category(), Some(Category::Infrastructure));
    assert_eq!(switch.ssdp.len(), 1);
}

#[tokio::test]
async fn duplicate_replies_keep_the_last_one() {
    let replies = vec![
        (ip(9), burned_mac(HP, 9)),
        (ip(9), burned_mac(INTEL, 9)),
    ];
    let snapshot = scan(ScanConfig::default(), CannedScanner::new(&replies), TableProber::default())
        .run(&CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(snapshot.devices.len(), 1);
    assert_eq!(snapshot.devices[0].mac, burned_mac(INTEL, 9));
    assert_eq!(snapshot.devices[0].vendor, "Intel Corporate");
}

#[tokio::test]
async fn silent_network_gives_an_empty_snapshot() {
    for config in [ScanConfig::default(), deep(4)] {
        let expect_deep = config.deep;
        let snapshot = scan(config, CannedScanner::new(&[]), office_prober())
            .run(&CancellationToken::new())
            .await
            .unwrap();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.meta.deep, expect_deep);
    }
}

#[tokio::test]
async fn deep_scan_rejects_zero_workers() {
    let err = scan(deep(0), CannedScanner::new(&office()), office_prober())
        .run(&CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, ScanError::Config(ConfigError::InvalidWorkerCount(0))));
}

#[tokio::test]
async fn unknown_interface_stops_the_scan() {
    let config = ScanConfig {
        interface: Some("wlan7".to_string()),
        ..Default::default()
    };
    let err = scan(config, CannedScanner::new(&office()), TableProber::default())
        .run(&CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ScanError::Topology(TopologyError::InterfaceNotFound(name)) if name == "wlan7"
    ));
}

#[tokio::test]
async fn cancelled_before_discovery_finishes() {
    let cancel = CancellationToken::new();
    let scan = scan(ScanConfig::default(), StuckScanner, TableProber::default());

    let stopper = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        stopper.cancel();
    });

    let err = tokio::time::timeout(Duration::from_secs(5), scan.run(&cancel))
        .await
        .expect("scan ignored cancellation")
        .unwrap_err();
    assert!(matches!(err, ScanError::Cancelled));
}

#[tokio::test]
async fn cancelled_while_probing() {
    let prober = TableProber {
        delay: Duration::from_secs(30),
        ..office_prober()
    };
    let cancel = CancellationToken::new();
    let scan = scan(deep(2), CannedScanner::new(&office()), prober);

    let stopper = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        stopper.cancel();
    });

    let err = tokio::time::timeout(Duration::from_secs(5), scan.run(&cancel))
        .await
        .expect("probing ignored cancellation")
        .unwrap_err();
    assert!(matches!(err, ScanError::Cancelled));
}

#[tokio::test]
async fn snapshot_file_round_trips_and_is_replaced() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("netmap_results.json");

    let first = scan(deep(3), CannedScanner::new(&office()), office_prober())
        .run(&CancellationToken::new())
        .await?;
    first.write_to(&path)?;

    let raw: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    assert_eq!(raw["_meta"]["deep"], true);
    assert!(raw["_meta"]["ts"].as_f64().is_some_and(|ts| ts > 0.0));
    assert_eq!(raw["devices"][0]["ip"], "10.0.0.1");
    assert_eq!(raw["devices"][0]["mac"], "50:c7:bf:00:00:01");
    assert_eq!(raw["devices"][0]["class"], "Router (gateway)");
    assert_eq!(raw["devices"][5]["ttl"], serde_json::Value::Null);

    let reread = ScanSnapshot::read_from(&path)?;
    assert_eq!(reread.devices, first.devices);
    assert!(reread.meta.deep);

    let second = scan(ScanConfig::default(), CannedScanner::new(&[]), TableProber::default())
        .run(&CancellationToken::new())
        .await?;
    second.write_to(&path)?;
    let reread = ScanSnapshot::read_from(&path)?;
    assert!(reread.is_empty());
    assert!(!reread.meta.deep);
    Ok(())
}
