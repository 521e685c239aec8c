use std::sync::OnceLock;

use mac_oui::Oui;
use netmap_common::network::host::DiscoveredHost;
use netmap_common::network::mac::{RANDOM_MAC_VENDOR, UNKNOWN_VENDOR, is_locally_administered};
use pnet::util::MacAddr;
use tracing::warn;

/// Maps a hardware address to the organisation that registered its prefix.
pub trait VendorRepository: Send + Sync {
    fn get_vendor(&self, mac: MacAddr) -> Option<String>;
}

static OUI_DB: OnceLock<Option<Oui>> = OnceLock::new();

fn get_oui_db() -> Option<&'static Oui> {
    OUI_DB
        .get_or_init(|| match Oui::default() {
            Ok(db) => Some(db),
            Err(e) => {
                warn!("failed to load OUI database, vendors will be unknown: {e:?}");
                None
            }
        })
        .as_ref()
}

/// Lookups against the IEEE registry bundled with `mac_oui`.
pub struct MacOuiRepo;

impl VendorRepository for MacOuiRepo {
    fn get_vendor(&self, mac: MacAddr) -> Option<String> {
        let db = get_oui_db()?;
        let mac_str = mac.to_string();
        match db.lookup_by_mac(&mac_str) {
            Ok(Some(entry)) => Some(entry.company_name.clone()),
            _ => None,
        }
    }
}

/// Vendor label written for `mac`.
///
/// Falls back to the random-MAC label for locally administered addresses
/// and to `"Unknown"` for everything else the registry does not know.
pub fn vendor_label(repo: &dyn VendorRepository, mac: MacAddr) -> String {
    match repo.get_vendor(mac) {
        Some(vendor) if !vendor.trim().is_empty() => vendor,
        _ if is_locally_administered(mac) => RANDOM_MAC_VENDOR.to_string(),
        _ => UNKNOWN_VENDOR.to_string(),
    }
}

/// Labels every host in place.
pub fn annotate(repo: &dyn VendorRepository, hosts: &mut [DiscoveredHost]) {
    for host in hosts.iter_mut() {
        host.vendor = vendor_label(repo, host.mac);
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
    use std::collections::HashMap;

    struct StaticRepo(HashMap<MacAddr, String>);

    impl VendorRepository for StaticRepo {
        fn get_vendor(&self, mac: MacAddr) -> Option<String> {
            self.0.get(&mac).cloned()
        }
    }

    #[test]
    fn registered_prefix_keeps_vendor() {
        let mac = MacAddr::new(0x00, 0x1b, 0x63, 0x84, 0x45, 0xe6);
        let repo = StaticRepo(HashMap::from([(mac, "Apple, Inc.".to_string())]));
        assert_eq!(vendor_label(&repo, mac), "Apple, Inc.");
    }

    #[test]
    fn unregistered_global_mac_is_unknown() {
        let repo = StaticRepo(HashMap::new());
        let mac = MacAddr::new(0x00, 0x11, 0x22, 0x33, 0x44, 0x55);
        assert_eq!(vendor_label(&repo, mac), UNKNOWN_VENDOR);
    }

    #[test]
    fn unregistered_local_mac_is_random() {
        let repo = StaticRepo(HashMap::new());
        let mac = MacAddr::new(0xda, 0xa1, 0x19, 0x00, 0x00, 0x01);
        assert_eq!(vendor_label(&repo, mac), RANDOM_MAC_VENDOR);
    }

    #[test]
    fn blank_vendor_counts_as_missing() {
        let mac = MacAddr::new(0x02, 0, 0, 0, 0, 1);
        let repo = StaticRepo(HashMap::from([(mac, "  ".to_string())]));
        assert_eq!(vendor_label(&repo, mac), RANDOM_MAC_VENDOR);
    }

    #[test]
    fn annotate_overwrites_placeholder() {
        let mac = MacAddr::new(0x00, 0x1b, 0x63, 0x84, 0x45, 0xe6);
        let repo = StaticRepo(HashMap::from([(mac, "Apple, Inc.".to_string())]));
        let mut hosts = vec![
            DiscoveredHost::new(std::net::Ipv4Addr::new(10, 0, 0, 2), mac),
            DiscoveredHost::new(std::net::Ipv4Addr::new(10, 0, 0, 3), MacAddr::new(0x06, 0, 0, 0, 0, 1)),
        ];
        annotate(&repo, &mut hosts);
        assert_eq!(hosts[0].vendor, "Apple, Inc.");
        assert_eq!(hosts[1].vendor, RANDOM_MAC_VENDOR);
    }

    #[test]
    #[ignore]
    fn bundled_registry_knows_well_known_prefix() {
        let mac = MacAddr::new(0x00, 0x1b, 0x63, 0x00, 0x00, 0x00);
        assert!(MacOuiRepo.get_vendor(mac).is_some());
    }
}
