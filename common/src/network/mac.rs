use pnet::util::MacAddr;

/// Mask of the U/L bit in the first octet of a hardware address.
const LOCALLY_ADMINISTERED: u8 = 0b0000_0010;

/// Vendor label given to randomised addresses that have no OUI entry.
pub const RANDOM_MAC_VENDOR: &str = "MAC Aleatoria (posible móvil)";

pub const UNKNOWN_VENDOR: &str = "Unknown";

/// True when the address was assigned by software rather than burned in.
///
/// Modern phones randomise their address per network, so this is the
/// strongest mobile signal a passive observer gets.
pub fn is_locally_administered(mac: MacAddr) -> bool {
    mac.0 & LOCALLY_ADMINISTERED != 0
}

/// Serialises a [`MacAddr`] as its lowercase colon notation.
pub mod serde_str {
    use pnet::util::MacAddr;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(mac: &MacAddr, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(mac)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<MacAddr, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse::<MacAddr>().map_err(D::Error::custom)
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
