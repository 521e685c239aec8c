//! Wire formats spoken by the scanner.
//!
//! Builders return owned buffers ready to hand to a socket or datalink
//! channel; parsers take raw bytes and answer `None` for anything that is not
//! the packet they expect.

pub mod arp;
pub mod ethernet;
pub mod icmp;
pub mod ssdp;

pub const ETH_HDR_LEN: usize = 14;
pub const ARP_LEN: usize = 28;
pub const MIN_ETH_FRAME_NO_FCS: usize = 60;
pub const ICMP_ECHO_HDR_LEN: usize = 8;
pub const ICMP_ECHO_PAYLOAD_LEN: usize = 32;
