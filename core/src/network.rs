pub mod channel;
pub mod icmp;
pub mod ssdp;
pub mod tcp;
