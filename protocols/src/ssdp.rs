use std::net::Ipv4Addr;

pub const SSDP_PORT: u16 = 1900;
pub const SSDP_MULTICAST_ADDR: Ipv4Addr = Ipv4Addr::new(239, 255, 255, 250);
pub const SEARCH_ALL: &str = "ssdp:all";

/// `M-SEARCH` request for search target `st`.
///
/// The HOST header always names the multicast group, even when the request
/// is sent unicast; many devices drop requests that say otherwise.
pub fn create_m_search(st: &str, mx: u8) -> Vec<u8> {
    [
        "M-SEARCH * HTTP/1.1".to_string(),
        format!("HOST:{SSDP_MULTICAST_ADDR}:{SSDP_PORT}"),
        "MAN:\"ssdp:discover\"".to_string(),
        format!("MX:{mx}"),
        format!("ST:{st}"),
        String::new(),
        String::new(),
    ]
    .join("\r\n")
    .into_bytes()
}

pub fn decode_response(payload: &[u8]) -> String {
    String::from_utf8_lossy(payload).into_owned()
}

/// Value of header `name` (case-insensitive) in an SSDP response.
pub fn header<'a>(response: &'a str, name: &str) -> Option<&'a str> {
    response.lines().skip(1).find_map(|line| {
        let (key, value) = line.split_once(':')?;
        key.trim()
            .eq_ignore_ascii_case(name)
            .then(|| value.trim())
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
