use std::net::Ipv4Addr;

use anyhow::Context;
use pnet::packet::Packet;
use pnet::packet::icmp::echo_reply::EchoReplyPacket;
use pnet::packet::icmp::echo_request::MutableEchoRequestPacket;
use pnet::packet::icmp::{self, IcmpCode, IcmpPacket, IcmpTypes};
use pnet::packet::ip::IpNextHeaderProtocols;
use pnet::packet::ipv4::Ipv4Packet;

use crate::{ICMP_ECHO_HDR_LEN, ICMP_ECHO_PAYLOAD_LEN};

/// ICMP echo request with a zeroed payload and a valid checksum.
pub fn create_echo_request(identifier: u16, sequence: u16) -> anyhow::Result<Vec<u8>> {
    let mut buffer = vec![0u8; ICMP_ECHO_HDR_LEN + ICMP_ECHO_PAYLOAD_LEN];
    {
        let mut echo = MutableEchoRequestPacket::new(&mut buffer)
            .context("failed to create echo request packet")?;
        echo.set_icmp_type(IcmpTypes::EchoRequest);
        echo.set_icmp_code(IcmpCode(0));
        echo.set_identifier(identifier);
        echo.set_sequence_number(sequence);
        echo.set_checksum(0);
    }
    let checksum = {
        let packet = IcmpPacket::new(&buffer).context("failed to view ICMP packet")?;
        icmp::checksum(&packet)
    };
    let mut echo = MutableEchoRequestPacket::new(&mut buffer)
        .context("failed to create echo request packet")?;
    echo.set_checksum(checksum);
    Ok(buffer)
}

/// TTL of an echo reply from `expected_src` answering `identifier`.
///
/// `datagram` is what a raw IPv4 ICMP socket hands back: the IPv4 header
/// followed by the ICMP message. Anything else yields `None`.
pub fn parse_echo_reply(datagram: &[u8], expected_src: Ipv4Addr, identifier: u16) -> Option<u8> {
    let ip = Ipv4Packet::new(datagram)?;
    if ip.get_next_level_protocol() != IpNextHeaderProtocols::Icmp {
        return None;
    }
    if ip.get_source() != expected_src {
        return None;
    }
    let reply = EchoReplyPacket::new(ip.payload())?;
    if reply.get_icmp_type() != IcmpTypes::EchoReply {
        return None;
    }
    if reply.get_identifier() != identifier {
        return None;
    }
    Some(ip.get_ttl())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
