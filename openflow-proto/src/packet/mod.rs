//! Ethernet/IP/ARP packet codec (spec §4.2).
//!
//! This is a standalone sub-codec from the OpenFlow message codec: `PacketIn`
//! carries the captured frame as opaque bytes, and callers that want to
//! inspect or construct the Ethernet/IP/ARP payload go through the functions
//! here. Decode-only for IP/TCP/UDP (see `ip.rs` for the documented
//! asymmetry); PaneDP and ARP are the bodies the core must also encode.

pub mod arp;
pub mod ethernet;
pub mod ip;
pub mod panedp;

pub use arp::ArpPacket;
pub use ethernet::{decode_ethernet, EthBody, EthHeader, EthernetFrame, MacAddr};
pub use ip::{IpBody, IpHeader, IpPacket, TcpHeader, UdpHeader};
pub use panedp::PaneDpFrame;

/// Project a decoded frame onto its IP header, if the body is IP.
pub fn as_ip<'a>(frame: &'a EthernetFrame<'a>) -> Option<(&'a EthHeader, &'a IpPacket<'a>)> {
    match &frame.body {
        EthBody::Ip(ip) => Some((&frame.header, ip)),
        _ => None,
    }
}

/// Project a decoded frame onto its IP and TCP headers, if the body is
/// IP-over-TCP.
pub fn as_ip_tcp<'a>(
    frame: &'a EthernetFrame<'a>,
) -> Option<(&'a EthHeader, &'a IpHeader<'a>, &'a TcpHeader)> {
    let (eth, ip) = as_ip(frame)?;
    match &ip.body {
        IpBody::Tcp(tcp, _payload) => Some((eth, &ip.header, tcp)),
        _ => None,
    }
}
