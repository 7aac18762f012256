use std::fmt;

use crate::byteio::{pack_tci, unpack_tci, Reader, Writer};
use crate::error::{ProtoError, Result};

use super::arp::{self, ArpPacket};
use super::ip::{self, IpPacket};
use super::panedp::{self, PaneDpFrame};

pub const ETHERTYPE_IPV4: u16 = 0x0800;
pub const ETHERTYPE_ARP: u16 = 0x0806;
pub const ETHERTYPE_DOT1Q: u16 = 0x8100;
pub const ETHERTYPE_PANEDP: u16 = 0x0777;
pub const ETHERTYPE_IPV6: u16 = 0x86DD;
pub const ETHERTYPE_DOT1X: u16 = 0x888E;

/// Ethertype values at or below this are length fields of an Ethernet I
/// frame, not an Ethernet II ethertype, and are rejected (spec §4.2, §8).
const MIN_ETHERTYPE: u16 = 0x0600;

const IPV6_HEADER_LEN: usize = 40;
const DOT1X_HEADER_LEN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacAddr(pub [u8; 6]);

impl MacAddr {
    pub const BROADCAST: MacAddr = MacAddr([0xFF; 6]);

    pub fn read(r: &mut Reader) -> Result<MacAddr> {
        Ok(MacAddr(r.read_array()?))
    }

    pub fn write(&self, w: &mut Writer) {
        w.write_bytes(&self.0);
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, f0] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{f0:02x}")
    }
}

/// Ethernet header, either untagged or with a single 802.1Q tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EthHeader {
    Plain { dst: MacAddr, src: MacAddr, ethertype: u16 },
    Dot1Q { dst: MacAddr, src: MacAddr, priority: u8, cfi: bool, vlan_id: u16, ethertype: u16 },
}

impl EthHeader {
    pub fn dst(&self) -> MacAddr {
        match self {
            EthHeader::Plain { dst, .. } | EthHeader::Dot1Q { dst, .. } => *dst,
        }
    }

    pub fn src(&self) -> MacAddr {
        match self {
            EthHeader::Plain { src, .. } | EthHeader::Dot1Q { src, .. } => *src,
        }
    }

    pub fn ethertype(&self) -> u16 {
        match self {
            EthHeader::Plain { ethertype, .. } | EthHeader::Dot1Q { ethertype, .. } => *ethertype,
        }
    }

    fn write(&self, w: &mut Writer) {
        match self {
            EthHeader::Plain { dst, src, ethertype } => {
                dst.write(w);
                src.write(w);
                w.write_u16(*ethertype);
            }
            EthHeader::Dot1Q { dst, src, priority, cfi, vlan_id, ethertype } => {
                dst.write(w);
                src.write(w);
                w.write_u16(ETHERTYPE_DOT1Q);
                w.write_u16(pack_tci(*priority, *cfi, *vlan_id));
                w.write_u16(*ethertype);
            }
        }
    }
}

/// The decoded payload of an Ethernet frame.
#[derive(Debug)]
pub enum EthBody<'a> {
    Ip(IpPacket<'a>),
    Arp(ArpPacket),
    PaneDp(PaneDpFrame),
    /// IPv6 or 802.1X payload: the fixed leading header was consumed to
    /// reach this point, but the remainder is uninterpreted per spec §4.2.
    Opaque(&'a [u8]),
}

#[derive(Debug)]
pub struct EthernetFrame<'a> {
    pub header: EthHeader,
    pub body: EthBody<'a>,
}

/// Decode an Ethernet II frame (optionally 802.1Q-tagged) and dispatch its
/// body by ethertype, per spec §4.2.
pub fn decode_ethernet(bytes: &[u8]) -> Result<EthernetFrame<'_>> {
    let mut r = Reader::new(bytes);
    let dst = MacAddr::read(&mut r)?;
    let src = MacAddr::read(&mut r)?;
    let mut ethertype = r.read_u16()?;

    let header = if ethertype == ETHERTYPE_DOT1Q {
        let tci = r.read_u16()?;
        let (priority, cfi, vlan_id) = unpack_tci(tci);
        ethertype = r.read_u16()?;
        EthHeader::Dot1Q { dst, src, priority, cfi, vlan_id, ethertype }
    } else {
        EthHeader::Plain { dst, src, ethertype }
    };

    if ethertype < MIN_ETHERTYPE {
        return Err(ProtoError::UnknownEtherType(ethertype));
    }

    let body = match ethertype {
        ETHERTYPE_IPV4 => EthBody::Ip(ip::decode_ip(r.rest())?),
        ETHERTYPE_ARP => EthBody::Arp(arp::decode_arp(&mut Reader::new(r.rest()))?),
        ETHERTYPE_PANEDP => EthBody::PaneDp(panedp::decode_panedp(&mut Reader::new(r.rest()))?),
        ETHERTYPE_IPV6 => {
            let mut body_r = Reader::new(r.rest());
            body_r.skip(IPV6_HEADER_LEN)?;
            EthBody::Opaque(body_r.rest())
        }
        ETHERTYPE_DOT1X => {
            let mut body_r = Reader::new(r.rest());
            body_r.skip(DOT1X_HEADER_LEN)?;
            EthBody::Opaque(body_r.rest())
        }
        other => return Err(ProtoError::UnknownEtherType(other)),
    };

    Ok(EthernetFrame { header, body })
}

/// Encode a PaneDP discovery frame. This is the only body variant the core
/// must serialize today (spec §4.2); IP/ARP encode happens through the
/// dedicated ARP constructors and `PacketOut` pass-through, never here.
pub fn encode_panedp_frame(header: &EthHeader, frame: &PaneDpFrame) -> Vec<u8> {
    let mut w = Writer::with_capacity(14 + 10);
    header.write(&mut w);
    panedp::encode_panedp(frame, &mut w);
    w.into_vec()
}
