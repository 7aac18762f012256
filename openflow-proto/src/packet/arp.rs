use crate::byteio::{Reader, Writer};
use crate::error::{ProtoError, Result};

use super::ethernet::MacAddr;

const HTYPE_ETHERNET: u16 = 1;
const PTYPE_IPV4: u16 = 0x0800;
const HLEN_ETHERNET: u8 = 6;
const PLEN_IPV4: u8 = 4;

pub const ARP_REQUEST: u16 = 1;
pub const ARP_REPLY: u16 = 2;

/// A decoded ARP packet (Ethernet/IPv4 only; spec §4.2 scopes out other
/// hardware/protocol address families).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArpPacket {
    pub opcode: u16,
    pub sender_mac: MacAddr,
    pub sender_ip: [u8; 4],
    pub target_mac: MacAddr,
    pub target_ip: [u8; 4],
}

/// Decode an ARP packet body. Opcodes other than request (1) and reply (2)
/// are surfaced as `InvalidEnum` rather than silently discarded.
pub fn decode_arp(r: &mut Reader) -> Result<ArpPacket> {
    let htype = r.read_u16()?;
    let ptype = r.read_u16()?;
    let hlen = r.read_u8()?;
    let plen = r.read_u8()?;
    let opcode = r.read_u16()?;

    if htype != HTYPE_ETHERNET || hlen != HLEN_ETHERNET {
        return Err(ProtoError::InvalidEnum { field: "arp.htype", value: htype as u32 });
    }
    if ptype != PTYPE_IPV4 || plen != PLEN_IPV4 {
        return Err(ProtoError::InvalidEnum { field: "arp.ptype", value: ptype as u32 });
    }
    if opcode != ARP_REQUEST && opcode != ARP_REPLY {
        return Err(ProtoError::InvalidEnum { field: "arp.opcode", value: opcode as u32 });
    }

    let sender_mac = MacAddr::read(r)?;
    let sender_ip = r.read_array()?;
    let target_mac = MacAddr::read(r)?;
    let target_ip = r.read_array()?;

    Ok(ArpPacket { opcode, sender_mac, sender_ip, target_mac, target_ip })
}

fn encode_arp(packet: &ArpPacket, w: &mut Writer) {
    w.write_u16(HTYPE_ETHERNET);
    w.write_u16(PTYPE_IPV4);
    w.write_u8(HLEN_ETHERNET);
    w.write_u8(PLEN_IPV4);
    w.write_u16(packet.opcode);
    packet.sender_mac.write(w);
    w.write_bytes(&packet.sender_ip);
    packet.target_mac.write(w);
    w.write_bytes(&packet.target_ip);
}

/// Build the 14-byte Ethernet header plus 28-byte ARP request body for a
/// "who-has" query, broadcast to `ff:ff:ff:ff:ff:ff` (spec §8 scenario 4).
pub fn arp_query(sender_mac: MacAddr, sender_ip: [u8; 4], target_ip: [u8; 4]) -> Vec<u8> {
    let packet = ArpPacket {
        opcode: ARP_REQUEST,
        sender_mac,
        sender_ip,
        target_mac: MacAddr([0; 6]),
        target_ip,
    };
    encode_frame(MacAddr::BROADCAST, sender_mac, &packet)
}

/// Build the Ethernet + ARP reply frame answering `request` as `sender_mac`
/// owning `sender_ip`.
pub fn arp_reply(request: &ArpPacket, sender_mac: MacAddr, sender_ip: [u8; 4]) -> Vec<u8> {
    let packet = ArpPacket {
        opcode: ARP_REPLY,
        sender_mac,
        sender_ip,
        target_mac: request.sender_mac,
        target_ip: request.sender_ip,
    };
    encode_frame(request.sender_mac, sender_mac, &packet)
}

fn encode_frame(dst: MacAddr, src: MacAddr, packet: &ArpPacket) -> Vec<u8> {
    use super::ethernet::ETHERTYPE_ARP;

    let mut w = Writer::with_capacity(14 + 28);
    dst.write(&mut w);
    src.write(&mut w);
    w.write_u16(ETHERTYPE_ARP);
    encode_arp(packet, &mut w);
    w.into_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::ethernet::{decode_ethernet, EthBody};

    #[test]
    fn query_round_trips_through_ethernet_decode() {
        let sender_mac = MacAddr([0x00, 0x11, 0x22, 0x33, 0x44, 0x55]);
        let sender_ip = [10, 0, 0, 1];
        let target_ip = [10, 0, 0, 2];
        let bytes = arp_query(sender_mac, sender_ip, target_ip);
        assert_eq!(bytes.len(), 14 + 28);

        let frame = decode_ethernet(&bytes).unwrap();
        match frame.body {
            EthBody::Arp(arp) => {
                assert_eq!(arp.opcode, ARP_REQUEST);
                assert_eq!(arp.sender_mac, sender_mac);
                assert_eq!(arp.sender_ip, sender_ip);
                assert_eq!(arp.target_ip, target_ip);
                assert_eq!(arp.target_mac, MacAddr([0; 6]));
            }
            other => panic!("expected Arp body, got {other:?}"),
        }
    }

    #[test]
    fn reply_targets_the_requester() {
        let requester_mac = MacAddr([1, 1, 1, 1, 1, 1]);
        let request = ArpPacket {
            opcode: ARP_REQUEST,
            sender_mac: requester_mac,
            sender_ip: [192, 168, 1, 10],
            target_mac: MacAddr([0; 6]),
            target_ip: [192, 168, 1, 1],
        };
        let replier_mac = MacAddr([2, 2, 2, 2, 2, 2]);
        let bytes = arp_reply(&request, replier_mac, [192, 168, 1, 1]);

        let frame = decode_ethernet(&bytes).unwrap();
        assert_eq!(frame.header.dst(), requester_mac);
        match frame.body {
            EthBody::Arp(arp) => {
                assert_eq!(arp.opcode, ARP_REPLY);
                assert_eq!(arp.sender_mac, replier_mac);
                assert_eq!(arp.target_mac, requester_mac);
                assert_eq!(arp.target_ip, [192, 168, 1, 10]);
            }
            other => panic!("expected Arp body, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_opcode() {
        let mut w = Writer::new();
        w.write_u16(HTYPE_ETHERNET);
        w.write_u16(PTYPE_IPV4);
        w.write_u8(HLEN_ETHERNET);
        w.write_u8(PLEN_IPV4);
        w.write_u16(7);
        w.write_zeros(6 + 4 + 6 + 4);
        let bytes = w.into_vec();

        let mut r = Reader::new(&bytes);
        match decode_arp(&mut r) {
            Err(ProtoError::InvalidEnum { field: "arp.opcode", value: 7 }) => {}
            other => panic!("expected InvalidEnum for opcode 7, got {other:?}"),
        }
    }
}
