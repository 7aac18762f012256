use crate::byteio::Reader;
use crate::error::{ProtoError, Result};

const PROTO_ICMP: u8 = 1;
const PROTO_TCP: u8 = 6;
const PROTO_UDP: u8 = 17;

const TCP_FLAG_FIN: u8 = 0x01;
const TCP_FLAG_SYN: u8 = 0x02;
const TCP_FLAG_RST: u8 = 0x04;
const TCP_FLAG_PSH: u8 = 0x08;
const TCP_FLAG_ACK: u8 = 0x10;
const TCP_FLAG_URG: u8 = 0x20;

/// IPv4 header. `options` borrows whatever bytes the 4-bit IHL declared
/// beyond the fixed 20-byte header; decode-only, per spec §4.2 (the core
/// never needs to construct arbitrary IP headers, only inspect captured
/// ones or pass `PacketOut` payloads through opaquely).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpHeader<'a> {
    pub version: u8,
    pub ihl: u8,
    pub dscp: u8,
    pub ecn: u8,
    pub total_length: u16,
    pub identification: u16,
    pub flags: u8,
    pub fragment_offset: u16,
    pub ttl: u8,
    pub protocol: u8,
    pub checksum: u16,
    pub src: [u8; 4],
    pub dst: [u8; 4],
    pub options: &'a [u8],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TcpHeader {
    pub src_port: u16,
    pub dst_port: u16,
    pub seq: u32,
    pub ack: u32,
    pub data_offset: u8,
    pub fin: bool,
    pub syn: bool,
    pub rst: bool,
    pub psh: bool,
    pub ack_flag: bool,
    pub urg: bool,
    pub window: u16,
    pub checksum: u16,
    pub urgent_pointer: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UdpHeader {
    pub src_port: u16,
    pub dst_port: u16,
    pub length: u16,
    pub checksum: u16,
}

#[derive(Debug)]
pub enum IpBody<'a> {
    Tcp(TcpHeader, &'a [u8]),
    Udp(UdpHeader, &'a [u8]),
    Icmp { icmp_type: u8, icmp_code: u8, rest: &'a [u8] },
    Other(&'a [u8]),
}

#[derive(Debug)]
pub struct IpPacket<'a> {
    pub header: IpHeader<'a>,
    pub body: IpBody<'a>,
}

/// Decode an IPv4 datagram and, where recognized, its transport header.
pub fn decode_ip(bytes: &[u8]) -> Result<IpPacket<'_>> {
    let mut r = Reader::new(bytes);
    let ver_ihl = r.read_u8()?;
    let version = ver_ihl >> 4;
    let ihl = ver_ihl & 0x0F;
    if version != 4 {
        return Err(ProtoError::InvalidEnum { field: "ip.version", value: version as u32 });
    }
    let header_len = ihl as usize * 4;
    if header_len < 20 {
        return Err(ProtoError::InvalidEnum { field: "ip.ihl", value: ihl as u32 });
    }

    let dscp_ecn = r.read_u8()?;
    let total_length = r.read_u16()?;
    let identification = r.read_u16()?;
    let flags_frag = r.read_u16()?;
    let ttl = r.read_u8()?;
    let protocol = r.read_u8()?;
    let checksum = r.read_u16()?;
    let src = r.read_array()?;
    let dst = r.read_array()?;

    let fixed_len = 20;
    let options_len = header_len - fixed_len;
    let options = r.read_slice(options_len)?;

    let header = IpHeader {
        version,
        ihl,
        dscp: dscp_ecn >> 2,
        ecn: dscp_ecn & 0x3,
        total_length,
        identification,
        flags: (flags_frag >> 13) as u8,
        fragment_offset: flags_frag & 0x1FFF,
        ttl,
        protocol,
        checksum,
        src,
        dst,
        options,
    };

    let payload = r.rest();
    let body = match protocol {
        PROTO_TCP => {
            let mut tr = Reader::new(payload);
            let src_port = tr.read_u16()?;
            let dst_port = tr.read_u16()?;
            let seq = tr.read_u32()?;
            let ack = tr.read_u32()?;
            let offset_flags = tr.read_u16()?;
            let data_offset = (offset_flags >> 12) as u8;
            let flag_bits = (offset_flags & 0x3F) as u8;
            let window = tr.read_u16()?;
            let checksum = tr.read_u16()?;
            let urgent_pointer = tr.read_u16()?;
            let opts_len = (data_offset as usize * 4).saturating_sub(20);
            tr.skip(opts_len)?;
            let tcp = TcpHeader {
                src_port,
                dst_port,
                seq,
                ack,
                data_offset,
                fin: flag_bits & TCP_FLAG_FIN != 0,
                syn: flag_bits & TCP_FLAG_SYN != 0,
                rst: flag_bits & TCP_FLAG_RST != 0,
                psh: flag_bits & TCP_FLAG_PSH != 0,
                ack_flag: flag_bits & TCP_FLAG_ACK != 0,
                urg: flag_bits & TCP_FLAG_URG != 0,
                window,
                checksum,
                urgent_pointer,
            };
            IpBody::Tcp(tcp, tr.rest())
        }
        PROTO_UDP => {
            let mut ur = Reader::new(payload);
            let src_port = ur.read_u16()?;
            let dst_port = ur.read_u16()?;
            let length = ur.read_u16()?;
            let checksum = ur.read_u16()?;
            IpBody::Udp(UdpHeader { src_port, dst_port, length, checksum }, ur.rest())
        }
        PROTO_ICMP => {
            let mut ir = Reader::new(payload);
            let icmp_type = ir.read_u8()?;
            let icmp_code = ir.read_u8()?;
            ir.skip(2)?;
            IpBody::Icmp { icmp_type, icmp_code, rest: ir.rest() }
        }
        _ => IpBody::Other(payload),
    };

    Ok(IpPacket { header, body })
}
