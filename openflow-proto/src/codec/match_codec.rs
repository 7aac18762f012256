use crate::byteio::{Reader, Writer};
use crate::error::Result;
use crate::model::{Match, Wildcards};

/// Wire size of a `Match` record (spec §3: "a 40-byte fixed record").
pub const MATCH_LEN: usize = 40;

pub fn decode_match(r: &mut Reader) -> Result<Match> {
    let wildcards = Wildcards::from_bits(r.read_u32()?);
    let in_port = r.read_u16()?;
    let dl_src = r.read_array()?;
    let dl_dst = r.read_array()?;
    let dl_vlan = r.read_u16()?;
    let dl_vlan_pcp = r.read_u8()?;
    r.skip(1)?;
    let dl_type = r.read_u16()?;
    let nw_tos = r.read_u8()?;
    let nw_proto = r.read_u8()?;
    r.skip(2)?;
    let nw_src = r.read_u32()?;
    let nw_dst = r.read_u32()?;
    let tp_src = r.read_u16()?;
    let tp_dst = r.read_u16()?;

    Ok(Match {
        wildcards,
        in_port,
        dl_src,
        dl_dst,
        dl_vlan,
        dl_vlan_pcp,
        dl_type,
        nw_tos,
        nw_proto,
        nw_src,
        nw_dst,
        tp_src,
        tp_dst,
    })
}

/// Encode a `Match`. A wildcarded `nw_src`/`nw_dst` is normalized to
/// address zero on the wire regardless of the literal value carried in the
/// struct (spec §4.4).
pub fn encode_match(w: &mut Writer, m: &Match) {
    w.write_u32(m.wildcards.to_bits());
    w.write_u16(m.in_port);
    w.write_bytes(&m.dl_src);
    w.write_bytes(&m.dl_dst);
    w.write_u16(m.dl_vlan);
    w.write_u8(m.dl_vlan_pcp);
    w.write_zeros(1);
    w.write_u16(m.dl_type);
    w.write_u8(m.nw_tos);
    w.write_u8(m.nw_proto);
    w.write_zeros(2);
    let nw_src = if m.wildcards.nw_src_mask >= 32 { 0 } else { m.nw_src };
    let nw_dst = if m.wildcards.nw_dst_mask >= 32 { 0 } else { m.nw_dst };
    w.write_u32(nw_src);
    w.write_u32(nw_dst);
    w.write_u16(m.tp_src);
    w.write_u16(m.tp_dst);
}
