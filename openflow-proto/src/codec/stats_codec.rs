use crate::byteio::{Reader, Writer};
use crate::error::Result;
use crate::model::{StatsReply, StatsRequest};

/// Decode the 4-byte `(stats_type, flags)` envelope shared by requests and
/// replies, treating everything after it as an opaque body (spec §4.4):
/// the codec hands back exactly one chunk per wire message and leaves
/// reassembly of a multi-message reply to the handler.
pub fn decode_stats_request(r: &mut Reader) -> Result<StatsRequest> {
    let stats_type = r.read_u16()?;
    let flags = r.read_u16()?;
    let body = r.read_rest().to_vec();
    Ok(StatsRequest { stats_type, flags, body })
}

pub fn encode_stats_request(w: &mut Writer, request: &StatsRequest) {
    w.write_u16(request.stats_type);
    w.write_u16(request.flags);
    w.write_bytes(&request.body);
}

pub fn decode_stats_reply(r: &mut Reader) -> Result<StatsReply> {
    let stats_type = r.read_u16()?;
    let flags = r.read_u16()?;
    let body = r.read_rest().to_vec();
    Ok(StatsReply { stats_type, flags, body })
}

pub fn encode_stats_reply(w: &mut Writer, reply: &StatsReply) {
    w.write_u16(reply.stats_type);
    w.write_u16(reply.flags);
    w.write_bytes(&reply.body);
}
