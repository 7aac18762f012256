use crate::byteio::{Reader, Writer};
use crate::error::{ProtoError, Result};
use crate::model::flow::NO_BUFFER;
use crate::model::packet_io::PacketInReason;
use crate::model::{PacketIn, PacketOut};

use super::action_codec::{decode_action_list, encode_action_list};

fn encode_buffer_id(buffer_id: Option<u32>) -> u32 {
    buffer_id.unwrap_or(NO_BUFFER)
}

fn decode_buffer_id(raw: u32) -> Option<u32> {
    if raw == NO_BUFFER {
        None
    } else {
        Some(raw)
    }
}

/// Decode a `PacketIn` body (spec §3): fixed fields, then the first
/// `total_len` bytes of the captured frame running to the end of the
/// enclosing slice.
pub fn decode_packet_in(r: &mut Reader) -> Result<PacketIn> {
    let buffer_id = decode_buffer_id(r.read_u32()?);
    let total_len = r.read_u16()?;
    let in_port = r.read_u16()?;
    let reason_code = r.read_u8()?;
    r.skip(1)?;
    let reason = PacketInReason::from_code(reason_code)
        .ok_or(ProtoError::InvalidEnum { field: "packet_in.reason", value: reason_code as u32 })?;
    let data = r.read_rest().to_vec();

    Ok(PacketIn { buffer_id, total_len, in_port, reason, data })
}

pub fn encode_packet_in(w: &mut Writer, packet_in: &PacketIn) {
    w.write_u32(encode_buffer_id(packet_in.buffer_id));
    w.write_u16(packet_in.total_len);
    w.write_u16(packet_in.in_port);
    w.write_u8(packet_in.reason.code());
    w.write_zeros(1);
    w.write_bytes(&packet_in.data);
}

/// Decode a `PacketOut` body (spec §3, §4.4): the trailer is present only
/// when `buffer_id` is absent.
pub fn decode_packet_out(r: &mut Reader) -> Result<PacketOut> {
    let buffer_id = decode_buffer_id(r.read_u32()?);
    let in_port = r.read_u16()?;
    let actions_len = r.read_u16()?;
    let mut actions_r = r.bounded(actions_len as usize)?;
    let actions = decode_action_list(&mut actions_r)?;

    let data = if buffer_id.is_some() { Vec::new() } else { r.read_rest().to_vec() };

    Ok(PacketOut { buffer_id, in_port, actions, data })
}

pub fn encode_packet_out(w: &mut Writer, packet_out: &PacketOut) {
    w.write_u32(encode_buffer_id(packet_out.buffer_id));
    w.write_u16(packet_out.in_port);

    let mut actions_w = Writer::new();
    encode_action_list(&mut actions_w, &packet_out.actions);
    let actions_bytes = actions_w.into_vec();
    w.write_u16(actions_bytes.len() as u16);
    w.write_bytes(&actions_bytes);

    if packet_out.buffer_id.is_none() {
        w.write_bytes(&packet_out.data);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Action;

    #[test]
    fn packet_in_preserves_buffer_id_and_payload() {
        let packet_in = PacketIn {
            buffer_id: Some(7),
            total_len: 64,
            in_port: 3,
            reason: PacketInReason::Action,
            data: vec![0xDE, 0xAD, 0xBE, 0xEF],
        };
        let mut w = Writer::new();
        encode_packet_in(&mut w, &packet_in);
        let bytes = w.into_vec();
        let mut r = Reader::new(&bytes);
        assert_eq!(decode_packet_in(&mut r).unwrap(), packet_in);
    }

    #[test]
    fn packet_out_with_buffer_id_has_no_trailer() {
        let packet_out = PacketOut {
            buffer_id: Some(42),
            in_port: 1,
            actions: vec![Action::Output { port: 2, max_len: 0 }],
            data: Vec::new(),
        };
        let mut w = Writer::new();
        encode_packet_out(&mut w, &packet_out);
        let bytes = w.into_vec();
        assert_eq!(bytes.len(), 4 + 2 + 2 + 8);

        let mut r = Reader::new(&bytes);
        let decoded = decode_packet_out(&mut r).unwrap();
        assert_eq!(decoded, packet_out);
    }

    #[test]
    fn packet_out_without_buffer_id_carries_trailer() {
        let packet_out = PacketOut {
            buffer_id: None,
            in_port: 1,
            actions: vec![],
            data: vec![1, 2, 3, 4],
        };
        let mut w = Writer::new();
        encode_packet_out(&mut w, &packet_out);
        let bytes = w.into_vec();

        let mut r = Reader::new(&bytes);
        let decoded = decode_packet_out(&mut r).unwrap();
        assert_eq!(decoded.data, vec![1, 2, 3, 4]);
    }
}
