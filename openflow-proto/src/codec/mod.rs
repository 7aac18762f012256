//! OpenFlow message codec (spec §4.4): the 8-byte header plus a flat
//! match/dispatch pair per direction. Deliberately not virtual-dispatch —
//! `SCMessage`/`CSMessage` are closed taxonomies, so a `match` on the
//! decoded type is both the clearest and the fastest way to route to each
//! body codec (spec §9).

pub mod action_codec;
pub mod error_codec;
pub mod features_codec;
pub mod flow_codec;
pub mod match_codec;
pub mod packet_io_codec;
pub mod port_codec;
pub mod queue_codec;
pub mod stats_codec;

use crate::byteio::{Reader, Writer};
use crate::error::{ProtoError, Result};
use crate::model::{CSMessage, MessageType, SCMessage, TransactionId, OFP_HEADER_LEN, OFP_VERSION};

use error_codec::{decode_switch_error, encode_switch_error};
use features_codec::{decode_switch_features, encode_switch_features};
use flow_codec::{decode_flow_mod, decode_flow_removed, encode_flow_mod, encode_flow_removed};
use packet_io_codec::{decode_packet_in, decode_packet_out, encode_packet_in, encode_packet_out};
use port_codec::{decode_port_mod, decode_port_status, encode_port_mod, encode_port_status};
use queue_codec::{
    decode_queue_config_list, decode_queue_config_reply, decode_queue_config_request,
    encode_queue_config_list, encode_queue_config_reply, encode_queue_config_request,
};
use stats_codec::{decode_stats_reply, decode_stats_request, encode_stats_reply, encode_stats_request};

/// Parse the fixed 8-byte header and return the decoded `(type, xid)` plus a
/// reader bounded to exactly `length - 8` bytes (spec §4.4 step 1/2). The
/// header's `length` field is authoritative: a slice longer than declared
/// is accepted (the framer has already cut a single message's worth), and
/// anything shorter is `Truncated`.
fn decode_header(bytes: &[u8]) -> Result<(MessageType, TransactionId, Reader<'_>)> {
    let mut r = Reader::new(bytes);
    let version = r.read_u8()?;
    if version != OFP_VERSION {
        return Err(ProtoError::VersionMismatch(version));
    }
    let type_code = r.read_u8()?;
    let msg_type = MessageType::from_code(type_code)?;
    let length = r.read_u16()?;
    if (length as usize) < OFP_HEADER_LEN {
        return Err(ProtoError::LengthInconsistent {
            declared: length as usize,
            actual: OFP_HEADER_LEN,
        });
    }
    let xid = r.read_u32()?;
    let body = r.bounded(length as usize - OFP_HEADER_LEN)?;
    Ok((msg_type, xid, body))
}

fn begin_message(msg_type: MessageType, xid: TransactionId) -> (Writer, usize) {
    let mut w = Writer::with_capacity(OFP_HEADER_LEN);
    w.write_u8(OFP_VERSION);
    w.write_u8(msg_type.code());
    let length_slot = w.reserve_u16();
    w.write_u32(xid);
    (w, length_slot)
}

fn finish_message(mut w: Writer, length_slot: usize) -> Vec<u8> {
    let total = w.len() as u16;
    w.patch_u16(length_slot, total);
    w.into_vec()
}

/// Decode a switch→controller message (spec §3).
pub fn decode_sc(bytes: &[u8]) -> Result<(TransactionId, SCMessage)> {
    let (msg_type, xid, mut body) = decode_header(bytes)?;

    let message = match msg_type {
        MessageType::Hello => SCMessage::Hello,
        MessageType::EchoRequest => SCMessage::EchoRequest(body.read_rest().to_vec()),
        MessageType::EchoReply => SCMessage::EchoReply(body.read_rest().to_vec()),
        MessageType::FeaturesReply => SCMessage::Features(decode_switch_features(&mut body)?),
        MessageType::PacketIn => SCMessage::PacketIn(decode_packet_in(&mut body)?),
        MessageType::PortStatus => SCMessage::PortStatus(decode_port_status(&mut body)?),
        MessageType::FlowRemoved => SCMessage::FlowRemoved(decode_flow_removed(&mut body)?),
        MessageType::StatsReply => SCMessage::StatsReply(decode_stats_reply(&mut body)?),
        MessageType::Error => SCMessage::Error(decode_switch_error(&mut body)?),
        MessageType::BarrierReply => SCMessage::BarrierReply,
        MessageType::QueueGetConfigReply => {
            SCMessage::QueueConfigReply(decode_queue_config_reply(&mut body)?)
        }
        MessageType::GetConfigReply => {
            let flags = body.read_u16()?;
            let miss_send_len = body.read_u16()?;
            SCMessage::GetConfigReply { flags, miss_send_len }
        }
        other => return Err(ProtoError::UnknownMessageType(other.code())),
    };

    body.expect_exhausted()?;
    Ok((xid, message))
}

/// Encode a switch→controller message.
pub fn encode_sc(xid: TransactionId, message: &SCMessage) -> Vec<u8> {
    let msg_type = match message {
        SCMessage::Hello => MessageType::Hello,
        SCMessage::EchoRequest(_) => MessageType::EchoRequest,
        SCMessage::EchoReply(_) => MessageType::EchoReply,
        SCMessage::Features(_) => MessageType::FeaturesReply,
        SCMessage::PacketIn(_) => MessageType::PacketIn,
        SCMessage::PortStatus(_) => MessageType::PortStatus,
        SCMessage::FlowRemoved(_) => MessageType::FlowRemoved,
        SCMessage::StatsReply(_) => MessageType::StatsReply,
        SCMessage::Error(_) => MessageType::Error,
        SCMessage::BarrierReply => MessageType::BarrierReply,
        SCMessage::QueueConfigReply(_) => MessageType::QueueGetConfigReply,
        SCMessage::GetConfigReply { .. } => MessageType::GetConfigReply,
    };

    let (mut w, length_slot) = begin_message(msg_type, xid);
    match message {
        SCMessage::Hello | SCMessage::BarrierReply => {}
        SCMessage::EchoRequest(payload) | SCMessage::EchoReply(payload) => {
            w.write_bytes(payload)
        }
        SCMessage::Features(features) => encode_switch_features(&mut w, features),
        SCMessage::PacketIn(packet_in) => encode_packet_in(&mut w, packet_in),
        SCMessage::PortStatus(status) => encode_port_status(&mut w, status),
        SCMessage::FlowRemoved(removed) => encode_flow_removed(&mut w, removed),
        SCMessage::StatsReply(reply) => encode_stats_reply(&mut w, reply),
        SCMessage::Error(error) => encode_switch_error(&mut w, error),
        SCMessage::QueueConfigReply(reply) => encode_queue_config_reply(&mut w, reply),
        SCMessage::GetConfigReply { flags, miss_send_len } => {
            w.write_u16(*flags);
            w.write_u16(*miss_send_len);
        }
    }
    finish_message(w, length_slot)
}

/// Decode a controller→switch message (spec §3). The server decodes these
/// only in tests and mock-switch tooling; a real switch implementation
/// would use this side to interpret what the controller sends.
pub fn decode_cs(bytes: &[u8]) -> Result<(TransactionId, CSMessage)> {
    let (msg_type, xid, mut body) = decode_header(bytes)?;

    let message = match msg_type {
        MessageType::Hello => CSMessage::Hello,
        MessageType::EchoRequest => CSMessage::EchoRequest(body.read_rest().to_vec()),
        MessageType::EchoReply => CSMessage::EchoReply(body.read_rest().to_vec()),
        MessageType::FeaturesRequest => CSMessage::FeaturesRequest,
        MessageType::PacketOut => CSMessage::PacketOut(decode_packet_out(&mut body)?),
        MessageType::FlowMod => CSMessage::FlowMod(decode_flow_mod(&mut body)?),
        MessageType::PortMod => CSMessage::PortMod(decode_port_mod(&mut body)?),
        MessageType::StatsRequest => CSMessage::StatsRequest(decode_stats_request(&mut body)?),
        MessageType::BarrierRequest => CSMessage::BarrierRequest,
        MessageType::SetConfig => {
            let flags = body.read_u16()?;
            let miss_send_len = body.read_u16()?;
            CSMessage::SetConfig { flags, miss_send_len }
        }
        MessageType::QueueGetConfigRequest => {
            CSMessage::GetQueueConfig(decode_queue_config_request(&mut body)?)
        }
        MessageType::Vendor => decode_vendor_body(&mut body)?,
        MessageType::GetConfigRequest => CSMessage::GetConfigRequest,
        MessageType::Error => CSMessage::Error(decode_switch_error(&mut body)?),
        other => return Err(ProtoError::UnknownMessageType(other.code())),
    };

    body.expect_exhausted()?;
    Ok((xid, message))
}

/// Extended queue operations ride inside the generic `Vendor` message type
/// under a private vendor id, the same way real OpenFlow 1.0 controllers
/// carry vendor-specific extensions (spec §3). Anything not tagged with
/// that vendor id passes through as opaque `CSMessage::Vendor` bytes.
const EXT_QUEUE_VENDOR_ID: u32 = 0x4F46_5130;
const EXT_QUEUE_SUBTYPE_MODIFY: u32 = 1;
const EXT_QUEUE_SUBTYPE_DELETE: u32 = 2;

fn decode_vendor_body(body: &mut Reader) -> Result<CSMessage> {
    let raw = body.rest().to_vec();
    body.skip(raw.len())?;

    let mut peek = Reader::new(&raw);
    let parsed: Option<(u32, u16, Vec<_>)> = (|| {
        if peek.read_u32().ok()? != EXT_QUEUE_VENDOR_ID {
            return None;
        }
        let subtype = peek.read_u32().ok()?;
        let port = peek.read_u16().ok()?;
        peek.skip(6).ok()?;
        let queues = decode_queue_config_list(&mut peek).ok()?;
        Some((subtype, port, queues))
    })();

    match parsed {
        Some((EXT_QUEUE_SUBTYPE_MODIFY, port, queues)) => {
            Ok(CSMessage::ExtQueueModify(port, queues))
        }
        Some((EXT_QUEUE_SUBTYPE_DELETE, port, queues)) => {
            Ok(CSMessage::ExtQueueDelete(port, queues))
        }
        _ => Ok(CSMessage::Vendor(raw)),
    }
}

/// Encode a controller→switch message.
pub fn encode_cs(xid: TransactionId, message: &CSMessage) -> Vec<u8> {
    let msg_type = match message {
        CSMessage::Hello => MessageType::Hello,
        CSMessage::EchoRequest(_) => MessageType::EchoRequest,
        CSMessage::EchoReply(_) => MessageType::EchoReply,
        CSMessage::FeaturesRequest => MessageType::FeaturesRequest,
        CSMessage::PacketOut(_) => MessageType::PacketOut,
        CSMessage::FlowMod(_) => MessageType::FlowMod,
        CSMessage::PortMod(_) => MessageType::PortMod,
        CSMessage::StatsRequest(_) => MessageType::StatsRequest,
        CSMessage::BarrierRequest => MessageType::BarrierRequest,
        CSMessage::SetConfig { .. } => MessageType::SetConfig,
        CSMessage::ExtQueueModify(..) => MessageType::Vendor,
        CSMessage::ExtQueueDelete(..) => MessageType::Vendor,
        CSMessage::Vendor(_) => MessageType::Vendor,
        CSMessage::GetQueueConfig(_) => MessageType::QueueGetConfigRequest,
        CSMessage::GetConfigRequest => MessageType::GetConfigRequest,
        CSMessage::Error(_) => MessageType::Error,
    };

    let (mut w, length_slot) = begin_message(msg_type, xid);
    match message {
        CSMessage::Hello | CSMessage::FeaturesRequest | CSMessage::BarrierRequest => {}
        CSMessage::EchoRequest(payload) | CSMessage::EchoReply(payload) => w.write_bytes(payload),
        CSMessage::PacketOut(packet_out) => encode_packet_out(&mut w, packet_out),
        CSMessage::FlowMod(flow_mod) => encode_flow_mod(&mut w, flow_mod),
        CSMessage::PortMod(port_mod) => encode_port_mod(&mut w, port_mod),
        CSMessage::StatsRequest(request) => encode_stats_request(&mut w, request),
        CSMessage::SetConfig { flags, miss_send_len } => {
            w.write_u16(*flags);
            w.write_u16(*miss_send_len);
        }
        CSMessage::ExtQueueModify(port, queues) => {
            w.write_u32(EXT_QUEUE_VENDOR_ID);
            w.write_u32(EXT_QUEUE_SUBTYPE_MODIFY);
            w.write_u16(*port);
            w.write_zeros(6);
            encode_queue_config_list(&mut w, queues);
        }
        CSMessage::ExtQueueDelete(port, queues) => {
            w.write_u32(EXT_QUEUE_VENDOR_ID);
            w.write_u32(EXT_QUEUE_SUBTYPE_DELETE);
            w.write_u16(*port);
            w.write_zeros(6);
            encode_queue_config_list(&mut w, queues);
        }
        CSMessage::Vendor(data) => w.write_bytes(data),
        CSMessage::GetQueueConfig(request) => encode_queue_config_request(&mut w, request),
        CSMessage::GetConfigRequest => {}
        CSMessage::Error(error) => encode_switch_error(&mut w, error),
    }
    finish_message(w, length_slot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PacketInReason, SwitchFeatures};

    #[test]
    fn scenario_1_hello_round_trips() {
        let bytes: [u8; 8] = [0x01, 0x00, 0x00, 0x08, 0x00, 0x00, 0x00, 0x01];
        let (xid, message) = decode_sc(&bytes).unwrap();
        assert_eq!(xid, 1);
        assert_eq!(message, SCMessage::Hello);
        assert_eq!(encode_sc(xid, &message), bytes);
    }

    #[test]
    fn scenario_2_echo_request_with_payload() {
        let bytes: [u8; 12] =
            [0x01, 0x02, 0x00, 0x0C, 0x00, 0x00, 0x00, 0x2A, 0xDE, 0xAD, 0xBE, 0xEF];
        let (xid, message) = decode_sc(&bytes).unwrap();
        assert_eq!(xid, 42);
        assert_eq!(message, SCMessage::EchoRequest(vec![0xDE, 0xAD, 0xBE, 0xEF]));
    }

    #[test]
    fn scenario_3_features_reply_minimum() {
        let mut bytes = vec![0x01, 0x06, 0x00, 0x20, 0x00, 0x00, 0x00, 0x07];
        bytes.extend_from_slice(&[
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0xFF, 0x03, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x87, 0x00, 0x00, 0x0F, 0xFF,
        ]);
        let (xid, message) = decode_sc(&bytes).unwrap();
        assert_eq!(xid, 7);
        match message {
            SCMessage::Features(SwitchFeatures {
                datapath_id,
                n_buffers,
                n_tables,
                capabilities,
                actions,
                ports,
            }) => {
                assert_eq!(datapath_id, 1);
                assert_eq!(n_buffers, 255);
                assert_eq!(n_tables, 3);
                assert_eq!(capabilities, 0x87);
                assert_eq!(actions, 0x0FFF);
                assert!(ports.is_empty());
            }
            other => panic!("expected Features, got {other:?}"),
        }
    }

    #[test]
    fn minimum_length_message_decodes_and_seven_bytes_truncates() {
        let hello: [u8; 8] = [0x01, 0x00, 0x00, 0x08, 0x00, 0x00, 0x00, 0x00];
        assert!(decode_sc(&hello).is_ok());
        assert!(matches!(decode_sc(&hello[..7]), Err(ProtoError::Truncated { .. })));
    }

    #[test]
    fn declared_length_exceeding_slice_is_truncated() {
        let bytes: [u8; 8] = [0x01, 0x00, 0x00, 0x10, 0x00, 0x00, 0x00, 0x00];
        assert!(matches!(decode_sc(&bytes), Err(ProtoError::Truncated { .. })));
    }

    #[test]
    fn trailing_bytes_after_complete_body_are_malformed_trailer() {
        let mut bytes = vec![0x01, 0x13, 0x00, 0x09, 0x00, 0x00, 0x00, 0x00];
        bytes.push(0xFF);
        bytes[3] = 9;
        assert!(matches!(decode_sc(&bytes), Err(ProtoError::MalformedTrailer(1))));
    }

    #[test]
    fn echo_payload_survives_round_trip_up_to_max() {
        let payload = vec![0x5Au8; 65527];
        let message = CSMessage::EchoReply(payload.clone());
        let bytes = encode_cs(1, &message);
        assert_eq!(bytes.len(), 65535);
        let (_, decoded) = decode_cs(&bytes).unwrap();
        assert_eq!(decoded, CSMessage::EchoReply(payload));
    }

    #[test]
    fn unknown_message_type_is_rejected() {
        let bytes: [u8; 8] = [0x01, 0xEE, 0x00, 0x08, 0x00, 0x00, 0x00, 0x00];
        assert!(matches!(decode_sc(&bytes), Err(ProtoError::UnknownMessageType(0xEE))));
    }

    #[test]
    fn version_mismatch_is_rejected() {
        let bytes: [u8; 8] = [0x02, 0x00, 0x00, 0x08, 0x00, 0x00, 0x00, 0x00];
        assert!(matches!(decode_sc(&bytes), Err(ProtoError::VersionMismatch(2))));
    }

    #[test]
    fn packet_in_reason_preserved_through_cs_sc_split() {
        use crate::model::PacketIn;
        let packet_in = PacketIn {
            buffer_id: Some(5),
            total_len: 4,
            in_port: 1,
            reason: PacketInReason::NoMatch,
            data: vec![1, 2, 3, 4],
        };
        let message = SCMessage::PacketIn(packet_in.clone());
        let bytes = encode_sc(9, &message);
        let (xid, decoded) = decode_sc(&bytes).unwrap();
        assert_eq!(xid, 9);
        assert_eq!(decoded, SCMessage::PacketIn(packet_in));
    }
}
