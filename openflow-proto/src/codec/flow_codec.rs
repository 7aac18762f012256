use crate::byteio::{Reader, Writer};
use crate::error::{ProtoError, Result};
use crate::model::flow::{NO_BUFFER, NO_OUT_PORT};
use crate::model::{FlowMod, FlowModCommand, FlowRemoved, FlowRemovedReason};

use super::action_codec::{decode_action_list, encode_action_list};
use super::match_codec::{decode_match, encode_match};

/// Decode a `FlowMod` body: 40-byte match, fixed fields, then an action
/// list running to the end of the enclosing slice (spec §3).
pub fn decode_flow_mod(r: &mut Reader) -> Result<FlowMod> {
    let matcher = decode_match(r)?;
    let cookie = r.read_u64()?;
    let command_code = r.read_u16()?;
    let command = FlowModCommand::from_code(command_code).ok_or(ProtoError::InvalidEnum {
        field: "flow_mod.command",
        value: command_code as u32,
    })?;
    let idle_timeout = r.read_u16()?;
    let hard_timeout = r.read_u16()?;
    let priority = r.read_u16()?;
    let buffer_id_raw = r.read_u32()?;
    let buffer_id = if buffer_id_raw == NO_BUFFER { None } else { Some(buffer_id_raw) };
    let out_port_raw = r.read_u16()?;
    let out_port = if out_port_raw == NO_OUT_PORT { None } else { Some(out_port_raw) };
    let flags = r.read_u16()?;
    let actions = decode_action_list(r)?;

    Ok(FlowMod {
        command,
        matcher,
        cookie,
        idle_timeout,
        hard_timeout,
        priority,
        buffer_id,
        out_port,
        flags,
        actions,
    })
}

/// Encode a `FlowMod`. `priority` is always wire-present, even for a
/// `Delete`/`DeleteStrict` command that ignores it semantically (spec §4.4).
pub fn encode_flow_mod(w: &mut Writer, flow_mod: &FlowMod) {
    encode_match(w, &flow_mod.matcher);
    w.write_u64(flow_mod.cookie);
    w.write_u16(flow_mod.command.code());
    w.write_u16(flow_mod.idle_timeout);
    w.write_u16(flow_mod.hard_timeout);
    w.write_u16(flow_mod.priority);
    w.write_u32(flow_mod.buffer_id.unwrap_or(NO_BUFFER));
    w.write_u16(flow_mod.out_port.unwrap_or(NO_OUT_PORT));
    w.write_u16(flow_mod.flags);
    encode_action_list(w, &flow_mod.actions);
}

pub fn decode_flow_removed(r: &mut Reader) -> Result<FlowRemoved> {
    let matcher = decode_match(r)?;
    let cookie = r.read_u64()?;
    let priority = r.read_u16()?;
    let reason_code = r.read_u8()?;
    let reason = FlowRemovedReason::from_code(reason_code).ok_or(ProtoError::InvalidEnum {
        field: "flow_removed.reason",
        value: reason_code as u32,
    })?;
    r.skip(1)?;
    let duration_sec = r.read_u32()?;
    let duration_nsec = r.read_u32()?;
    let idle_timeout = r.read_u16()?;
    r.skip(2)?;
    let packet_count = r.read_u64()?;
    let byte_count = r.read_u64()?;
    r.expect_exhausted()?;

    Ok(FlowRemoved {
        matcher,
        cookie,
        priority,
        reason,
        duration_sec,
        duration_nsec,
        idle_timeout,
        packet_count,
        byte_count,
    })
}

pub fn encode_flow_removed(w: &mut Writer, removed: &FlowRemoved) {
    encode_match(w, &removed.matcher);
    w.write_u64(removed.cookie);
    w.write_u16(removed.priority);
    w.write_u8(removed.reason.code());
    w.write_zeros(1);
    w.write_u32(removed.duration_sec);
    w.write_u32(removed.duration_nsec);
    w.write_u16(removed.idle_timeout);
    w.write_zeros(2);
    w.write_u64(removed.packet_count);
    w.write_u64(removed.byte_count);
}
