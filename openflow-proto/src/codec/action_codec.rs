use crate::byteio::{Reader, Writer};
use crate::error::{ProtoError, Result};
use crate::model::action::{
    Action, OFPAT_ENQUEUE, OFPAT_OUTPUT, OFPAT_SET_DL_DST, OFPAT_SET_DL_SRC, OFPAT_SET_NW_DST,
    OFPAT_SET_NW_SRC, OFPAT_SET_NW_TOS, OFPAT_SET_TP_DST, OFPAT_SET_TP_SRC, OFPAT_SET_VLAN_PCP,
    OFPAT_SET_VLAN_VID, OFPAT_STRIP_VLAN, OFPAT_VENDOR,
};

fn encode_one(w: &mut Writer, action: &Action) {
    let len = action.wire_len();
    w.write_u16(action.action_type());
    w.write_u16(len);
    match action {
        Action::Output { port, max_len } => {
            w.write_u16(*port);
            w.write_u16(*max_len);
        }
        Action::SetVlanVid(vid) => {
            w.write_u16(*vid);
            w.write_zeros(2);
        }
        Action::SetVlanPcp(pcp) => {
            w.write_u8(*pcp);
            w.write_zeros(3);
        }
        Action::StripVlanHeader => w.write_zeros(4),
        Action::SetDlSrc(addr) | Action::SetDlDst(addr) => {
            w.write_bytes(addr);
            w.write_zeros(6);
        }
        Action::SetNwSrc(addr) | Action::SetNwDst(addr) => w.write_u32(*addr),
        Action::SetNwTos(tos) => {
            w.write_u8(*tos);
            w.write_zeros(3);
        }
        Action::SetTpSrc(port) | Action::SetTpDst(port) => {
            w.write_u16(*port);
            w.write_zeros(2);
        }
        Action::Enqueue { port, queue_id } => {
            w.write_u16(*port);
            w.write_zeros(6);
            w.write_u32(*queue_id);
        }
        Action::VendorAction { vendor, data } => {
            w.write_u32(*vendor);
            w.write_bytes(data);
            let pad = len as usize - (8 + data.len());
            w.write_zeros(pad);
        }
    }
}

fn decode_one(r: &mut Reader) -> Result<Action> {
    let action_type = r.read_u16()?;
    let len = r.read_u16()?;
    if len < 4 {
        return Err(ProtoError::LengthInconsistent { declared: len as usize, actual: 4 });
    }
    let mut body = r.bounded(len as usize - 4)?;

    let action = match action_type {
        OFPAT_OUTPUT => {
            let port = body.read_u16()?;
            let max_len = body.read_u16()?;
            Action::Output { port, max_len }
        }
        OFPAT_SET_VLAN_VID => {
            let vid = body.read_u16()?;
            body.skip(2)?;
            Action::SetVlanVid(vid)
        }
        OFPAT_SET_VLAN_PCP => {
            let pcp = body.read_u8()?;
            body.skip(3)?;
            Action::SetVlanPcp(pcp)
        }
        OFPAT_STRIP_VLAN => {
            body.skip(4)?;
            Action::StripVlanHeader
        }
        OFPAT_SET_DL_SRC => {
            let addr = body.read_array()?;
            body.skip(6)?;
            Action::SetDlSrc(addr)
        }
        OFPAT_SET_DL_DST => {
            let addr = body.read_array()?;
            body.skip(6)?;
            Action::SetDlDst(addr)
        }
        OFPAT_SET_NW_SRC => Action::SetNwSrc(body.read_u32()?),
        OFPAT_SET_NW_DST => Action::SetNwDst(body.read_u32()?),
        OFPAT_SET_NW_TOS => {
            let tos = body.read_u8()?;
            body.skip(3)?;
            Action::SetNwTos(tos)
        }
        OFPAT_SET_TP_SRC => {
            let port = body.read_u16()?;
            body.skip(2)?;
            Action::SetTpSrc(port)
        }
        OFPAT_SET_TP_DST => {
            let port = body.read_u16()?;
            body.skip(2)?;
            Action::SetTpDst(port)
        }
        OFPAT_ENQUEUE => {
            let port = body.read_u16()?;
            body.skip(6)?;
            let queue_id = body.read_u32()?;
            Action::Enqueue { port, queue_id }
        }
        OFPAT_VENDOR => {
            let vendor = body.read_u32()?;
            let data = body.rest().to_vec();
            return Ok(Action::VendorAction { vendor, data });
        }
        other => {
            return Err(ProtoError::InvalidEnum { field: "action.type", value: other as u32 });
        }
    };
    body.expect_exhausted()?;
    Ok(action)
}

/// Decode a homogeneous action list consuming every byte of `r` (spec §4.4).
/// Each action's own `(type, len)` drives how far the cursor advances, even
/// for vendor actions; decoding never reads past the end of `r`.
pub fn decode_action_list(r: &mut Reader) -> Result<Vec<Action>> {
    let mut actions = Vec::new();
    while r.remaining() > 0 {
        actions.push(decode_one(r)?);
    }
    Ok(actions)
}

pub fn encode_action_list(w: &mut Writer, actions: &[Action]) {
    for action in actions {
        encode_one(w, action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_round_trips() {
        let action = Action::Output { port: 3, max_len: 128 };
        let mut w = Writer::new();
        encode_one(&mut w, &action);
        let bytes = w.into_vec();
        assert_eq!(bytes.len(), 8);
        let mut r = Reader::new(&bytes);
        assert_eq!(decode_one(&mut r).unwrap(), action);
    }

    #[test]
    fn list_closure_round_trips_mixed_actions() {
        let actions = vec![
            Action::Output { port: 1, max_len: 0 },
            Action::SetDlSrc([1, 2, 3, 4, 5, 6]),
            Action::StripVlanHeader,
            Action::Enqueue { port: 2, queue_id: 7 },
            Action::VendorAction { vendor: 0x1234_5678, data: vec![1, 2, 3] },
        ];
        let mut w = Writer::new();
        encode_action_list(&mut w, &actions);
        let bytes = w.into_vec();

        let mut r = Reader::new(&bytes);
        let decoded = decode_action_list(&mut r).unwrap();
        assert_eq!(decoded, actions);
    }

    #[test]
    fn vendor_action_length_is_multiple_of_eight() {
        let action = Action::VendorAction { vendor: 1, data: vec![0xAA] };
        assert_eq!(action.wire_len() % 8, 0);
        let mut w = Writer::new();
        encode_one(&mut w, &action);
        assert_eq!(w.len(), action.wire_len() as usize);
    }

    #[test]
    fn unknown_action_type_is_invalid_enum() {
        let mut w = Writer::new();
        w.write_u16(999);
        w.write_u16(8);
        w.write_zeros(4);
        let bytes = w.into_vec();
        let mut r = Reader::new(&bytes);
        assert!(matches!(decode_one(&mut r), Err(ProtoError::InvalidEnum { .. })));
    }
}
