use crate::byteio::{Reader, Writer};
use crate::error::Result;

/// PaneDP discovery frame body: a switch identifier and the port it was
/// emitted on, used to infer inter-switch links (spec §4.2, §9). Fully
/// symmetric: unlike IP/ARP, the core both decodes and constructs these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneDpFrame {
    pub switch_id: u64,
    pub port_id: u16,
}

pub fn decode_panedp(r: &mut Reader) -> Result<PaneDpFrame> {
    let switch_id = r.read_u64()?;
    let port_id = r.read_u16()?;
    Ok(PaneDpFrame { switch_id, port_id })
}

pub fn encode_panedp(frame: &PaneDpFrame, w: &mut Writer) {
    w.write_u64(frame.switch_id);
    w.write_u16(frame.port_id);
}
