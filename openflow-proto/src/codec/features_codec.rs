use crate::byteio::{Reader, Writer};
use crate::error::Result;
use crate::model::features::MAX_PORT_NAME_LEN;
use crate::model::{PhyPort, SwitchFeatures};

/// Wire size of a `PhyPort` record (OpenFlow 1.0 `ofp_phy_port`).
pub const PHY_PORT_LEN: usize = 48;

pub(crate) fn decode_phy_port(r: &mut Reader) -> Result<PhyPort> {
    let port_no = r.read_u16()?;
    let hw_addr = r.read_array()?;
    let name_bytes = r.read_array::<{ MAX_PORT_NAME_LEN }>()?;
    let nul = name_bytes.iter().position(|&b| b == 0).unwrap_or(MAX_PORT_NAME_LEN);
    let name = String::from_utf8_lossy(&name_bytes[..nul]).into_owned();
    let config = r.read_u32()?;
    let state = r.read_u32()?;
    let curr = r.read_u32()?;
    let advertised = r.read_u32()?;
    let supported = r.read_u32()?;
    let peer = r.read_u32()?;
    Ok(PhyPort { port_no, hw_addr, name, config, state, curr, advertised, supported, peer })
}

pub(crate) fn encode_phy_port(w: &mut Writer, port: &PhyPort) {
    w.write_u16(port.port_no);
    w.write_bytes(&port.hw_addr);
    let mut name_bytes = [0u8; MAX_PORT_NAME_LEN];
    let src = port.name.as_bytes();
    let n = src.len().min(MAX_PORT_NAME_LEN);
    name_bytes[..n].copy_from_slice(&src[..n]);
    w.write_bytes(&name_bytes);
    w.write_u32(port.config);
    w.write_u32(port.state);
    w.write_u32(port.curr);
    w.write_u32(port.advertised);
    w.write_u32(port.supported);
    w.write_u32(port.peer);
}

/// Decode a `FeaturesReply` body: the fixed fields followed by zero or more
/// `PhyPort` records until the enclosing slice is exhausted (spec §3).
pub fn decode_switch_features(r: &mut Reader) -> Result<SwitchFeatures> {
    let datapath_id = r.read_u64()?;
    let n_buffers = r.read_u32()?;
    let n_tables = r.read_u8()?;
    r.skip(3)?;
    let capabilities = r.read_u32()?;
    let actions = r.read_u32()?;

    let mut ports = Vec::new();
    while r.remaining() > 0 {
        ports.push(decode_phy_port(r)?);
    }

    Ok(SwitchFeatures { datapath_id, n_buffers, n_tables, capabilities, actions, ports })
}

pub fn encode_switch_features(w: &mut Writer, features: &SwitchFeatures) {
    w.write_u64(features.datapath_id);
    w.write_u32(features.n_buffers);
    w.write_u8(features.n_tables);
    w.write_zeros(3);
    w.write_u32(features.capabilities);
    w.write_u32(features.actions);
    for port in &features.ports {
        encode_phy_port(w, port);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_3_features_reply_minimum() {
        let body: [u8; 24] = [
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0xFF, 0x03, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x87, 0x00, 0x00, 0x0F, 0xFF,
        ];
        let mut r = Reader::new(&body);
        let features = decode_switch_features(&mut r).unwrap();
        assert_eq!(features.datapath_id, 1);
        assert_eq!(features.n_buffers, 255);
        assert_eq!(features.n_tables, 3);
        assert_eq!(features.capabilities, 0x87);
        assert_eq!(features.actions, 0x0FFF);
        assert!(features.ports.is_empty());
    }

    #[test]
    fn phy_port_name_round_trips_with_nul_padding() {
        let port = PhyPort {
            port_no: 1,
            hw_addr: [1, 2, 3, 4, 5, 6],
            name: "eth0".to_string(),
            config: 0,
            state: 0,
            curr: 0,
            advertised: 0,
            supported: 0,
            peer: 0,
        };
        let mut w = Writer::new();
        encode_phy_port(&mut w, &port);
        let bytes = w.into_vec();
        assert_eq!(bytes.len(), PHY_PORT_LEN);
        let mut r = Reader::new(&bytes);
        assert_eq!(decode_phy_port(&mut r).unwrap(), port);
    }
}
