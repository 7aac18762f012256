use crate::byteio::{Reader, Writer};
use crate::error::{ProtoError, Result};
use crate::model::port::PortStatusReason;
use crate::model::{PortMod, PortStatus};

use super::features_codec::{decode_phy_port, encode_phy_port};

pub fn decode_port_mod(r: &mut Reader) -> Result<PortMod> {
    let port_no = r.read_u16()?;
    let hw_addr = r.read_array()?;
    let config = r.read_u32()?;
    let mask = r.read_u32()?;
    let advertise = r.read_u32()?;
    r.skip(4)?;
    Ok(PortMod { port_no, hw_addr, config, mask, advertise })
}

pub fn encode_port_mod(w: &mut Writer, port_mod: &PortMod) {
    w.write_u16(port_mod.port_no);
    w.write_bytes(&port_mod.hw_addr);
    w.write_u32(port_mod.config);
    w.write_u32(port_mod.mask);
    w.write_u32(port_mod.advertise);
    w.write_zeros(4);
}

pub fn decode_port_status(r: &mut Reader) -> Result<PortStatus> {
    let reason_code = r.read_u8()?;
    let reason = PortStatusReason::from_code(reason_code).ok_or(ProtoError::InvalidEnum {
        field: "port_status.reason",
        value: reason_code as u32,
    })?;
    r.skip(7)?;
    let port = decode_phy_port(r)?;
    Ok(PortStatus { reason, port })
}

pub fn encode_port_status(w: &mut Writer, status: &PortStatus) {
    w.write_u8(status.reason.code());
    w.write_zeros(7);
    encode_phy_port(w, &status.port);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_mod_round_trips() {
        let port_mod = PortMod {
            port_no: 5,
            hw_addr: [0xAA; 6],
            config: 1,
            mask: 1,
            advertise: 0,
        };
        let mut w = Writer::new();
        encode_port_mod(&mut w, &port_mod);
        let bytes = w.into_vec();
        assert_eq!(bytes.len(), 24);
        let mut r = Reader::new(&bytes);
        assert_eq!(decode_port_mod(&mut r).unwrap(), port_mod);
    }
}
