use crate::byteio::{Reader, Writer};
use crate::error::Result;
use crate::model::SwitchError;

pub fn decode_switch_error(r: &mut Reader) -> Result<SwitchError> {
    let error_type = r.read_u16()?;
    let code = r.read_u16()?;
    let data = r.read_rest().to_vec();
    Ok(SwitchError { error_type, code, data })
}

pub fn encode_switch_error(w: &mut Writer, error: &SwitchError) {
    w.write_u16(error.error_type);
    w.write_u16(error.code);
    w.write_bytes(&error.data);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hello_failed_round_trips_with_echoed_data() {
        let error = SwitchError::hello_failed_incompatible(vec![0x01, 0x00]);
        let mut w = Writer::new();
        encode_switch_error(&mut w, &error);
        let bytes = w.into_vec();
        let mut r = Reader::new(&bytes);
        assert_eq!(decode_switch_error(&mut r).unwrap(), error);
    }
}
