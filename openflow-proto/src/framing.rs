//! Per-connection length-prefixed framing (spec §4.5).
//!
//! Each OpenFlow message is self-delimiting: the first four bytes are
//! `(version, type, length)`, and `length` (big-endian, total including the
//! 8-byte header) says exactly how many bytes make up the message. This
//! codec only finds that boundary; it hands back the raw message bytes; the
//! actual body is decoded by `crate::codec`.

use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};

use crate::byteio::Reader;
use crate::error::ProtoError;
use crate::model::OFP_HEADER_LEN;

/// Bytes needed before a message's declared length can even be read: the
/// header's `version`, `type`, and `length` fields.
const LENGTH_PREFIX_LEN: usize = 4;

#[derive(Debug, Default)]
pub struct OpenFlowCodec {
    _private: (),
}

impl OpenFlowCodec {
    pub fn new() -> Self {
        OpenFlowCodec::default()
    }
}

impl Decoder for OpenFlowCodec {
    type Item = Vec<u8>;
    type Error = ProtoError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Vec<u8>>, ProtoError> {
        if src.len() < LENGTH_PREFIX_LEN {
            return Ok(None);
        }

        let mut r = Reader::new(&src[..LENGTH_PREFIX_LEN]);
        r.skip(2)?;
        let length = r.read_u16()? as usize;

        if length < OFP_HEADER_LEN {
            return Err(ProtoError::LengthInconsistent { declared: length, actual: OFP_HEADER_LEN });
        }

        if src.len() < length {
            src.reserve(length - src.len());
            return Ok(None);
        }

        Ok(Some(src.split_to(length).to_vec()))
    }
}

impl Encoder<Vec<u8>> for OpenFlowCodec {
    type Error = ProtoError;

    /// Writes one already-framed message as a single contiguous append, so
    /// that two concurrent sends on the same connection can never interleave
    /// their bytes (spec §4.5).
    fn encode(&mut self, item: Vec<u8>, dst: &mut BytesMut) -> Result<(), ProtoError> {
        dst.extend_from_slice(&item);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_exactly_one_message_and_leaves_leftover() {
        let mut codec = OpenFlowCodec::new();
        let mut buf = BytesMut::new();
        buf.extend_from_slice(&[0x01, 0x00, 0x00, 0x08, 0x00, 0x00, 0x00, 0x01]);
        buf.extend_from_slice(&[0xAA, 0xBB]);

        let msg = codec.decode(&mut buf).unwrap().unwrap();
        assert_eq!(msg, vec![0x01, 0x00, 0x00, 0x08, 0x00, 0x00, 0x00, 0x01]);
        assert_eq!(&buf[..], &[0xAA, 0xBB]);
    }

    #[test]
    fn waits_for_more_bytes_when_body_incomplete() {
        let mut codec = OpenFlowCodec::new();
        let mut buf = BytesMut::new();
        buf.extend_from_slice(&[0x01, 0x02, 0x00, 0x0C, 0x00, 0x00, 0x00, 0x01]);
        assert!(codec.decode(&mut buf).unwrap().is_none());

        buf.extend_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);
        let msg = codec.decode(&mut buf).unwrap().unwrap();
        assert_eq!(msg.len(), 12);
    }

    #[test]
    fn rejects_length_shorter_than_header() {
        let mut codec = OpenFlowCodec::new();
        let mut buf = BytesMut::new();
        buf.extend_from_slice(&[0x01, 0x00, 0x00, 0x04]);
        assert!(matches!(codec.decode(&mut buf), Err(ProtoError::LengthInconsistent { .. })));
    }
}
