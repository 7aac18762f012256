use crate::byteio::{Reader, Writer};
use crate::error::{ProtoError, Result};
use crate::model::queue::OFPQT_MIN_RATE;
use crate::model::{QueueConfig, QueueConfigReply, QueueConfigRequest, QueueProperty};

/// Wire size of a single queue property record.
const PROPERTY_LEN: u16 = 16;
/// Wire size of a queue's fixed header, before its properties.
const QUEUE_HEADER_LEN: usize = 8;

fn decode_property(r: &mut Reader) -> Result<QueueProperty> {
    let property_type = r.read_u16()?;
    let len = r.read_u16()?;
    if (len as usize) < 8 {
        return Err(ProtoError::LengthInconsistent { declared: len as usize, actual: 8 });
    }
    r.skip(4)?;
    let mut body = r.bounded(len as usize - 8)?;
    let property = match property_type {
        OFPQT_MIN_RATE => {
            let rate = body.read_u16()?;
            body.skip(6)?;
            QueueProperty::MinRate(rate)
        }
        other => {
            return Err(ProtoError::InvalidEnum {
                field: "queue_property.type",
                value: other as u32,
            })
        }
    };
    body.expect_exhausted()?;
    Ok(property)
}

fn encode_property(w: &mut Writer, property: &QueueProperty) {
    w.write_u16(property.property_type());
    w.write_u16(PROPERTY_LEN);
    w.write_zeros(4);
    match property {
        QueueProperty::MinRate(rate) => {
            w.write_u16(*rate);
            w.write_zeros(6);
        }
    }
}

fn decode_queue_config(r: &mut Reader) -> Result<QueueConfig> {
    let queue_id = r.read_u32()?;
    let len = r.read_u16()?;
    if (len as usize) < QUEUE_HEADER_LEN {
        return Err(ProtoError::LengthInconsistent {
            declared: len as usize,
            actual: QUEUE_HEADER_LEN,
        });
    }
    r.skip(2)?;
    let mut body = r.bounded(len as usize - QUEUE_HEADER_LEN)?;
    let mut properties = Vec::new();
    while body.remaining() > 0 {
        properties.push(decode_property(&mut body)?);
    }
    Ok(QueueConfig { queue_id, properties })
}

fn encode_queue_config(w: &mut Writer, queue: &QueueConfig) {
    let mut body = Writer::new();
    for property in &queue.properties {
        encode_property(&mut body, property);
    }
    let body_bytes = body.into_vec();

    w.write_u32(queue.queue_id);
    w.write_u16((QUEUE_HEADER_LEN + body_bytes.len()) as u16);
    w.write_zeros(2);
    w.write_bytes(&body_bytes);
}

pub fn decode_queue_config_request(r: &mut Reader) -> Result<QueueConfigRequest> {
    let port = r.read_u16()?;
    r.skip(2)?;
    Ok(QueueConfigRequest { port })
}

pub fn encode_queue_config_request(w: &mut Writer, request: &QueueConfigRequest) {
    w.write_u16(request.port);
    w.write_zeros(2);
}

/// Decode a `QueueConfigReply` body: fixed port field followed by
/// self-delimited `QueueConfig` records until the enclosing slice is
/// exhausted (spec §3).
pub fn decode_queue_config_reply(r: &mut Reader) -> Result<QueueConfigReply> {
    let port = r.read_u16()?;
    r.skip(6)?;
    let mut queues = Vec::new();
    while r.remaining() > 0 {
        queues.push(decode_queue_config(r)?);
    }
    Ok(QueueConfigReply { port, queues })
}

pub fn encode_queue_config_reply(w: &mut Writer, reply: &QueueConfigReply) {
    w.write_u16(reply.port);
    w.write_zeros(6);
    for queue in &reply.queues {
        encode_queue_config(w, queue);
    }
}

/// Decode a list of `QueueConfig` records, as used by `ExtQueueModify` and
/// `ExtQueueDelete` (spec §3), which carry no `port` prefix of their own
/// inside this sub-list (the port id is a separate message field).
pub fn decode_queue_config_list(r: &mut Reader) -> Result<Vec<QueueConfig>> {
    let mut queues = Vec::new();
    while r.remaining() > 0 {
        queues.push(decode_queue_config(r)?);
    }
    Ok(queues)
}

pub fn encode_queue_config_list(w: &mut Writer, queues: &[QueueConfig]) {
    for queue in queues {
        encode_queue_config(w, queue);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_config_reply_round_trips() {
        let reply = QueueConfigReply {
            port: 3,
            queues: vec![
                QueueConfig { queue_id: 1, properties: vec![QueueProperty::MinRate(100)] },
                QueueConfig { queue_id: 2, properties: vec![] },
            ],
        };
        let mut w = Writer::new();
        encode_queue_config_reply(&mut w, &reply);
        let bytes = w.into_vec();
        let mut r = Reader::new(&bytes);
        assert_eq!(decode_queue_config_reply(&mut r).unwrap(), reply);
    }
}
