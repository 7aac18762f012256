pub const OFPQT_MIN_RATE: u16 = 1;

/// A single queue property. Only `min-rate` is defined by OpenFlow 1.0; a
/// rate of `0xFFFF` means "no guarantee" (unused here but preserved as a
/// literal value so it round-trips).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueProperty {
    MinRate(u16),
}

impl QueueProperty {
    pub fn property_type(self) -> u16 {
        match self {
            QueueProperty::MinRate(_) => OFPQT_MIN_RATE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueConfig {
    pub queue_id: u32,
    pub properties: Vec<QueueProperty>,
}

/// Controller→switch request for a port's queue configuration (spec §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueConfigRequest {
    pub port: u16,
}

/// Switch→controller reply listing a port's configured queues (spec §3).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueConfigReply {
    pub port: u16,
    pub queues: Vec<QueueConfig>,
}
