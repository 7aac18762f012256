use crate::error::{ProtoError, Result};

pub const OFP_VERSION: u8 = 0x01;
pub const OFP_HEADER_LEN: usize = 8;
pub const OFP_MAX_LEN: usize = 65535;

/// 32-bit transaction id correlating requests with replies (spec §3).
pub type TransactionId = u32;

/// Canonical OpenFlow 1.0 message type discriminants (spec §4.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Hello,
    Error,
    EchoRequest,
    EchoReply,
    Vendor,
    FeaturesRequest,
    FeaturesReply,
    GetConfigRequest,
    GetConfigReply,
    SetConfig,
    PacketIn,
    FlowRemoved,
    PortStatus,
    PacketOut,
    FlowMod,
    PortMod,
    StatsRequest,
    StatsReply,
    BarrierRequest,
    BarrierReply,
    QueueGetConfigRequest,
    QueueGetConfigReply,
}

impl MessageType {
    pub fn code(self) -> u8 {
        match self {
            MessageType::Hello => 0,
            MessageType::Error => 1,
            MessageType::EchoRequest => 2,
            MessageType::EchoReply => 3,
            MessageType::Vendor => 4,
            MessageType::FeaturesRequest => 5,
            MessageType::FeaturesReply => 6,
            MessageType::GetConfigRequest => 7,
            MessageType::GetConfigReply => 8,
            MessageType::SetConfig => 9,
            MessageType::PacketIn => 10,
            MessageType::FlowRemoved => 11,
            MessageType::PortStatus => 12,
            MessageType::PacketOut => 13,
            MessageType::FlowMod => 14,
            MessageType::PortMod => 15,
            MessageType::StatsRequest => 16,
            MessageType::StatsReply => 17,
            MessageType::BarrierRequest => 18,
            MessageType::BarrierReply => 19,
            MessageType::QueueGetConfigRequest => 20,
            MessageType::QueueGetConfigReply => 21,
        }
    }

    pub fn from_code(code: u8) -> Result<MessageType> {
        Ok(match code {
            0 => MessageType::Hello,
            1 => MessageType::Error,
            2 => MessageType::EchoRequest,
            3 => MessageType::EchoReply,
            4 => MessageType::Vendor,
            5 => MessageType::FeaturesRequest,
            6 => MessageType::FeaturesReply,
            7 => MessageType::GetConfigRequest,
            8 => MessageType::GetConfigReply,
            9 => MessageType::SetConfig,
            10 => MessageType::PacketIn,
            11 => MessageType::FlowRemoved,
            12 => MessageType::PortStatus,
            13 => MessageType::PacketOut,
            14 => MessageType::FlowMod,
            15 => MessageType::PortMod,
            16 => MessageType::StatsRequest,
            17 => MessageType::StatsReply,
            18 => MessageType::BarrierRequest,
            19 => MessageType::BarrierReply,
            20 => MessageType::QueueGetConfigRequest,
            21 => MessageType::QueueGetConfigReply,
            other => return Err(ProtoError::UnknownMessageType(other)),
        })
    }
}

/// The 8-byte header every OpenFlow message begins with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OfHeader {
    pub msg_type: MessageType,
    pub length: u16,
    pub xid: TransactionId,
}
