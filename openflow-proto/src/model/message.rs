use super::error_msg::SwitchError;
use super::features::SwitchFeatures;
use super::flow::{FlowMod, FlowRemoved};
use super::packet_io::{PacketIn, PacketOut};
use super::port::{PortMod, PortStatus};
use super::queue::{QueueConfig, QueueConfigReply, QueueConfigRequest};
use super::stats::{StatsReply, StatsRequest};

pub type PortId = u16;

/// Switch→controller messages (spec §3).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SCMessage {
    Hello,
    EchoRequest(Vec<u8>),
    EchoReply(Vec<u8>),
    Features(SwitchFeatures),
    PacketIn(PacketIn),
    PortStatus(PortStatus),
    FlowRemoved(FlowRemoved),
    StatsReply(StatsReply),
    Error(SwitchError),
    BarrierReply,
    QueueConfigReply(QueueConfigReply),
    /// Reply to `CSMessage::GetConfigRequest`. Not named in the original
    /// taxonomy but required to dispatch type code 8 (spec §4.4); shares
    /// its body shape with `SetConfig` (spec §9).
    GetConfigReply { flags: u16, miss_send_len: u16 },
}

/// Controller→switch messages (spec §3).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CSMessage {
    Hello,
    EchoRequest(Vec<u8>),
    EchoReply(Vec<u8>),
    FeaturesRequest,
    PacketOut(PacketOut),
    FlowMod(FlowMod),
    PortMod(PortMod),
    StatsRequest(StatsRequest),
    BarrierRequest,
    /// OpenFlow 1.0 defines a 4-byte body here (`flags`, `miss_send_len`);
    /// this is emitted on encode even though earlier tooling this codec
    /// was modeled on sent an empty payload.
    SetConfig { flags: u16, miss_send_len: u16 },
    ExtQueueModify(PortId, Vec<QueueConfig>),
    ExtQueueDelete(PortId, Vec<QueueConfig>),
    Vendor(Vec<u8>),
    GetQueueConfig(QueueConfigRequest),
    /// Request for the switch's current config. Not named in the original
    /// taxonomy but required to dispatch type code 7 (spec §4.4).
    GetConfigRequest,
    /// OpenFlow's `Error` message type is bidirectional on the wire; the
    /// handshake failure path (spec §4.6) requires the controller to be
    /// able to send one even though the source taxonomy only lists `Error`
    /// under `SCMessage`.
    Error(SwitchError),
}
