//! OpenFlow 1.0 algebraic message model (spec §3, §4.3).
//!
//! Pure data types only; wire encode/decode lives in `crate::codec`. Every
//! variant carries enough information to reproduce its exact bit-level wire
//! form, including fields that are semantically inert (a wildcarded `Match`
//! field, a `Delete` `FlowMod`'s `priority`) but wire-present.

pub mod action;
pub mod error_msg;
pub mod features;
pub mod flow;
pub mod header;
pub mod match_;
pub mod message;
pub mod packet_io;
pub mod port;
pub mod queue;
pub mod stats;

pub use action::Action;
pub use error_msg::SwitchError;
pub use features::{PhyPort, SwitchFeatures};
pub use flow::{FlowMod, FlowModCommand, FlowRemoved, FlowRemovedReason};
pub use header::{MessageType, OfHeader, TransactionId, OFP_HEADER_LEN, OFP_VERSION};
pub use match_::{Match, Wildcards};
pub use message::{CSMessage, PortId, SCMessage};
pub use packet_io::{PacketIn, PacketInReason, PacketOut};
pub use port::{PortMod, PortStatus, PortStatusReason};
pub use queue::{QueueConfig, QueueConfigReply, QueueConfigRequest, QueueProperty};
pub use stats::{StatsReply, StatsRequest};
