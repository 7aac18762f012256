#![forbid(unsafe_code)]

pub mod byteio;
pub mod codec;
pub mod config;
pub mod error;
pub mod framing;
pub mod model;
pub mod packet;
pub mod server;
pub mod telemetry;

pub use codec::{decode_cs, decode_sc, encode_cs, encode_sc};
pub use config::{load_from_path, ServerConfig};
pub use error::{ErrorCounters, ProtoError, Result};
pub use framing::OpenFlowCodec;
pub use server::{ConnectionHandle, ConnectionRegistry, Handler, LoggingHandler, OpenFlowServer};
