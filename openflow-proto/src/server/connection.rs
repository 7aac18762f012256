use std::net::SocketAddr;
use std::sync::Arc;

use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::time::timeout;
use tokio_util::codec::Framed;
use tracing::{debug, info, warn};

use crate::codec::{decode_sc, encode_cs};
use crate::config::ServerConfig;
use crate::error::{ErrorCounters, ProtoError};
use crate::framing::OpenFlowCodec;
use crate::model::{CSMessage, SCMessage, SwitchError};

use super::handler::Handler;
use super::metrics::ConnectionCount;
use super::registry::{ConnectionHandle, ConnectionRegistry};

/// Run the OpenFlow handshake and message loop for one accepted switch
/// connection (spec §4.6). Returns once the connection closes, cleanly or
/// otherwise; the caller is responsible for deregistering it from the
/// accept loop's bookkeeping.
pub async fn run(
    stream: TcpStream,
    remote_addr: SocketAddr,
    registry: Arc<ConnectionRegistry>,
    counts: Arc<ConnectionCount>,
    error_counters: Arc<ErrorCounters>,
    handler: Arc<dyn Handler>,
    config: Arc<ServerConfig>,
) {
    let mut framed = Framed::new(stream, OpenFlowCodec::new());

    let handshake = timeout(config.timeouts.handshake(), do_handshake(&mut framed)).await;
    match handshake {
        Ok(Ok(())) => {}
        Ok(Err(err)) => {
            warn!(%remote_addr, error = %err, "handshake failed");
            error_counters.record(&err);
            counts.increment_errors();
            return;
        }
        Err(_) => {
            warn!(%remote_addr, "handshake timed out");
            counts.increment_errors();
            return;
        }
    }
    debug!(%remote_addr, "handshake complete");

    let (mut sink, mut read_half) = framed.split();
    let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<Vec<u8>>();
    let conn_id = registry.register(remote_addr, outbound_tx);
    let conn_handle = ConnectionHandle::new(conn_id, Arc::clone(&registry));

    let writer = tokio::spawn(async move {
        while let Some(frame) = outbound_rx.recv().await {
            if sink.send(frame).await.is_err() {
                break;
            }
        }
    });

    loop {
        let next = timeout(config.timeouts.idle(), read_half.next()).await;
        let raw = match next {
            Ok(Some(Ok(raw))) => raw,
            Ok(Some(Err(err))) => {
                warn!(%remote_addr, error = %err, "frame read failed");
                error_counters.record(&err);
                counts.increment_errors();
                break;
            }
            Ok(None) => {
                info!(%remote_addr, "connection closed by peer");
                break;
            }
            Err(_) => {
                info!(%remote_addr, "connection idle timeout");
                break;
            }
        };

        match decode_sc(&raw) {
            Ok((xid, message)) => {
                handler.handle(conn_handle.clone(), xid, message).await;
            }
            Err(err) => {
                warn!(%remote_addr, error = %err, "decode failed, closing connection");
                error_counters.record(&err);
                counts.increment_errors();
                break;
            }
        }
    }

    registry.remove(conn_id);
    writer.abort();
}

/// Send `Hello`, await the peer's `Hello`, and reject anything else (most
/// notably a version mismatch) with an OpenFlow `Error(HelloFailed,
/// IncompatibleVersions)` before closing (spec §4.6).
async fn do_handshake(framed: &mut Framed<TcpStream, OpenFlowCodec>) -> Result<(), ProtoError> {
    framed.send(encode_cs(0, &CSMessage::Hello)).await?;

    let raw = framed.next().await.ok_or_else(|| {
        ProtoError::Io(std::io::Error::other("connection closed during handshake"))
    })??;

    match decode_sc(&raw) {
        Ok((_, SCMessage::Hello)) => Ok(()),
        Ok(_) => {
            let error = SwitchError::hello_failed_incompatible(Vec::new());
            let _ = framed.send(encode_cs(0, &CSMessage::Error(error))).await;
            Err(ProtoError::InvalidEnum { field: "handshake.first_message", value: 0 })
        }
        Err(err @ ProtoError::VersionMismatch(_)) => {
            let error = SwitchError::hello_failed_incompatible(Vec::new());
            let _ = framed.send(encode_cs(0, &CSMessage::Error(error))).await;
            Err(err)
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode_cs;

    #[test]
    fn handshake_hello_is_version_one_type_zero() {
        let bytes = encode_cs(0, &CSMessage::Hello);
        assert_eq!(bytes[0], 0x01);
        assert_eq!(bytes[1], 0x00);
    }

    #[test]
    fn hello_failed_error_round_trips_as_cs_message() {
        let error = SwitchError::hello_failed_incompatible(Vec::new());
        let bytes = encode_cs(0, &CSMessage::Error(error.clone()));
        let (_, decoded) = decode_cs(&bytes).unwrap();
        assert_eq!(decoded, CSMessage::Error(error));
    }
}
