#![forbid(unsafe_code)]

//! End-to-end server dispatch test (spec §8 scenario 6): a mock switch
//! connects, completes the Hello handshake, then sends one `PacketIn`
//! carrying an ARP-in-Ethernet payload. The handler must see it exactly
//! once with `buffer_id`, `in_port`, `reason`, and the payload preserved.

use std::future::Future;
use std::net::{SocketAddr, TcpListener as StdTcpListener};
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use openflow_proto::config::ServerConfig;
use openflow_proto::model::{CSMessage, PacketIn, PacketInReason, SCMessage, TransactionId};
use openflow_proto::server::{ConnectionHandle, Handler, OpenFlowServer};
use openflow_proto::{decode_cs, encode_sc};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::watch;
use tokio::time::sleep;

fn pick_free_port() -> SocketAddr {
    let listener = StdTcpListener::bind("127.0.0.1:0").expect("bind ephemeral");
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

struct RecordingHandler {
    count: AtomicUsize,
    seen: Mutex<Vec<SCMessage>>,
}

impl Handler for RecordingHandler {
    fn handle(
        &self,
        _conn: ConnectionHandle,
        _xid: TransactionId,
        message: SCMessage,
    ) -> Pin<Box<dyn Future<Output = ()> + Send>> {
        self.count.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(message);
        Box::pin(async move {})
    }
}

async fn read_one_frame(stream: &mut TcpStream) -> Vec<u8> {
    let mut prefix = [0u8; 4];
    stream.read_exact(&mut prefix).await.unwrap();
    let length = u16::from_be_bytes([prefix[2], prefix[3]]) as usize;
    let mut rest = vec![0u8; length - 4];
    stream.read_exact(&mut rest).await.unwrap();
    let mut frame = prefix.to_vec();
    frame.extend_from_slice(&rest);
    frame
}

#[tokio::test]
async fn mock_switch_packet_in_reaches_handler_exactly_once() {
    let listen = pick_free_port();
    let config = ServerConfig { listen, ..ServerConfig::default() };
    let handler = Arc::new(RecordingHandler { count: AtomicUsize::new(0), seen: Mutex::new(Vec::new()) });
    let server = OpenFlowServer::new(config, handler.clone());

    let (_shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let server_task = tokio::spawn(async move { server.run(&mut shutdown_rx).await });
    sleep(Duration::from_millis(50)).await;

    let mut client = TcpStream::connect(listen).await.unwrap();

    // Handshake: controller speaks first.
    let hello = read_one_frame(&mut client).await;
    let (_, decoded) = decode_cs(&hello).unwrap();
    assert_eq!(decoded, CSMessage::Hello);
    client.write_all(&encode_sc(0, &SCMessage::Hello)).await.unwrap();

    // ARP request payload riding inside the captured frame.
    let arp_frame = openflow_proto::packet::arp::arp_query(
        openflow_proto::packet::ethernet::MacAddr([0, 1, 2, 3, 4, 5]),
        [10, 0, 0, 1],
        [10, 0, 0, 2],
    );
    let packet_in = PacketIn {
        buffer_id: Some(99),
        total_len: arp_frame.len() as u16,
        in_port: 3,
        reason: PacketInReason::NoMatch,
        data: arp_frame.clone(),
    };
    let frame = encode_sc(7, &SCMessage::PacketIn(packet_in.clone()));
    client.write_all(&frame).await.unwrap();

    sleep(Duration::from_millis(100)).await;

    assert_eq!(handler.count.load(Ordering::SeqCst), 1);
    let seen = handler.seen.lock().unwrap();
    match &seen[0] {
        SCMessage::PacketIn(received) => assert_eq!(received, &packet_in),
        other => panic!("expected PacketIn, got {other:?}"),
    }

    server_task.abort();
}
