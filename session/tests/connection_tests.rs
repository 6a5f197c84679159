//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! Adapter and server tests over real async streams.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;
use terminet_session::{
    ServerConfig, SessionConfig, SessionConnection, SessionEvent, SessionHandle, SessionHandler,
    TelnetServer,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::time::timeout;

const IAC: u8 = 255;
const SB: u8 = 250;
const SE: u8 = 240;
const WILL: u8 = 251;
const DO: u8 = 253;

async fn next_event(events: &mut mpsc::UnboundedReceiver<SessionEvent>) -> SessionEvent {
    timeout(Duration::from_secs(1), events.recv())
        .await
        .expect("timed out waiting for event")
        .expect("event channel closed")
}

#[tokio::test]
async fn data_flows_from_peer_to_events() {
    let (mut peer, server_side) = tokio::io::duplex(1024);
    let (_handle, mut events) = SessionConnection::spawn(server_side, SessionConfig::default());

    peer.write_all(b"hello").await.expect("peer write");
    match next_event(&mut events).await {
        SessionEvent::Data(bytes) => assert_eq!(&bytes[..], b"hello"),
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn handle_write_applies_lf_conversion() {
    let (mut peer, server_side) = tokio::io::duplex(1024);
    let (handle, _events) = SessionConnection::spawn(server_side, SessionConfig::default());

    handle.write(&b"hi\n"[..]).expect("queue write");
    let mut buffer = [0u8; 4];
    peer.read_exact(&mut buffer).await.expect("peer read");
    assert_eq!(&buffer, b"hi\r\n");
}

#[tokio::test]
async fn will_terminal_type_gets_a_solicitation_on_the_wire() {
    let (mut peer, server_side) = tokio::io::duplex(1024);
    let (_handle, mut events) = SessionConnection::spawn(server_side, SessionConfig::default());

    peer.write_all(&[IAC, WILL, 0x18]).await.expect("peer write");
    match next_event(&mut events).await {
        SessionEvent::Command(_) => {}
        other => panic!("unexpected event: {other:?}"),
    }

    let mut buffer = [0u8; 6];
    peer.read_exact(&mut buffer).await.expect("peer read");
    assert_eq!(buffer, [IAC, SB, 0x18, 0x01, IAC, SE]);
}

#[tokio::test]
async fn peer_close_publishes_end_then_close() {
    let (peer, server_side) = tokio::io::duplex(1024);
    let (_handle, mut events) = SessionConnection::spawn(server_side, SessionConfig::default());

    drop(peer);
    assert!(matches!(next_event(&mut events).await, SessionEvent::End));
    assert!(matches!(next_event(&mut events).await, SessionEvent::Close));
}

#[tokio::test]
async fn destroy_severs_the_connection() {
    let (_peer, server_side) = tokio::io::duplex(1024);
    let (handle, mut events) = SessionConnection::spawn(server_side, SessionConfig::default());

    handle.destroy().expect("destroy");
    assert!(matches!(next_event(&mut events).await, SessionEvent::Close));
}

struct RecordingHandler {
    connected: mpsc::UnboundedSender<SocketAddr>,
}

#[async_trait]
impl SessionHandler for RecordingHandler {
    async fn on_session(
        &self,
        peer: SocketAddr,
        _handle: SessionHandle,
        mut events: mpsc::UnboundedReceiver<SessionEvent>,
    ) {
        let _ = self.connected.send(peer);
        while let Some(event) = events.recv().await {
            if matches!(event, SessionEvent::Close) {
                break;
            }
        }
    }
}

#[tokio::test]
async fn server_greets_tty_sessions_on_accept() {
    let config = ServerConfig::new("127.0.0.1:0".parse().expect("addr"))
        .with_session(SessionConfig::default().with_tty(true));
    let server = TelnetServer::bind(config).await.expect("bind");
    let addr = server.local_addr().expect("local addr");

    let (connected_tx, mut connected_rx) = mpsc::unbounded_channel();
    tokio::spawn(server.serve(Arc::new(RecordingHandler {
        connected: connected_tx,
    })));

    let mut client = TcpStream::connect(addr).await.expect("connect");
    timeout(Duration::from_secs(1), connected_rx.recv())
        .await
        .expect("timed out waiting for accept")
        .expect("server dropped");

    // The tty greeting arrives unprompted.
    let mut greeting = [0u8; 12];
    timeout(Duration::from_secs(1), client.read_exact(&mut greeting))
        .await
        .expect("timed out reading greeting")
        .expect("read greeting");
    assert_eq!(
        greeting,
        [
            IAC, DO, 0x00, // transmit binary
            IAC, DO, 0x18, // terminal type
            IAC, DO, 0x1F, // naws
            IAC, DO, 0x27, // new environ
        ]
    );
}
