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

//! Session controller behaviour over an in-memory transport.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use terminet_session::{
    OptionEvent, SessionConfig, SessionEvent, SessionResult, TelnetCommand, TelnetSession,
    Transport,
};
use tokio::sync::mpsc;

const IAC: u8 = 255;
const SB: u8 = 250;
const SE: u8 = 240;
const WILL: u8 = 251;
const WONT: u8 = 252;
const DO: u8 = 253;
const DONT: u8 = 254;

/// Probe into a [`MockTransport`]'s observable state.
#[derive(Clone)]
struct Probe {
    written: Arc<Mutex<Vec<u8>>>,
    writable: Arc<AtomicBool>,
    destroyed: Arc<AtomicBool>,
}

impl Probe {
    fn take_written(&self) -> Vec<u8> {
        std::mem::take(&mut *self.written.lock().expect("lock"))
    }

    fn set_writable(&self, writable: bool) {
        self.writable.store(writable, Ordering::Relaxed);
    }
}

struct MockTransport {
    probe: Probe,
}

fn mock_transport() -> (MockTransport, Probe) {
    let probe = Probe {
        written: Arc::new(Mutex::new(Vec::new())),
        writable: Arc::new(AtomicBool::new(true)),
        destroyed: Arc::new(AtomicBool::new(false)),
    };
    (
        MockTransport {
            probe: probe.clone(),
        },
        probe,
    )
}

impl Transport for MockTransport {
    fn write(&mut self, bytes: &[u8]) -> SessionResult<()> {
        self.probe
            .written
            .lock()
            .expect("lock")
            .extend_from_slice(bytes);
        Ok(())
    }

    fn end(&mut self) -> SessionResult<()> {
        self.probe.writable.store(false, Ordering::Relaxed);
        Ok(())
    }

    fn destroy(&mut self) {
        self.probe.destroyed.store(true, Ordering::Relaxed);
    }

    fn readable(&self) -> bool {
        !self.probe.destroyed.load(Ordering::Relaxed)
    }

    fn writable(&self) -> bool {
        self.probe.writable.load(Ordering::Relaxed)
            && !self.probe.destroyed.load(Ordering::Relaxed)
    }

    fn destroyed(&self) -> bool {
        self.probe.destroyed.load(Ordering::Relaxed)
    }
}

fn session(
    config: SessionConfig,
) -> (
    TelnetSession<MockTransport>,
    Probe,
    mpsc::UnboundedReceiver<SessionEvent>,
) {
    let (transport, probe) = mock_transport();
    let (session, events) = TelnetSession::new(transport, config);
    (session, probe, events)
}

fn drain(events: &mut mpsc::UnboundedReceiver<SessionEvent>) -> Vec<SessionEvent> {
    let mut out = Vec::new();
    while let Ok(event) = events.try_recv() {
        out.push(event);
    }
    out
}

#[test]
fn tty_mode_solicits_capabilities_on_open() {
    let (session, probe, _events) = session(SessionConfig::default().with_tty(true));
    assert!(session.is_tty());
    assert_eq!(session.columns(), 80);
    assert_eq!(session.rows(), 24);
    assert_eq!(
        probe.take_written(),
        vec![
            IAC, DO, 0x00, // transmit binary
            IAC, DO, 0x18, // terminal type
            IAC, DO, 0x1F, // naws
            IAC, DO, 0x27, // new environ
        ]
    );
}

#[test]
fn non_tty_session_opens_silently() {
    let (session, probe, _events) = session(SessionConfig::default());
    assert!(!session.is_tty());
    assert!(probe.take_written().is_empty());
}

#[test]
fn raw_mode_emits_the_frozen_sequence() {
    let (mut session, probe, _events) = session(SessionConfig::default());
    session.set_raw_mode(true).expect("raw mode on");
    assert!(session.is_raw());
    assert_eq!(
        probe.take_written(),
        vec![IAC, WILL, 0x01, IAC, WILL, 0x03, IAC, DO, 0x03]
    );

    session.set_raw_mode(false).expect("raw mode off");
    assert!(!session.is_raw());
    assert_eq!(
        probe.take_written(),
        vec![IAC, WONT, 0x01, IAC, WONT, 0x03, IAC, DONT, 0x03]
    );
}

#[test]
fn raw_mode_is_a_noop_when_not_writable() {
    let (mut session, probe, _events) = session(SessionConfig::default());
    probe.set_writable(false);
    session.set_raw_mode(true).expect("no-op");
    assert!(!session.is_raw());
    assert!(probe.take_written().is_empty());
}

#[test]
fn write_converts_lone_lf_to_crlf() {
    let (mut session, probe, _events) = session(SessionConfig::default());
    session.write(b"one\ntwo\r\nthree\n").expect("write");
    assert_eq!(probe.take_written(), b"one\r\ntwo\r\nthree\r\n".to_vec());
}

#[test]
fn write_leaves_lf_alone_when_conversion_is_off() {
    let (mut session, probe, _events) =
        session(SessionConfig::default().with_convert_lf(false));
    session.write(b"one\ntwo").expect("write");
    assert_eq!(probe.take_written(), b"one\ntwo".to_vec());
}

#[test]
fn write_escapes_literal_iac_bytes() {
    let (mut session, probe, _events) = session(SessionConfig::default());
    session.write(&[0x41, IAC, 0x42]).expect("write");
    assert_eq!(probe.take_written(), vec![0x41, IAC, IAC, 0x42]);
}

#[test]
fn command_emission_is_idempotent() {
    use terminet_session::TelnetOption;
    let (mut session, probe, _events) = session(SessionConfig::default());
    session.send_do(TelnetOption::Echo).expect("first");
    session.send_do(TelnetOption::Echo).expect("second");
    assert_eq!(probe.take_written(), vec![IAC, DO, 0x01, IAC, DO, 0x01]);
}

#[test]
fn will_terminal_type_is_answered_with_a_send() {
    let (mut session, probe, mut events) = session(SessionConfig::default());
    session.receive(&[IAC, WILL, 0x18]).expect("receive");
    // The solicitation goes out on the wire.
    assert_eq!(probe.take_written(), vec![IAC, SB, 0x18, 0x01, IAC, SE]);
    let published = drain(&mut events);
    assert_eq!(published.len(), 1);
    assert!(matches!(
        &published[0],
        SessionEvent::Command(OptionEvent::TerminalType {
            command: TelnetCommand::Will,
            name: None,
        })
    ));
}

#[test]
fn terminal_type_response_updates_the_session() {
    let (mut session, _probe, mut events) = session(SessionConfig::default());
    assert_eq!(session.terminal(), "ansi");
    session
        .receive(&[
            IAC, SB, 0x18, 0x00, b'X', b'T', b'E', b'R', b'M', IAC, SE,
        ])
        .expect("receive");
    assert_eq!(session.terminal(), "xterm");
    let published = drain(&mut events);
    assert_eq!(published.len(), 1);
    match &published[0] {
        SessionEvent::Command(OptionEvent::TerminalType {
            command: TelnetCommand::Sb,
            name: Some(name),
        }) => assert_eq!(name, "xterm"),
        other => panic!("unexpected event: {other:?}"),
    }
}

#[test]
fn naws_subnegotiation_mirrors_into_session_state() {
    let (mut session, _probe, mut events) = session(SessionConfig::default());
    session
        .receive(&[IAC, SB, 0x1F, 0x00, 0x84, 0x00, 0x32, IAC, SE])
        .expect("receive");
    assert_eq!(session.columns(), 132);
    assert_eq!(session.rows(), 50);
    let published = drain(&mut events);
    assert_eq!(published.len(), 1);
    assert!(matches!(
        &published[0],
        SessionEvent::Command(OptionEvent::WindowSize {
            command: TelnetCommand::Sb,
            size: Some(_),
        })
    ));
}

#[test]
fn environment_updates_are_stored_and_term_mirrors() {
    let (mut session, _probe, mut events) = session(SessionConfig::default());

    let mut update = vec![IAC, SB, 0x27, 0x02, 0x00];
    update.extend_from_slice(b"USER");
    update.push(0x01);
    update.extend_from_slice(b"alice");
    update.extend_from_slice(&[IAC, SE]);
    session.receive(&update).expect("receive");
    assert_eq!(session.env().get("USER").map(String::as_str), Some("alice"));

    let mut term = vec![IAC, SB, 0x27, 0x02, 0x00];
    term.extend_from_slice(b"TERM");
    term.push(0x01);
    term.extend_from_slice(b"VT220");
    term.extend_from_slice(&[IAC, SE]);
    session.receive(&term).expect("receive");
    assert_eq!(session.terminal(), "vt220");
    assert_eq!(session.env().get("TERM").map(String::as_str), Some("vt220"));

    assert_eq!(drain(&mut events).len(), 2);
}

#[test]
fn data_and_options_are_published_in_wire_order() {
    let (mut session, _probe, mut events) = session(SessionConfig::default());
    session.receive(&[0x41, IAC, WILL, 0x2A, 0x42]).expect("receive");
    let published = drain(&mut events);
    assert_eq!(published.len(), 3);
    assert!(matches!(&published[0], SessionEvent::Data(bytes) if &bytes[..] == b"A"));
    assert!(matches!(
        &published[1],
        SessionEvent::Command(OptionEvent::Unknown { option: 42, .. })
    ));
    assert!(matches!(&published[2], SessionEvent::Data(bytes) if &bytes[..] == b"B"));
}

#[test]
fn split_reads_reassemble_frames() {
    let (mut session, _probe, mut events) = session(SessionConfig::default());
    session.receive(&[0x48, 0x49, IAC]).expect("first chunk");
    let first = drain(&mut events);
    assert_eq!(first.len(), 1);
    assert!(matches!(&first[0], SessionEvent::Data(bytes) if &bytes[..] == b"HI"));

    session
        .receive(&[WILL, 0x01, b' ', b'W', b'O', b'R', b'L', b'D'])
        .expect("second chunk");
    let second = drain(&mut events);
    assert_eq!(second.len(), 2);
    assert!(matches!(
        &second[0],
        SessionEvent::Command(OptionEvent::Echo(TelnetCommand::Will))
    ));
    assert!(matches!(&second[1], SessionEvent::Data(bytes) if &bytes[..] == b" WORLD"));
}

#[test]
fn malformed_subnegotiation_reports_error_without_closing() {
    let (mut session, _probe, mut events) = session(SessionConfig::default());
    session
        .receive(&[IAC, SB, 0x1F, 0x00, 0x50, 0x00, 0x18, 0x00, 0x00])
        .expect("receive");
    let published = drain(&mut events);
    assert_eq!(published.len(), 1);
    assert!(matches!(&published[0], SessionEvent::Error(_)));
    assert!(!session.destroyed());

    // The next read decodes normally.
    session.receive(b"still here").expect("receive");
    let next = drain(&mut events);
    assert_eq!(next.len(), 1);
    assert!(matches!(&next[0], SessionEvent::Data(bytes) if &bytes[..] == b"still here"));
}

#[test]
fn end_discards_residue_and_goes_inert() {
    let (mut session, _probe, mut events) = session(SessionConfig::default());
    // Leave half a frame in the residue.
    session.receive(&[IAC, SB, 0x1F, 0x00]).expect("receive");
    assert!(drain(&mut events).is_empty());

    session.handle_end();
    session.handle_close();
    let published = drain(&mut events);
    assert_eq!(published.len(), 2);
    assert!(matches!(&published[0], SessionEvent::End));
    assert!(matches!(&published[1], SessionEvent::Close));

    // No event for the discarded frame, and later reads are ignored.
    session.receive(b"late").expect("receive");
    assert!(drain(&mut events).is_empty());
}
