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

use crate::config::SessionConfig;
use crate::event::SessionEvent;
use crate::result::{SessionError, SessionResult};
use crate::transport::Transport;
use bytes::{BufMut, BytesMut};
use std::collections::HashMap;
use terminet_telnetcodec::{
    EnvEntry, OptionEvent, TelnetCodec, TelnetCommand, TelnetEvent, TelnetFrame, TelnetOption,
    TerminalType, WindowSize, consts,
};
use tokio::sync::mpsc;
use tracing::debug;

/// One connected Telnet peer.
///
/// The session binds the protocol engine to a [`Transport`], tracks what the
/// peer has announced about itself (window size, terminal type, environment
/// variables), exposes the outbound negotiation API, and publishes
/// [`SessionEvent`]s to the channel handed out at construction.
///
/// A session is single-threaded: each inbound chunk passed to
/// [`TelnetSession::receive`] is processed to completion before the next,
/// and events are published in strict wire order.
pub struct TelnetSession<T: Transport> {
    transport: T,
    codec: TelnetCodec,
    config: SessionConfig,
    events: mpsc::UnboundedSender<SessionEvent>,
    size: WindowSize,
    terminal: String,
    env: HashMap<String, String>,
    is_raw: bool,
    is_tty: bool,
    open: bool,
}

impl<T: Transport> TelnetSession<T> {
    /// Creates a session over `transport` and returns it with the receiving
    /// end of its event channel.
    ///
    /// With [`SessionConfig::tty`] set, the session opens by soliciting the
    /// peer's capabilities: `DO TRANSMIT-BINARY`, `DO TERMINAL-TYPE`,
    /// `DO NAWS`, `DO NEW-ENVIRON`. A transport failure during that greeting
    /// is published as an [`SessionEvent::Error`] rather than failing
    /// construction.
    pub fn new(
        transport: T,
        config: SessionConfig,
    ) -> (TelnetSession<T>, mpsc::UnboundedReceiver<SessionEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let mut session = TelnetSession {
            transport,
            codec: TelnetCodec::new(),
            size: WindowSize::new(config.width, config.height),
            terminal: config.terminal_type.clone(),
            env: HashMap::new(),
            is_raw: false,
            is_tty: config.tty,
            open: true,
            config,
            events,
        };
        if session.is_tty {
            let greeting = [
                TelnetOption::TransmitBinary,
                TelnetOption::TerminalType,
                TelnetOption::NAWS,
                TelnetOption::NEW_ENVIRON,
            ];
            for option in greeting {
                if let Err(error) = session.send_do(option) {
                    session.publish(SessionEvent::Error(error));
                    break;
                }
            }
        }
        (session, receiver)
    }

    /// Feeds one inbound chunk through the protocol engine.
    ///
    /// Decoded events are published in wire order; window size, terminal
    /// type, and environment announcements update the session state before
    /// their event is published. A structural protocol violation publishes
    /// an [`SessionEvent::Error`] and abandons the rest of this read - the
    /// transport stays open. A zero-length chunk is a no-op, as is any read
    /// arriving after the session has ended.
    pub fn receive(&mut self, chunk: &[u8]) -> SessionResult<()> {
        if !self.open || chunk.is_empty() {
            return Ok(());
        }
        self.codec.push(chunk);
        loop {
            match self.codec.poll_event() {
                Ok(Some(event)) => self.handle_event(event)?,
                Ok(None) => break,
                Err(error) => {
                    self.publish(SessionEvent::Error(SessionError::Codec(error)));
                    break;
                }
            }
        }
        Ok(())
    }

    fn handle_event(&mut self, event: TelnetEvent) -> SessionResult<()> {
        match event {
            TelnetEvent::Data(bytes) => self.publish(SessionEvent::Data(bytes)),
            TelnetEvent::Option(option) => {
                if self.config.debug {
                    debug!(event = %option, "decoded option frame");
                }
                match &option {
                    OptionEvent::WindowSize {
                        command: TelnetCommand::Sb,
                        size: Some(size),
                    } => {
                        self.size = *size;
                    }
                    OptionEvent::TerminalType { command, name } => match (*command, name) {
                        (TelnetCommand::Sb, Some(name)) => {
                            self.terminal = name.clone();
                        }
                        (TelnetCommand::Will, None) => {
                            // A peer willing to talk TERMINAL-TYPE gets an
                            // immediate SEND to solicit the actual name.
                            self.solicit_terminal_type()?;
                        }
                        _ => {}
                    },
                    OptionEvent::Environment {
                        command: TelnetCommand::Sb,
                        entry: Some(entry),
                    } => {
                        self.store_environment(entry.clone());
                    }
                    _ => {}
                }
                self.publish(SessionEvent::Command(option));
            }
        }
        Ok(())
    }

    fn store_environment(&mut self, entry: EnvEntry) {
        if entry.name == "TERM" {
            self.terminal = entry.value.clone();
        }
        self.env.insert(entry.name, entry.value);
    }

    /// Writes user data to the peer.
    ///
    /// With [`SessionConfig::convert_lf`] set (the default), a `\n` not
    /// already preceded by `\r` within this write is rewritten to `\r\n`.
    /// Literal 0xFF bytes are escaped to `IAC IAC` on the wire.
    pub fn write(&mut self, bytes: &[u8]) -> SessionResult<()> {
        let mut wire = BytesMut::with_capacity(bytes.len() + 2);
        let mut previous = None;
        for &byte in bytes {
            if self.config.convert_lf && byte == consts::LF && previous != Some(consts::CR) {
                wire.put_u8(consts::CR);
            }
            if byte == consts::IAC {
                wire.put_u8(consts::IAC);
            }
            wire.put_u8(byte);
            previous = Some(byte);
        }
        self.transport.write(&wire)
    }

    /// Writes a text line followed by `\r\n`.
    pub fn writeln(&mut self, text: &str) -> SessionResult<()> {
        self.write(text.as_bytes())?;
        self.transport.write(b"\r\n")
    }

    /// Sends `IAC DO <option>`.
    pub fn send_do(&mut self, option: TelnetOption) -> SessionResult<()> {
        self.send_frame(TelnetFrame::Do(option))
    }

    /// Sends `IAC DONT <option>`.
    pub fn send_dont(&mut self, option: TelnetOption) -> SessionResult<()> {
        self.send_frame(TelnetFrame::Dont(option))
    }

    /// Sends `IAC WILL <option>`.
    pub fn send_will(&mut self, option: TelnetOption) -> SessionResult<()> {
        self.send_frame(TelnetFrame::Will(option))
    }

    /// Sends `IAC WONT <option>`.
    pub fn send_wont(&mut self, option: TelnetOption) -> SessionResult<()> {
        self.send_frame(TelnetFrame::Wont(option))
    }

    /// Solicits the peer's terminal name: `IAC SB 24 SEND IAC SE`.
    pub fn solicit_terminal_type(&mut self) -> SessionResult<()> {
        let mut payload = BytesMut::with_capacity(1);
        TerminalType::encode_send(&mut payload);
        self.send_frame(TelnetFrame::Subnegotiate(
            TelnetOption::TerminalType,
            payload.freeze(),
        ))
    }

    /// Solicits the peer's environment: `IAC SB 39 SEND IAC SE`.
    pub fn request_environment(&mut self) -> SessionResult<()> {
        let mut payload = BytesMut::with_capacity(1);
        EnvEntry::encode_send(&mut payload);
        self.send_frame(TelnetFrame::Subnegotiate(
            TelnetOption::NEW_ENVIRON,
            payload.freeze(),
        ))
    }

    /// Switches the peer's terminal in or out of raw mode.
    ///
    /// Enabling emits, in this order: `WILL ECHO`, `WILL SUPPRESS-GO-AHEAD`,
    /// `DO SUPPRESS-GO-AHEAD`. Disabling emits the matching `WONT`/`DONT`
    /// sequence. The order is stable API; peers and tests may rely on it.
    /// A no-op if the transport is not writable.
    pub fn set_raw_mode(&mut self, enabled: bool) -> SessionResult<()> {
        if !self.transport.writable() {
            return Ok(());
        }
        if enabled {
            self.send_will(TelnetOption::Echo)?;
            self.send_will(TelnetOption::SuppressGoAhead)?;
            self.send_do(TelnetOption::SuppressGoAhead)?;
        } else {
            self.send_wont(TelnetOption::Echo)?;
            self.send_wont(TelnetOption::SuppressGoAhead)?;
            self.send_dont(TelnetOption::SuppressGoAhead)?;
        }
        self.is_raw = enabled;
        Ok(())
    }

    fn send_frame(&mut self, frame: TelnetFrame) -> SessionResult<()> {
        let mut wire = BytesMut::with_capacity(frame.wire_len());
        frame.encode(&mut wire);
        self.transport.write(&wire)
    }

    /// Pauses inbound reads.
    pub fn pause(&mut self) {
        self.transport.pause();
    }

    /// Resumes inbound reads.
    pub fn resume(&mut self) {
        self.transport.resume();
    }

    /// Gracefully shuts down the outbound half of the transport.
    pub fn end(&mut self) -> SessionResult<()> {
        self.transport.end()
    }

    /// Severs the transport immediately.
    pub fn destroy(&mut self) {
        self.transport.destroy();
    }

    /// The peer half-closed the connection: discard any partial frame,
    /// publish [`SessionEvent::End`], and go inert.
    pub fn handle_end(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        self.codec.reset();
        self.publish(SessionEvent::End);
    }

    /// The transport is fully closed: publish [`SessionEvent::Close`].
    pub fn handle_close(&mut self) {
        self.open = false;
        self.codec.reset();
        self.publish(SessionEvent::Close);
    }

    /// Forwards a transport-level error to the application.
    pub fn handle_error(&mut self, error: SessionError) {
        self.publish(SessionEvent::Error(error));
    }

    /// Republishes the transport's back-pressure drain signal.
    pub fn handle_drain(&mut self) {
        self.publish(SessionEvent::Drain);
    }

    fn publish(&self, event: SessionEvent) {
        // A dropped receiver just means nobody is listening anymore.
        let _ = self.events.send(event);
    }

    pub(crate) fn event_sender(&self) -> mpsc::UnboundedSender<SessionEvent> {
        self.events.clone()
    }

    /// Current terminal width in columns.
    pub fn columns(&self) -> u16 {
        self.size.cols
    }

    /// Current terminal height in rows.
    pub fn rows(&self) -> u16 {
        self.size.rows
    }

    /// Current window size.
    pub fn window_size(&self) -> WindowSize {
        self.size
    }

    /// The peer's announced terminal type, lowercased. Defaults to the
    /// configured type until the peer says otherwise.
    pub fn terminal(&self) -> &str {
        &self.terminal
    }

    /// Environment variables the peer has announced.
    pub fn env(&self) -> &HashMap<String, String> {
        &self.env
    }

    /// Whether raw mode has been negotiated on.
    pub fn is_raw(&self) -> bool {
        self.is_raw
    }

    /// Whether this session was opened in tty mode.
    pub fn is_tty(&self) -> bool {
        self.is_tty
    }

    /// Whether inbound reads are being delivered.
    pub fn readable(&self) -> bool {
        self.transport.readable()
    }

    /// Whether the transport accepts writes.
    pub fn writable(&self) -> bool {
        self.transport.writable()
    }

    /// Whether the transport has been severed.
    pub fn destroyed(&self) -> bool {
        self.transport.destroyed()
    }
}
