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

//! Tokio transport adapter
//!
//! This module binds a [`TelnetSession`] to an `AsyncRead + AsyncWrite`
//! stream using two background workers:
//!
//! - **Read worker**: owns the session; interleaves inbound chunk reads with
//!   application commands arriving through the [`SessionHandle`], so each
//!   chunk is processed to completion before the next and session state is
//!   never shared across threads.
//! - **Write worker**: owns the write half; drains a queue of encoded wire
//!   buffers, flushing when the queue empties and republishing a `Drain`
//!   event after bursts.
//!
//! Reads never block writes and vice versa.

use crate::config::SessionConfig;
use crate::event::SessionEvent;
use crate::result::{SessionError, SessionResult};
use crate::session::TelnetSession;
use crate::transport::Transport;
use bytes::{Bytes, BytesMut};
use terminet_telnetcodec::TelnetOption;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tracing::trace;

const READ_BUFFER_SIZE: usize = 8192;

/// Commands accepted by the write worker.
enum WriteCommand {
    Send(Bytes),
    End,
    Destroy,
}

/// Commands forwarded from a [`SessionHandle`] to the session inside the
/// read worker.
enum SessionCommand {
    Write(Bytes),
    Do(TelnetOption),
    Dont(TelnetOption),
    Will(TelnetOption),
    Wont(TelnetOption),
    SetRawMode(bool),
    RequestEnvironment,
    Pause,
    Resume,
    End,
    Destroy,
}

/// A clonable handle to a session running inside a [`SessionConnection`].
///
/// Every method is fire-and-forget: the command is queued for the read
/// worker, which applies it to the session between reads. The only error is
/// [`SessionError::Closed`], raised when the workers have shut down.
#[derive(Clone)]
pub struct SessionHandle {
    commands: mpsc::UnboundedSender<SessionCommand>,
}

impl SessionHandle {
    fn send(&self, command: SessionCommand) -> SessionResult<()> {
        self.commands
            .send(command)
            .map_err(|_| SessionError::Closed)
    }

    /// Writes user data, subject to the session's LF conversion and IAC
    /// escaping.
    pub fn write(&self, bytes: impl Into<Bytes>) -> SessionResult<()> {
        self.send(SessionCommand::Write(bytes.into()))
    }

    /// Sends `IAC DO <option>`.
    pub fn send_do(&self, option: TelnetOption) -> SessionResult<()> {
        self.send(SessionCommand::Do(option))
    }

    /// Sends `IAC DONT <option>`.
    pub fn send_dont(&self, option: TelnetOption) -> SessionResult<()> {
        self.send(SessionCommand::Dont(option))
    }

    /// Sends `IAC WILL <option>`.
    pub fn send_will(&self, option: TelnetOption) -> SessionResult<()> {
        self.send(SessionCommand::Will(option))
    }

    /// Sends `IAC WONT <option>`.
    pub fn send_wont(&self, option: TelnetOption) -> SessionResult<()> {
        self.send(SessionCommand::Wont(option))
    }

    /// Switches the peer's terminal in or out of raw mode.
    pub fn set_raw_mode(&self, enabled: bool) -> SessionResult<()> {
        self.send(SessionCommand::SetRawMode(enabled))
    }

    /// Solicits the peer's environment variables.
    pub fn request_environment(&self) -> SessionResult<()> {
        self.send(SessionCommand::RequestEnvironment)
    }

    /// Pauses inbound reads.
    pub fn pause(&self) -> SessionResult<()> {
        self.send(SessionCommand::Pause)
    }

    /// Resumes inbound reads.
    pub fn resume(&self) -> SessionResult<()> {
        self.send(SessionCommand::Resume)
    }

    /// Gracefully shuts down the outbound half.
    pub fn end(&self) -> SessionResult<()> {
        self.send(SessionCommand::End)
    }

    /// Severs the connection immediately.
    pub fn destroy(&self) -> SessionResult<()> {
        self.send(SessionCommand::Destroy)
    }
}

/// Channel-backed [`Transport`] feeding the write worker.
///
/// Owned exclusively by the session inside the read worker, so its state is
/// plain fields rather than shared atomics.
struct ChannelTransport {
    writes: mpsc::UnboundedSender<WriteCommand>,
    paused: bool,
    ended: bool,
    destroyed: bool,
}

impl Transport for ChannelTransport {
    fn write(&mut self, bytes: &[u8]) -> SessionResult<()> {
        if !self.writable() {
            return Err(SessionError::NotWritable);
        }
        self.writes
            .send(WriteCommand::Send(Bytes::copy_from_slice(bytes)))
            .map_err(|_| SessionError::Closed)
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn resume(&mut self) {
        self.paused = false;
    }

    fn end(&mut self) -> SessionResult<()> {
        self.ended = true;
        self.writes
            .send(WriteCommand::End)
            .map_err(|_| SessionError::Closed)
    }

    fn destroy(&mut self) {
        self.destroyed = true;
        let _ = self.writes.send(WriteCommand::Destroy);
    }

    fn readable(&self) -> bool {
        !self.paused && !self.destroyed
    }

    fn writable(&self) -> bool {
        !self.ended && !self.destroyed && !self.writes.is_closed()
    }

    fn destroyed(&self) -> bool {
        self.destroyed
    }
}

/// Spawns the read/write workers that drive one session over a stream.
pub struct SessionConnection;

impl SessionConnection {
    /// Splits `stream` and spawns the session workers, returning the
    /// application-facing handle and event receiver.
    pub fn spawn<S>(
        stream: S,
        config: SessionConfig,
    ) -> (SessionHandle, mpsc::UnboundedReceiver<SessionEvent>)
    where
        S: AsyncRead + AsyncWrite + Send + Unpin + 'static,
    {
        let (reader, writer) = tokio::io::split(stream);
        let (write_tx, write_rx) = mpsc::unbounded_channel();
        let (command_tx, command_rx) = mpsc::unbounded_channel();

        let transport = ChannelTransport {
            writes: write_tx,
            paused: false,
            ended: false,
            destroyed: false,
        };
        let (session, events) = TelnetSession::new(transport, config);

        tokio::spawn(write_worker(writer, write_rx, session.event_sender()));
        tokio::spawn(read_worker(reader, session, command_rx));

        (
            SessionHandle {
                commands: command_tx,
            },
            events,
        )
    }
}

async fn write_worker<W: AsyncWrite + Unpin>(
    mut writer: W,
    mut commands: mpsc::UnboundedReceiver<WriteCommand>,
    events: mpsc::UnboundedSender<SessionEvent>,
) {
    let mut burst = 0usize;
    while let Some(command) = commands.recv().await {
        match command {
            WriteCommand::Send(bytes) => {
                burst += 1;
                if let Err(error) = writer.write_all(&bytes).await {
                    let _ = events.send(SessionEvent::Error(error.into()));
                    break;
                }
                if commands.is_empty() {
                    if let Err(error) = writer.flush().await {
                        let _ = events.send(SessionEvent::Error(error.into()));
                        break;
                    }
                    // A burst that queued up behind the writer is the
                    // adapter's back-pressure signal.
                    if burst > 1 {
                        let _ = events.send(SessionEvent::Drain);
                    }
                    burst = 0;
                }
            }
            WriteCommand::End => {
                let _ = writer.shutdown().await;
                break;
            }
            WriteCommand::Destroy => break,
        }
    }
    trace!("write worker finished");
}

async fn read_worker<R: AsyncRead + Unpin>(
    mut reader: R,
    mut session: TelnetSession<ChannelTransport>,
    mut commands: mpsc::UnboundedReceiver<SessionCommand>,
) {
    let mut buffer = BytesMut::with_capacity(READ_BUFFER_SIZE);
    let mut commands_open = true;
    loop {
        tokio::select! {
            command = commands.recv(), if commands_open => match command {
                Some(command) => {
                    if apply_command(&mut session, command) {
                        break;
                    }
                }
                None => commands_open = false,
            },
            result = reader.read_buf(&mut buffer), if session.readable() => match result {
                Ok(0) => {
                    session.handle_end();
                    session.handle_close();
                    break;
                }
                Ok(_) => {
                    let chunk = buffer.split();
                    if let Err(error) = session.receive(&chunk) {
                        session.handle_error(error);
                    }
                }
                Err(error) => {
                    session.handle_error(error.into());
                    session.handle_close();
                    break;
                }
            },
            else => break,
        }
    }
    trace!("read worker finished");
}

/// Applies one application command; returns true when the worker should
/// stop.
fn apply_command(session: &mut TelnetSession<ChannelTransport>, command: SessionCommand) -> bool {
    let result = match command {
        SessionCommand::Write(bytes) => session.write(&bytes),
        SessionCommand::Do(option) => session.send_do(option),
        SessionCommand::Dont(option) => session.send_dont(option),
        SessionCommand::Will(option) => session.send_will(option),
        SessionCommand::Wont(option) => session.send_wont(option),
        SessionCommand::SetRawMode(enabled) => session.set_raw_mode(enabled),
        SessionCommand::RequestEnvironment => session.request_environment(),
        SessionCommand::Pause => {
            session.pause();
            Ok(())
        }
        SessionCommand::Resume => {
            session.resume();
            Ok(())
        }
        SessionCommand::End => session.end(),
        SessionCommand::Destroy => {
            session.destroy();
            session.handle_close();
            return true;
        }
    };
    if let Err(error) = result {
        session.handle_error(error);
    }
    false
}
