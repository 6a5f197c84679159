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

use crate::args::environ::EnvEntry;
use crate::args::naws::WindowSize;
use crate::command::TelnetCommand;
use crate::options::TelnetOption;
use bytes::Bytes;
use std::fmt::Formatter;

///
/// `TelnetEvent` is what the engine produces from an inbound byte stream:
/// spans of user data interleaved, in wire order, with decoded option
/// events.
///
/// Data spans are contiguous runs of user bytes with `IAC IAC` escape pairs
/// already collapsed to single 0xFF bytes. Span boundaries depend on where
/// frames and read boundaries fall; the concatenation of all spans is
/// invariant under re-chunking of the input.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TelnetEvent {
    /// A span of user data bytes.
    Data(Bytes),
    /// A decoded command or subnegotiation.
    Option(OptionEvent),
}

///
/// One decoded Telnet command frame, tagged by option.
///
/// Every variant records the verb that carried it; the subnegotiation
/// payloads (window size, terminal name, environment entry) are present only
/// when the verb is [`TelnetCommand::Sb`]. Plain negotiation acknowledgements
/// carry no payload.
///
/// The canonical event name and its short aliases ("window size" / "naws" /
/// "size", and so on) are available from [`OptionEvent::name`] and
/// [`OptionEvent::aliases`], so a subscriber can key dispatch tables off
/// either spelling.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OptionEvent {
    /// Binary Transmission negotiation.
    TransmitBinary(TelnetCommand),
    /// Echo negotiation.
    Echo(TelnetCommand),
    /// Suppress Go Ahead negotiation.
    SuppressGoAhead(TelnetCommand),
    /// Status negotiation.
    Status(TelnetCommand),
    /// Timing Mark negotiation.
    TimingMark(TelnetCommand),
    /// Terminal Speed negotiation.
    TerminalSpeed(TelnetCommand),
    /// Remote Flow Control negotiation.
    RemoteFlowControl(TelnetCommand),
    /// Linemode negotiation. Subnegotiation payloads are skipped, not
    /// interpreted.
    Linemode(TelnetCommand),
    /// X Display Location negotiation.
    XDisplayLocation(TelnetCommand),
    /// Authentication negotiation.
    Authentication(TelnetCommand),
    /// Window size negotiation or announcement.
    WindowSize {
        /// The verb that carried this frame.
        command: TelnetCommand,
        /// The announced dimensions; present only under `SB`.
        size: Option<WindowSize>,
    },
    /// Terminal type negotiation or announcement.
    TerminalType {
        /// The verb that carried this frame.
        command: TelnetCommand,
        /// The lowercased terminal name; present only under `SB`.
        name: Option<String>,
    },
    /// Environment variable negotiation or announcement.
    Environment {
        /// The verb that carried this frame.
        command: TelnetCommand,
        /// The announced variable; present only under `SB`.
        entry: Option<EnvEntry>,
    },
    /// A frame for an option outside the recognised registry.
    Unknown {
        /// The verb that carried this frame.
        command: TelnetCommand,
        /// The raw option code.
        option: u8,
        /// The full consumed frame, IAC through the final byte.
        payload: Bytes,
    },
}

impl OptionEvent {
    /// The verb that carried this frame.
    pub fn command(&self) -> TelnetCommand {
        match self {
            OptionEvent::TransmitBinary(command)
            | OptionEvent::Echo(command)
            | OptionEvent::SuppressGoAhead(command)
            | OptionEvent::Status(command)
            | OptionEvent::TimingMark(command)
            | OptionEvent::TerminalSpeed(command)
            | OptionEvent::RemoteFlowControl(command)
            | OptionEvent::Linemode(command)
            | OptionEvent::XDisplayLocation(command)
            | OptionEvent::Authentication(command) => *command,
            OptionEvent::WindowSize { command, .. }
            | OptionEvent::TerminalType { command, .. }
            | OptionEvent::Environment { command, .. }
            | OptionEvent::Unknown { command, .. } => *command,
        }
    }

    /// The option this frame negotiated.
    pub fn option(&self) -> TelnetOption {
        match self {
            OptionEvent::TransmitBinary(_) => TelnetOption::TransmitBinary,
            OptionEvent::Echo(_) => TelnetOption::Echo,
            OptionEvent::SuppressGoAhead(_) => TelnetOption::SuppressGoAhead,
            OptionEvent::Status(_) => TelnetOption::Status,
            OptionEvent::TimingMark(_) => TelnetOption::TimingMark,
            OptionEvent::TerminalSpeed(_) => TelnetOption::TerminalSpeed,
            OptionEvent::RemoteFlowControl(_) => TelnetOption::RemoteFlowControl,
            OptionEvent::Linemode(_) => TelnetOption::Linemode,
            OptionEvent::XDisplayLocation(_) => TelnetOption::XDisplayLocation,
            OptionEvent::Authentication(_) => TelnetOption::Authentication,
            OptionEvent::WindowSize { .. } => TelnetOption::WindowSize,
            OptionEvent::TerminalType { .. } => TelnetOption::TerminalType,
            OptionEvent::Environment { .. } => TelnetOption::EnvironmentVariables,
            OptionEvent::Unknown { option, .. } => TelnetOption::Unknown(*option),
        }
    }

    /// Canonical lowercase event name, e.g. `"window size"`.
    pub fn name(&self) -> &'static str {
        self.option().name()
    }

    /// Short alias names for this event, e.g. `["naws", "size"]`.
    pub fn aliases(&self) -> &'static [&'static str] {
        self.option().aliases()
    }
}

impl std::fmt::Display for OptionEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionEvent::WindowSize {
                command,
                size: Some(size),
            } => write!(f, "{command} window size {size}"),
            OptionEvent::TerminalType {
                command,
                name: Some(name),
            } => write!(f, "{command} terminal type {name}"),
            OptionEvent::Environment {
                command,
                entry: Some(entry),
            } => write!(f, "{command} environment {entry}"),
            OptionEvent::Unknown {
                command, option, ..
            } => write!(f, "{command} unknown({option})"),
            other => write!(f, "{} {}", other.command(), other.name()),
        }
    }
}
