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

//! The incremental frame scan.
//!
//! One scan pass walks the residue buffer from the front, splitting it into
//! user-data spans and command frames. A frame head is the three-byte window
//! `IAC <command> <option>` where the command byte is in 240..=255; anything
//! else, including an IAC followed by a non-command byte, is user data.
//!
//! The pass consumes everything it fully processed and leaves an incomplete
//! trailing frame in place, so the residue always either is empty or begins
//! with the IAC of a frame still waiting for bytes.

use crate::args::environ::EnvEntry;
use crate::args::naws::WindowSize;
use crate::args::ttype::TerminalType;
use crate::args::{self, SubDecode};
use crate::command::TelnetCommand;
use crate::consts;
use crate::event::{OptionEvent, TelnetEvent};
use crate::options::TelnetOption;
use crate::result::CodecResult;
use bytes::{Buf, BufMut, Bytes, BytesMut};
use std::collections::VecDeque;
use tracing::warn;

/// Runs one scan pass over `buf`, queueing events onto `out`.
///
/// On success the processed prefix has been consumed from `buf`. On a
/// structural error everything decoded before the offending frame has been
/// queued and consumed, in wire order; the residue left in `buf` begins with
/// the frame that failed, and the caller decides what to do with it.
pub(crate) fn scan(buf: &mut BytesMut, out: &mut VecDeque<TelnetEvent>) -> CodecResult<()> {
    let mut span = BytesMut::new();
    let mut i = 0usize; // cursor
    let mut l = 0usize; // low-water mark: start of unemitted user data

    while i < buf.len() {
        if buf[i] != consts::IAC {
            i += 1;
            continue;
        }
        // A frame head needs the command and option bytes in hand before it
        // can be classified; a shorter tail suspends the pass.
        if buf.len() - i < 3 {
            break;
        }
        let command = match TelnetCommand::from_u8(buf[i + 1]) {
            Some(command) => command,
            None => {
                // IAC not followed by a command byte belongs to user data.
                i += 1;
                continue;
            }
        };
        if command == TelnetCommand::Iac {
            // Escape pair: exactly one literal 0xFF in the data stream.
            span.extend_from_slice(&buf[l..i]);
            span.put_u8(consts::IAC);
            i += 2;
            l = i;
            continue;
        }
        let decoded = match decode_frame(command, buf[i + 2], &buf[i..]) {
            Ok(decoded) => decoded,
            Err(error) => {
                // Publish what preceded the offending frame, then leave the
                // frame itself at the front of the residue.
                span.extend_from_slice(&buf[l..i]);
                if !span.is_empty() {
                    out.push_back(TelnetEvent::Data(span.freeze()));
                }
                buf.advance(i);
                return Err(error);
            }
        };
        match decoded {
            SubDecode::NeedMore => break,
            SubDecode::Done { consumed, value } => {
                span.extend_from_slice(&buf[l..i]);
                if !span.is_empty() {
                    out.push_back(TelnetEvent::Data(span.split().freeze()));
                }
                out.push_back(TelnetEvent::Option(value));
                i += consumed;
                l = i;
            }
        }
    }

    // `i` is the suspend point (start of an incomplete frame) or the end of
    // the buffer; user data up to it is published, the rest stays residual.
    span.extend_from_slice(&buf[l..i]);
    if !span.is_empty() {
        out.push_back(TelnetEvent::Data(span.freeze()));
    }
    buf.advance(i);
    Ok(())
}

/// Decodes one frame whose slice starts at the IAC byte.
fn decode_frame(
    command: TelnetCommand,
    option_byte: u8,
    frame: &[u8],
) -> CodecResult<SubDecode<OptionEvent>> {
    let option = TelnetOption::from_u8(option_byte);
    if command == TelnetCommand::Sb {
        return match option {
            TelnetOption::WindowSize => Ok(WindowSize::decode_frame(frame)?.map(|size| {
                OptionEvent::WindowSize {
                    command,
                    size: Some(size),
                }
            })),
            TelnetOption::TerminalType => Ok(TerminalType::decode_frame(frame)?.map(|ttype| {
                OptionEvent::TerminalType {
                    command,
                    name: Some(ttype.name),
                }
            })),
            TelnetOption::EnvironmentVariables => {
                Ok(EnvEntry::decode_frame(frame)?.map(|entry| OptionEvent::Environment {
                    command,
                    entry: Some(entry),
                }))
            }
            TelnetOption::Unknown(code) => {
                Ok(skip_subnegotiation(frame).map(|consumed| {
                    warn!("skipped subnegotiation for unknown option {code}");
                    OptionEvent::Unknown {
                        command,
                        option: code,
                        payload: Bytes::copy_from_slice(&frame[..consumed]),
                    }
                }))
            }
            // Recognised option with no interpreted sub-grammar, e.g.
            // linemode: acknowledge the frame, skip the payload.
            known => Ok(skip_subnegotiation(frame).map(|_| fixed_event(known, command))),
        };
    }
    match option {
        TelnetOption::Unknown(code) => {
            warn!("received {command} for unknown option {code}");
            Ok(SubDecode::Done {
                consumed: 3,
                value: OptionEvent::Unknown {
                    command,
                    option: code,
                    payload: Bytes::copy_from_slice(&frame[..3]),
                },
            })
        }
        known => Ok(SubDecode::Done {
            consumed: 3,
            value: fixed_event(known, command),
        }),
    }
}

/// Finds the end of an uninterpreted subnegotiation: the two-byte `IAC SE`
/// terminator, searched from the option byte onward.
fn skip_subnegotiation(frame: &[u8]) -> SubDecode<usize> {
    match args::find_terminator(frame, 2) {
        Some(iac) => SubDecode::Done {
            consumed: iac + 2,
            value: iac + 2,
        },
        None => SubDecode::NeedMore,
    }
}

/// The empty-payload event for a recognised option.
fn fixed_event(option: TelnetOption, command: TelnetCommand) -> OptionEvent {
    match option {
        TelnetOption::TransmitBinary => OptionEvent::TransmitBinary(command),
        TelnetOption::Echo => OptionEvent::Echo(command),
        TelnetOption::SuppressGoAhead => OptionEvent::SuppressGoAhead(command),
        TelnetOption::Status => OptionEvent::Status(command),
        TelnetOption::TimingMark => OptionEvent::TimingMark(command),
        TelnetOption::TerminalSpeed => OptionEvent::TerminalSpeed(command),
        TelnetOption::RemoteFlowControl => OptionEvent::RemoteFlowControl(command),
        TelnetOption::Linemode => OptionEvent::Linemode(command),
        TelnetOption::XDisplayLocation => OptionEvent::XDisplayLocation(command),
        TelnetOption::Authentication => OptionEvent::Authentication(command),
        TelnetOption::WindowSize => OptionEvent::WindowSize {
            command,
            size: None,
        },
        TelnetOption::TerminalType => OptionEvent::TerminalType {
            command,
            name: None,
        },
        TelnetOption::EnvironmentVariables => OptionEvent::Environment {
            command,
            entry: None,
        },
        TelnetOption::Unknown(code) => OptionEvent::Unknown {
            command,
            option: code,
            payload: Bytes::new(),
        },
    }
}
