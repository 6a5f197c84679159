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

//! New Environment Option
//!
//! <https://tools.ietf.org/html/rfc1572>
//!
//! Decodes `INFO` updates of the form
//! `IAC SB 39 INFO <VAR|USERVAR> <name> VALUE <value> IAC SE`.
//! The `SEND` solicitation is emitted outbound only and never decoded.

use crate::args::{SubDecode, find_terminator};
use crate::{CodecError, CodecResult, SubnegotiationErrorKind, consts};
use bytes::BufMut;

/// Shortest complete update: one-byte name and one-byte value.
const MIN_FRAME_LEN: usize = 10;

/// Whether an environment entry is a well-known or user-defined variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnvKind {
    /// RFC 1572 `VAR` - a well-known variable such as `TERM` or `USER`.
    System,
    /// RFC 1572 `USERVAR` - a user-defined variable.
    User,
}

impl EnvKind {
    /// Looks up the kind for an RFC 1572 marker byte.
    pub fn from_u8(byte: u8) -> CodecResult<EnvKind> {
        match byte {
            consts::option::environ::VAR => Ok(EnvKind::System),
            consts::option::environ::USERVAR => Ok(EnvKind::User),
            other => Err(CodecError::SubnegotiationError {
                option: consts::option::ENVIRONMENT_VARIABLES,
                reason: SubnegotiationErrorKind::InvalidCommand {
                    command: other,
                    expected: vec![
                        consts::option::environ::VAR,
                        consts::option::environ::USERVAR,
                    ],
                },
            }),
        }
    }

    /// Converts this kind into its marker byte.
    pub fn to_u8(self) -> u8 {
        match self {
            EnvKind::System => consts::option::environ::VAR,
            EnvKind::User => consts::option::environ::USERVAR,
        }
    }

    /// Canonical lowercase name: `"system"` or `"user"`.
    pub fn name(self) -> &'static str {
        match self {
            EnvKind::System => "system",
            EnvKind::User => "user",
        }
    }
}

/// One environment variable announced by the peer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnvEntry {
    /// Variable kind marker.
    pub kind: EnvKind,
    /// Variable name. Never empty.
    pub name: String,
    /// Variable value. A `TERM` value arrives lowercased.
    pub value: String,
}

impl EnvEntry {
    /// Encodes the `SEND` solicitation payload (a single marker byte).
    pub fn encode_send<T: BufMut>(dst: &mut T) -> usize {
        dst.put_u8(consts::option::environ::SEND);
        1
    }

    /// Decodes an `INFO` update from a frame slice starting at the IAC byte.
    ///
    /// The name runs from the kind marker to the `VALUE` separator; the value
    /// runs from there to the next IAC, which must begin `IAC SE`. Empty
    /// names and values are protocol violations, as is a payload that is not
    /// an `INFO` update or carries an unrecognised kind marker.
    pub fn decode_frame(frame: &[u8]) -> CodecResult<SubDecode<EnvEntry>> {
        if frame.len() >= 4 && frame[3] != consts::option::environ::INFO {
            return Err(CodecError::SubnegotiationError {
                option: consts::option::ENVIRONMENT_VARIABLES,
                reason: SubnegotiationErrorKind::InvalidCommand {
                    command: frame[3],
                    expected: vec![consts::option::environ::INFO],
                },
            });
        }
        let kind = match frame.get(4) {
            Some(&byte) => EnvKind::from_u8(byte)?,
            None => return Ok(SubDecode::NeedMore),
        };
        if frame.len() < MIN_FRAME_LEN {
            return Ok(SubDecode::NeedMore);
        }
        let iac = match find_terminator(frame, 5) {
            Some(index) => index,
            None => {
                // A lone trailing IAC may be the first half of the terminator.
                return Ok(SubDecode::NeedMore);
            }
        };
        let payload = &frame[5..iac];
        let sep = payload
            .iter()
            .position(|&b| b == consts::option::environ::VALUE)
            .ok_or(CodecError::SubnegotiationError {
                option: consts::option::ENVIRONMENT_VARIABLES,
                reason: SubnegotiationErrorKind::MissingSeparator {
                    separator: consts::option::environ::VALUE,
                },
            })?;
        if sep == 0 {
            return Err(empty_field("name"));
        }
        if sep + 1 == payload.len() {
            return Err(empty_field("value"));
        }
        let name = String::from_utf8_lossy(&payload[..sep]).into_owned();
        let mut value = String::from_utf8_lossy(&payload[sep + 1..]).into_owned();
        if name == "TERM" {
            value = value.to_ascii_lowercase();
        }
        Ok(SubDecode::Done {
            consumed: iac + 2,
            value: EnvEntry { kind, name, value },
        })
    }
}

fn empty_field(field: &'static str) -> CodecError {
    CodecError::SubnegotiationError {
        option: consts::option::ENVIRONMENT_VARIABLES,
        reason: SubnegotiationErrorKind::EmptyField { field },
    }
}

impl std::fmt::Display for EnvEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={} ({})", self.name, self.value, self.kind.name())
    }
}
