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

//! Terminal Type
//!
//! <https://tools.ietf.org/html/rfc1091>
//!
//! The server solicits the terminal name with `IAC SB 24 SEND IAC SE`; the
//! client answers `IAC SB 24 IS <name> IAC SE`. Only the `IS` response is
//! decoded here; the solicitation is emitted outbound.

use crate::args::SubDecode;
use crate::{CodecError, CodecResult, SubnegotiationErrorKind, consts};
use bytes::BufMut;

/// Shortest complete response: `IAC SB 24 IS n IAC SE` with a one-byte name.
const MIN_FRAME_LEN: usize = 7;

/// A terminal name announced by the peer via an `IS` response.
///
/// Names are ASCII on the wire and case-insensitive by convention; the
/// decoder lowercases them so `"XTERM"` and `"xterm"` compare equal
/// downstream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TerminalType {
    /// Lowercased terminal name, e.g. `"xterm"`.
    pub name: String,
}

impl TerminalType {
    /// Creates a terminal type, lowercasing the given name.
    pub fn new(name: &str) -> Self {
        TerminalType {
            name: name.to_ascii_lowercase(),
        }
    }

    /// Encodes the `SEND` solicitation payload (a single marker byte).
    pub fn encode_send<T: BufMut>(dst: &mut T) -> usize {
        dst.put_u8(consts::option::ttype::SEND);
        1
    }

    /// Decodes an `IS` response from a frame slice starting at the IAC byte.
    ///
    /// The name runs from the byte after `IS` up to the next IAC, which must
    /// begin the `IAC SE` terminator. An empty name is a protocol violation.
    pub fn decode_frame(frame: &[u8]) -> CodecResult<SubDecode<TerminalType>> {
        if frame.len() >= 4 && frame[3] != consts::option::ttype::IS {
            return Err(CodecError::SubnegotiationError {
                option: consts::option::TERMINAL_TYPE,
                reason: SubnegotiationErrorKind::InvalidCommand {
                    command: frame[3],
                    expected: vec![consts::option::ttype::IS],
                },
            });
        }
        if frame.len() < MIN_FRAME_LEN {
            return Ok(SubDecode::NeedMore);
        }
        let iac = match frame.iter().skip(4).position(|&b| b == consts::IAC) {
            Some(offset) => 4 + offset,
            None => return Ok(SubDecode::NeedMore),
        };
        if iac == 4 {
            return Err(CodecError::SubnegotiationError {
                option: consts::option::TERMINAL_TYPE,
                reason: SubnegotiationErrorKind::EmptyField { field: "name" },
            });
        }
        if iac + 1 >= frame.len() {
            return Ok(SubDecode::NeedMore);
        }
        if frame[iac + 1] != consts::SE {
            return Err(CodecError::SubnegotiationError {
                option: consts::option::TERMINAL_TYPE,
                reason: SubnegotiationErrorKind::InvalidFraming {
                    position: iac + 1,
                    found: frame[iac + 1],
                    expected: consts::SE,
                },
            });
        }
        let name = String::from_utf8_lossy(&frame[4..iac]).to_ascii_lowercase();
        Ok(SubDecode::Done {
            consumed: iac + 2,
            value: TerminalType { name },
        })
    }
}

impl std::fmt::Display for TerminalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_frame(name: &[u8]) -> Vec<u8> {
        let mut frame = vec![
            consts::IAC,
            consts::SB,
            consts::option::TERMINAL_TYPE,
            consts::option::ttype::IS,
        ];
        frame.extend_from_slice(name);
        frame.extend_from_slice(&[consts::IAC, consts::SE]);
        frame
    }

    #[test]
    fn decode_lowercases_the_name() {
        let frame = is_frame(b"XTERM");
        match TerminalType::decode_frame(&frame).expect("decode ok") {
            SubDecode::Done { consumed, value } => {
                assert_eq!(consumed, frame.len());
                assert_eq!(value.name, "xterm");
            }
            SubDecode::NeedMore => panic!("frame was complete"),
        }
    }

    #[test]
    fn decode_suspends_until_terminator_arrives() {
        let frame = is_frame(b"vt100");
        for len in 0..frame.len() {
            assert_eq!(
                TerminalType::decode_frame(&frame[..len]).expect("decode ok"),
                SubDecode::NeedMore,
                "prefix of {len} bytes should suspend"
            );
        }
    }

    #[test]
    fn decode_rejects_empty_name() {
        let frame = [
            consts::IAC,
            consts::SB,
            consts::option::TERMINAL_TYPE,
            consts::option::ttype::IS,
            consts::IAC,
            consts::SE,
            // pad so the minimum-length gate is passed
            0x00,
        ];
        let err = TerminalType::decode_frame(&frame).expect_err("must reject");
        assert!(matches!(
            err,
            CodecError::SubnegotiationError {
                reason: SubnegotiationErrorKind::EmptyField { field: "name" },
                ..
            }
        ));
    }

    #[test]
    fn decode_rejects_send_marker() {
        let frame = [
            consts::IAC,
            consts::SB,
            consts::option::TERMINAL_TYPE,
            consts::option::ttype::SEND,
            consts::IAC,
            consts::SE,
        ];
        assert!(TerminalType::decode_frame(&frame).is_err());
    }
}
