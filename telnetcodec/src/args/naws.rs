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

//! Negotiate About Window Size
//!

use crate::args::SubDecode;
use crate::{CodecError, CodecResult, SubnegotiationErrorKind, consts};
use byteorder::{BigEndian, WriteBytesExt};
use bytes::BufMut;

/// Length of a complete NAWS subnegotiation frame:
/// `IAC SB 31 w_hi w_lo h_hi h_lo IAC SE`.
const FRAME_LEN: usize = 9;

/// Represents the Negotiate About Window Size (NAWS) option data.
///
/// The NAWS option lets a Telnet client report its terminal window size so
/// the server can adjust wrapping and screen layout. On the wire the payload
/// is four bytes: columns then rows, each a 16-bit big-endian unsigned
/// integer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowSize {
    /// The number of columns (characters) in the terminal window
    pub cols: u16,
    /// The number of rows (lines) in the terminal window
    pub rows: u16,
}

impl WindowSize {
    /// Creates a new `WindowSize` with the specified columns and rows.
    pub fn new(cols: u16, rows: u16) -> Self {
        WindowSize { cols, rows }
    }

    /// Returns the encoded payload length in bytes. Always 4.
    pub fn len(&self) -> usize {
        4
    }

    /// A NAWS payload is never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Encodes the four payload bytes into a buffer in big-endian order.
    pub fn encode<T: BufMut>(&self, dst: &mut T) -> CodecResult<usize> {
        Ok(self.write(&mut dst.writer())?)
    }

    /// Writes the four payload bytes to a writer in big-endian order.
    pub fn write<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<usize> {
        writer.write_u16::<BigEndian>(self.cols)?;
        writer.write_u16::<BigEndian>(self.rows)?;
        Ok(4)
    }

    /// Decodes a complete NAWS subnegotiation from a frame slice that starts
    /// at the IAC byte.
    ///
    /// Requires all nine bytes, including the trailing `IAC SE`; returns
    /// [`SubDecode::NeedMore`] until they have arrived. A ninth-byte pair
    /// that is not `IAC SE` is a protocol violation and decodes to a
    /// [`CodecError::SubnegotiationError`].
    pub fn decode_frame(frame: &[u8]) -> CodecResult<SubDecode<WindowSize>> {
        if frame.len() < FRAME_LEN {
            return Ok(SubDecode::NeedMore);
        }
        if frame[7] != consts::IAC {
            return Err(framing_error(7, frame[7], consts::IAC));
        }
        if frame[8] != consts::SE {
            return Err(framing_error(8, frame[8], consts::SE));
        }
        let cols = u16::from_be_bytes([frame[3], frame[4]]);
        let rows = u16::from_be_bytes([frame[5], frame[6]]);
        Ok(SubDecode::Done {
            consumed: FRAME_LEN,
            value: WindowSize { cols, rows },
        })
    }
}

fn framing_error(position: usize, found: u8, expected: u8) -> CodecError {
    CodecError::SubnegotiationError {
        option: consts::option::WINDOW_SIZE,
        reason: SubnegotiationErrorKind::InvalidFraming {
            position,
            found,
            expected,
        },
    }
}

impl Default for WindowSize {
    /// The traditional 80x24 terminal, used until the peer announces a size.
    fn default() -> Self {
        WindowSize { cols: 80, rows: 24 }
    }
}

impl std::fmt::Display for WindowSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.cols, self.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESIZE_80_24: [u8; 9] = [
        consts::IAC,
        consts::SB,
        consts::option::WINDOW_SIZE,
        0x00,
        0x50,
        0x00,
        0x18,
        consts::IAC,
        consts::SE,
    ];

    #[test]
    fn decode_80_by_24() {
        match WindowSize::decode_frame(&RESIZE_80_24).expect("decode ok") {
            SubDecode::Done { consumed, value } => {
                assert_eq!(consumed, 9);
                assert_eq!(value, WindowSize::new(80, 24));
            }
            SubDecode::NeedMore => panic!("frame was complete"),
        }
    }

    #[test]
    fn decode_suspends_on_every_short_prefix() {
        for len in 0..RESIZE_80_24.len() {
            assert_eq!(
                WindowSize::decode_frame(&RESIZE_80_24[..len]).expect("decode ok"),
                SubDecode::NeedMore,
                "prefix of {len} bytes should suspend"
            );
        }
    }

    #[test]
    fn decode_rejects_missing_terminator() {
        let mut frame = RESIZE_80_24;
        frame[8] = 0x41;
        let err = WindowSize::decode_frame(&frame).expect_err("must reject");
        assert!(matches!(
            err,
            CodecError::SubnegotiationError {
                option: consts::option::WINDOW_SIZE,
                reason: SubnegotiationErrorKind::InvalidFraming { position: 8, .. },
            }
        ));
    }

    #[test]
    fn encode_is_big_endian() {
        let mut buffer = bytes::BytesMut::new();
        WindowSize::new(80, 24).encode(&mut buffer).expect("encode");
        assert_eq!(&buffer[..], &[0x00, 0x50, 0x00, 0x18]);
    }
}
