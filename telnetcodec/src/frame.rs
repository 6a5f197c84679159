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

use crate::consts;
use crate::options::TelnetOption;
use bytes::{BufMut, Bytes, BytesMut};

///
/// An outbound Telnet wire frame.
///
/// Frames are what a server writes: user data (with IAC escaping applied at
/// encode time), the four negotiation verbs, and subnegotiation blocks. There
/// is no outbound counterpart for the two-byte control commands because this
/// engine never originates them.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TelnetFrame {
    /// User data bytes. Literal 0xFF bytes are doubled on the wire.
    Data(Bytes),
    /// `IAC DO <option>` - ask the peer to enable an option.
    Do(TelnetOption),
    /// `IAC DONT <option>` - demand the peer disable an option.
    Dont(TelnetOption),
    /// `IAC WILL <option>` - offer to enable an option locally.
    Will(TelnetOption),
    /// `IAC WONT <option>` - refuse to enable an option locally.
    Wont(TelnetOption),
    /// `IAC SB <option> <payload> IAC SE`. Payload IAC bytes are doubled.
    Subnegotiate(TelnetOption, Bytes),
}

impl TelnetFrame {
    /// The number of bytes this frame occupies on the wire, escaping
    /// included.
    pub fn wire_len(&self) -> usize {
        match self {
            TelnetFrame::Data(data) => {
                data.len() + data.iter().filter(|&&b| b == consts::IAC).count()
            }
            TelnetFrame::Do(_)
            | TelnetFrame::Dont(_)
            | TelnetFrame::Will(_)
            | TelnetFrame::Wont(_) => 3,
            TelnetFrame::Subnegotiate(_, payload) => {
                5 + payload.len() + payload.iter().filter(|&&b| b == consts::IAC).count()
            }
        }
    }

    /// Appends this frame's wire bytes to `dst`.
    pub fn encode(&self, dst: &mut BytesMut) {
        dst.reserve(self.wire_len());
        match self {
            TelnetFrame::Data(data) => put_escaped(dst, data),
            TelnetFrame::Do(option) => put_negotiation(dst, consts::DO, *option),
            TelnetFrame::Dont(option) => put_negotiation(dst, consts::DONT, *option),
            TelnetFrame::Will(option) => put_negotiation(dst, consts::WILL, *option),
            TelnetFrame::Wont(option) => put_negotiation(dst, consts::WONT, *option),
            TelnetFrame::Subnegotiate(option, payload) => {
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::SB);
                dst.put_u8(option.to_u8());
                put_escaped(dst, payload);
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::SE);
            }
        }
    }

    /// Encodes this frame into a fresh buffer.
    pub fn to_bytes(&self) -> Bytes {
        let mut dst = BytesMut::with_capacity(self.wire_len());
        self.encode(&mut dst);
        dst.freeze()
    }
}

fn put_negotiation(dst: &mut BytesMut, verb: u8, option: TelnetOption) {
    dst.put_u8(consts::IAC);
    dst.put_u8(verb);
    dst.put_u8(option.to_u8());
}

fn put_escaped(dst: &mut BytesMut, data: &[u8]) {
    for &byte in data {
        if byte == consts::IAC {
            dst.put_u8(consts::IAC);
        }
        dst.put_u8(byte);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_do_echo() {
        let dst = TelnetFrame::Do(TelnetOption::Echo).to_bytes();
        assert_eq!(&dst[..], &[consts::IAC, consts::DO, consts::option::ECHO]);
    }

    #[test]
    fn encode_wont_suppress_go_ahead() {
        let dst = TelnetFrame::Wont(TelnetOption::SuppressGoAhead).to_bytes();
        assert_eq!(
            &dst[..],
            &[
                consts::IAC,
                consts::WONT,
                consts::option::SUPPRESS_GO_AHEAD
            ]
        );
    }

    #[test]
    fn encode_data_escapes_iac() {
        let dst = TelnetFrame::Data(Bytes::from_static(&[b'A', consts::IAC, b'B'])).to_bytes();
        assert_eq!(&dst[..], &[b'A', consts::IAC, consts::IAC, b'B']);
    }

    #[test]
    fn encode_subnegotiation_frames_payload() {
        let dst = TelnetFrame::Subnegotiate(
            TelnetOption::TerminalType,
            Bytes::from_static(&[consts::option::ttype::SEND]),
        )
        .to_bytes();
        assert_eq!(
            &dst[..],
            &[
                consts::IAC,
                consts::SB,
                consts::option::TERMINAL_TYPE,
                consts::option::ttype::SEND,
                consts::IAC,
                consts::SE,
            ]
        );
    }

    #[test]
    fn wire_len_counts_escapes() {
        let frame = TelnetFrame::Data(Bytes::from_static(&[consts::IAC, consts::IAC, b'x']));
        assert_eq!(frame.wire_len(), 5);
        assert_eq!(frame.to_bytes().len(), 5);
    }
}
