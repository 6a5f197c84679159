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

//! Per-option subnegotiation grammars.
//!
//! Each module decodes one option's `IAC SB <opt> … IAC SE` payload from a
//! frame slice that starts at the IAC byte and extends through the end of the
//! currently buffered data. Decoders report how many bytes they consumed, or
//! [`SubDecode::NeedMore`] when the frame is not yet complete; they never
//! guess at truncated input.

pub mod environ;
pub mod naws;
pub mod ttype;

/// Outcome of an incremental subnegotiation decode over a frame slice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubDecode<T> {
    /// The frame is incomplete; the scanner must suspend and retry once more
    /// bytes arrive.
    NeedMore,
    /// The frame decoded successfully.
    Done {
        /// Bytes consumed from the frame slice, IAC through SE inclusive.
        consumed: usize,
        /// The decoded value.
        value: T,
    },
}

impl<T> SubDecode<T> {
    /// Maps the decoded value, preserving `NeedMore` and the consumed count.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> SubDecode<U> {
        match self {
            SubDecode::NeedMore => SubDecode::NeedMore,
            SubDecode::Done { consumed, value } => SubDecode::Done {
                consumed,
                value: f(value),
            },
        }
    }
}

/// Locates the two-byte `IAC SE` terminator in `frame`, searching from
/// `start`. Returns the index of the IAC byte.
///
/// The search is for the two-byte sequence, not a bare SE: a payload data
/// byte that happens to equal 0xF0 must not end the subnegotiation.
pub(crate) fn find_terminator(frame: &[u8], start: usize) -> Option<usize> {
    if frame.len() < 2 {
        return None;
    }
    (start..frame.len() - 1)
        .find(|&i| frame[i] == crate::consts::IAC && frame[i + 1] == crate::consts::SE)
}
