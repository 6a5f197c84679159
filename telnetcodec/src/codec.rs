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

use crate::event::TelnetEvent;
use crate::frame::TelnetFrame;
use crate::result::{CodecError, CodecResult};
use crate::scanner;
use bytes::BytesMut;
use std::collections::VecDeque;
use tokio_util::codec::{Decoder, Encoder};
use tracing::trace;

/// A stateful codec for the server side of the Telnet protocol.
///
/// `TelnetCodec` turns arbitrarily chunked inbound bytes into
/// [`TelnetEvent`]s and outbound [`TelnetFrame`]s into wire bytes. It can be
/// driven two ways:
///
/// - **Chunk-driven**: call [`TelnetCodec::push`] with each read, then drain
///   [`TelnetCodec::poll_event`] until it returns `Ok(None)`. The codec owns
///   the residue of any frame split across reads.
/// - **Framed**: the codec implements [`Decoder`] and [`Encoder`] from
///   `tokio_util::codec`, so it can be mounted on a stream with
///   `FramedRead`/`FramedWrite`. In that mode the framed machinery owns the
///   residue buffer.
///
/// Both paths produce identical event sequences for identical byte streams,
/// regardless of how the stream is partitioned into reads.
///
/// # Error handling
///
/// A recognised option whose subnegotiation violates its sub-grammar is a
/// structural error. Events decoded before the offending frame are still
/// delivered in wire order; the error is reported once they have drained and
/// the remainder of the buffered input is discarded. Incomplete frames are
/// never an error; they simply wait for more bytes.
pub struct TelnetCodec {
    residue: BytesMut,
    pending: VecDeque<TelnetEvent>,
    poisoned: Option<CodecError>,
}

impl TelnetCodec {
    /// Creates a new codec with an empty residue.
    pub fn new() -> TelnetCodec {
        TelnetCodec::default()
    }

    /// Appends an inbound chunk to the residue. A zero-length chunk is a
    /// no-op.
    pub fn push(&mut self, chunk: &[u8]) {
        self.residue.extend_from_slice(chunk);
    }

    /// Returns the next decoded event, scanning the residue as needed.
    ///
    /// `Ok(None)` means everything currently buffered has been delivered;
    /// call [`TelnetCodec::push`] with the next read and poll again. After a
    /// structural error the buffered input for that read has been discarded
    /// and the codec is ready for fresh bytes.
    pub fn poll_event(&mut self) -> CodecResult<Option<TelnetEvent>> {
        if let Some(event) = self.pending.pop_front() {
            return Ok(Some(event));
        }
        if let Some(error) = self.poisoned.take() {
            self.residue.clear();
            return Err(error);
        }
        if self.residue.is_empty() {
            return Ok(None);
        }
        match scanner::scan(&mut self.residue, &mut self.pending) {
            Ok(()) => Ok(self.pending.pop_front()),
            Err(error) => match self.pending.pop_front() {
                Some(event) => {
                    // Deliver the events that preceded the bad frame first.
                    self.poisoned = Some(error);
                    Ok(Some(event))
                }
                None => {
                    self.residue.clear();
                    Err(error)
                }
            },
        }
    }

    /// Discards the residue and any queued events.
    pub fn reset(&mut self) {
        self.residue.clear();
        self.pending.clear();
        self.poisoned = None;
    }

    /// The number of residual bytes waiting for an incomplete frame.
    pub fn residue_len(&self) -> usize {
        self.residue.len()
    }
}

impl Default for TelnetCodec {
    fn default() -> Self {
        TelnetCodec {
            residue: BytesMut::new(),
            pending: VecDeque::new(),
            poisoned: None,
        }
    }
}

impl Decoder for TelnetCodec {
    type Item = TelnetEvent;
    type Error = CodecError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<TelnetEvent>, Self::Error> {
        if let Some(event) = self.pending.pop_front() {
            return Ok(Some(event));
        }
        if let Some(error) = self.poisoned.take() {
            src.clear();
            return Err(error);
        }
        if src.is_empty() {
            return Ok(None);
        }
        match scanner::scan(src, &mut self.pending) {
            Ok(()) => Ok(self.pending.pop_front()),
            Err(error) => match self.pending.pop_front() {
                Some(event) => {
                    self.poisoned = Some(error);
                    Ok(Some(event))
                }
                None => {
                    src.clear();
                    Err(error)
                }
            },
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<TelnetEvent>, Self::Error> {
        match self.decode(src)? {
            Some(event) => Ok(Some(event)),
            None => {
                // The stream ended mid-frame; the partial frame is discarded
                // without an event or an error.
                if !src.is_empty() {
                    trace!("discarding {} residual bytes at end of stream", src.len());
                    src.clear();
                }
                Ok(None)
            }
        }
    }
}

impl Encoder<TelnetFrame> for TelnetCodec {
    type Error = CodecError;

    fn encode(&mut self, item: TelnetFrame, dst: &mut BytesMut) -> Result<(), Self::Error> {
        item.encode(dst);
        Ok(())
    }
}
