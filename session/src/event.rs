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

use crate::result::SessionError;
use bytes::Bytes;
use terminet_telnetcodec::OptionEvent;

///
/// `SessionEvent` is everything a session publishes to its application:
/// decoded protocol traffic interleaved with transport lifecycle signals.
///
/// Protocol events arrive in strict wire order. Every decoded frame is
/// published exactly once as [`SessionEvent::Command`]; subscribers select
/// per-option behaviour by matching the inner [`OptionEvent`] variant, and
/// can read its canonical name or short aliases (`"window size"` / `"naws"`
/// / `"size"`, …) when keying dynamic dispatch tables.
///
#[derive(Debug)]
pub enum SessionEvent {
    /// A span of user data bytes, IAC escapes already collapsed.
    Data(Bytes),
    /// A decoded negotiation or subnegotiation frame.
    Command(OptionEvent),
    /// The peer half-closed the connection. Any partially buffered frame has
    /// been discarded.
    End,
    /// The transport is fully closed; no further events follow.
    Close,
    /// The outbound queue has been flushed after a burst of writes.
    Drain,
    /// A structural protocol violation or a transport fault. The session
    /// does not close the transport on parse errors; closure is the
    /// application's decision.
    Error(SessionError),
}
