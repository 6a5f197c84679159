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

use crate::result::SessionResult;

/// The byte sink a session writes through.
///
/// A transport is the outbound half of a duplex byte stream plus its
/// lifecycle controls. The inbound half is not part of the trait: whoever
/// owns the stream feeds reads into
/// [`TelnetSession::receive`](crate::TelnetSession::receive) and forwards
/// end/close/error signals to the matching `handle_*` methods.
///
/// [`SessionConnection`](crate::SessionConnection) provides the tokio-backed
/// implementation; tests can substitute an in-memory sink.
pub trait Transport: Send {
    /// Writes encoded wire bytes. The transport may buffer; ordering must be
    /// preserved.
    fn write(&mut self, bytes: &[u8]) -> SessionResult<()>;

    /// Stops delivering inbound reads until [`Transport::resume`] is called.
    fn pause(&mut self) {}

    /// Resumes inbound reads after a [`Transport::pause`].
    fn resume(&mut self) {}

    /// Gracefully shuts down the outbound half.
    fn end(&mut self) -> SessionResult<()>;

    /// Severs the transport immediately, discarding queued writes.
    fn destroy(&mut self);

    /// Whether inbound reads are currently being delivered.
    fn readable(&self) -> bool;

    /// Whether writes are currently accepted.
    fn writable(&self) -> bool;

    /// Whether the transport has been severed.
    fn destroyed(&self) -> bool;
}
