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

//! Error types and result aliases for session operations

use terminet_telnetcodec::CodecError;

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors that can occur while driving a Telnet session
///
/// Parse underflow is never an error; an incomplete frame simply waits in
/// the residue for more bytes. Structural protocol violations surface as
/// [`SessionError::Codec`], transport faults as [`SessionError::Io`].
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// An I/O error occurred on the underlying transport
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A recognised option's subnegotiation violated its sub-grammar
    #[error("Telnet protocol error: {0}")]
    Codec(#[from] CodecError),

    /// A write was attempted while the transport is not writable
    #[error("Transport is not writable")]
    NotWritable,

    /// The session's workers have shut down
    #[error("Session closed")]
    Closed,
}
