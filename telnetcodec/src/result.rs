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

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors surfaced by the Telnet engine.
///
/// Underflow (an incomplete frame in the residue) is *not* an error; the
/// scanner suspends and waits for more bytes. These variants cover the cases
/// the engine is strict about: a recognised option whose subnegotiation does
/// not match its sub-grammar, and I/O faults reported by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// An I/O error occurred while reading from or writing to the underlying
    /// stream.
    IOError {
        /// The kind of I/O error that occurred
        kind: std::io::ErrorKind,
        /// Description of the operation that failed
        operation: String,
    },

    /// A recognised option's subnegotiation violated its sub-grammar.
    ///
    /// Unknown options never produce this; their payloads are skipped
    /// through `IAC SE` without interpretation.
    SubnegotiationError {
        /// The telnet option being subnegotiated
        option: u8,
        /// Specific reason for the failure
        reason: SubnegotiationErrorKind,
    },
}

/// Specific kinds of subnegotiation errors with structured context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubnegotiationErrorKind {
    /// A framing byte was not where the sub-grammar requires it, e.g. a NAWS
    /// frame whose ninth byte is not `SE`.
    InvalidFraming {
        /// Byte offset within the frame, counted from the IAC
        position: usize,
        /// The byte found there
        found: u8,
        /// The byte the grammar requires
        expected: u8,
    },

    /// An invalid marker byte in the subnegotiation payload.
    InvalidCommand {
        /// The invalid marker byte
        command: u8,
        /// Expected marker bytes
        expected: Vec<u8>,
    },

    /// A name or value field the grammar requires to be non-empty was empty.
    EmptyField {
        /// Which field was empty
        field: &'static str,
    },

    /// A required separator never appeared in the payload.
    MissingSeparator {
        /// The separator byte that was expected
        separator: u8,
    },
}

impl std::error::Error for CodecError {}

impl std::fmt::Display for CodecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CodecError::IOError { kind, operation } => {
                write!(f, "I/O error during {}: {:?}", operation, kind)
            }
            CodecError::SubnegotiationError { option, reason } => {
                write!(f, "Subnegotiation error for option {}: {}", option, reason)
            }
        }
    }
}

impl std::fmt::Display for SubnegotiationErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubnegotiationErrorKind::InvalidFraming {
                position,
                found,
                expected,
            } => {
                write!(
                    f,
                    "invalid framing at offset {} (found: 0x{:02X}, expected: 0x{:02X})",
                    position, found, expected
                )
            }
            SubnegotiationErrorKind::InvalidCommand { command, expected } => {
                write!(
                    f,
                    "invalid command 0x{:02X} (expected one of: {:?})",
                    command, expected
                )
            }
            SubnegotiationErrorKind::EmptyField { field } => {
                write!(f, "empty {} field", field)
            }
            SubnegotiationErrorKind::MissingSeparator { separator } => {
                write!(f, "missing separator byte 0x{:02X}", separator)
            }
        }
    }
}

impl From<std::io::Error> for CodecError {
    fn from(err: std::io::Error) -> Self {
        CodecError::IOError {
            kind: err.kind(),
            operation: err.to_string(),
        }
    }
}
