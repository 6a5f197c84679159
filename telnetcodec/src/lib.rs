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

//! # Terminet Telnet Protocol Engine
//!
//! This crate implements the server side of the Telnet protocol
//! ([RFC 854](https://tools.ietf.org/html/rfc854)) as an incremental,
//! transport-free engine: bytes in, typed events out. It separates user data
//! from in-band IAC command sequences, decodes the option negotiations and
//! subnegotiations a terminal server cares about, and encodes outbound
//! negotiation frames.
//!
//! ## Overview
//!
//! Inbound bytes arrive in arbitrary chunks from a transport. The engine
//! concatenates them into a residue buffer and walks it with an incremental
//! scanner, producing:
//!
//! - **Data spans** ([`TelnetEvent::Data`]): contiguous runs of user bytes,
//!   with `IAC IAC` escape pairs already collapsed to single 0xFF bytes.
//! - **Option events** ([`TelnetEvent::Option`]): one [`OptionEvent`] per
//!   decoded negotiation (`IAC DO/DONT/WILL/WONT <opt>`) or subnegotiation
//!   (`IAC SB <opt> … IAC SE`), in wire order relative to the data spans.
//!
//! Frames split across reads are held in the residue until their remaining
//! bytes arrive; the event sequence is identical no matter how the stream is
//! chunked.
//!
//! ## Decoded options
//!
//! Window size (NAWS, with 16-bit big-endian dimensions), terminal type
//! (`IS` responses, names lowercased) and the RFC 1572 environment option
//! (`INFO` updates with `VAR`/`USERVAR` entries) are decoded into structured
//! payloads. The remaining recognised options - binary transmission, echo,
//! suppress go ahead, status, timing mark, terminal speed, remote flow
//! control, linemode, X display location and authentication - decode as
//! empty-payload acknowledgements. Anything else surfaces as
//! [`OptionEvent::Unknown`] and is never an error.
//!
//! ## Usage Example
//!
//! ```rust
//! use terminet_telnetcodec::{TelnetCodec, TelnetEvent, TelnetFrame, TelnetOption};
//! use bytes::BytesMut;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut codec = TelnetCodec::new();
//!
//! // Feed a read from the transport; "HI" followed by IAC WILL NAWS.
//! codec.push(&[b'H', b'I', 0xFF, 0xFB, 0x1F]);
//! while let Some(event) = codec.poll_event()? {
//!     match event {
//!         TelnetEvent::Data(bytes) => println!("user data: {bytes:?}"),
//!         TelnetEvent::Option(option) => println!("option: {option}"),
//!     }
//! }
//!
//! // Encode a reply.
//! let mut wire = BytesMut::new();
//! TelnetFrame::Do(TelnetOption::NAWS).encode(&mut wire);
//! assert_eq!(&wire[..], &[0xFF, 0xFD, 0x1F]);
//! # Ok(())
//! # }
//! ```
//!
//! The codec also implements [`tokio_util::codec::Decoder`] and
//! [`tokio_util::codec::Encoder`], so it can be mounted directly on a stream
//! with `FramedRead`/`FramedWrite`.
//!
//! ## Error Handling
//!
//! The engine is permissive about *what* arrives (unknown options and
//! commands are tolerated and surfaced) and strict about *structure*: a
//! recognised option whose subnegotiation violates its sub-grammar - a NAWS
//! frame without its `IAC SE`, an empty terminal name - produces a
//! [`CodecError`]. Incomplete frames are never an error; the scanner
//! suspends until more bytes arrive.
//!
//! ## Related RFCs
//!
//! - RFC 854: Telnet Protocol Specification
//! - RFC 855: Telnet Option Specifications
//! - RFC 1073: Telnet Window Size Option
//! - RFC 1091: Telnet Terminal-Type Option
//! - RFC 1572: Telnet Environment Option

#![warn(
    clippy::cargo,
    missing_docs,
    clippy::pedantic,
    future_incompatible,
    rust_2018_idioms
)]
#![allow(
    clippy::option_if_let_else,
    clippy::module_name_repetitions,
    clippy::missing_errors_doc
)]

mod args;
mod codec;
mod command;
pub mod consts;
mod event;
mod frame;
mod options;
mod result;
mod scanner;

pub use self::args::environ::{EnvEntry, EnvKind};
pub use self::args::naws::WindowSize;
pub use self::args::ttype::TerminalType;
pub use self::args::{SubDecode, environ, naws, ttype};
pub use self::codec::TelnetCodec;
pub use self::command::TelnetCommand;
pub use self::event::{OptionEvent, TelnetEvent};
pub use self::frame::TelnetFrame;
pub use self::options::TelnetOption;
pub use self::result::{CodecError, CodecResult, SubnegotiationErrorKind};
