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

//! # Terminet Session
//!
//! Server-side Telnet session management on top of
//! [`terminet_telnetcodec`]. A [`TelnetSession`] owns the protocol engine
//! for one connected peer: it turns transport reads into an ordered stream
//! of [`SessionEvent`]s, tracks what the peer announces about itself
//! (window size, terminal type, environment variables), and exposes the
//! outbound side - user data writes with LF conversion and IAC escaping,
//! DO/DONT/WILL/WONT senders, raw-mode toggling, and subnegotiation
//! solicitations.
//!
//! The session core is transport-agnostic behind the [`Transport`] trait.
//! [`SessionConnection`] supplies the tokio adapter: it splits a stream into
//! independent read/write workers so reads never block writes, and
//! [`TelnetServer`] runs the accept loop that spawns one session per
//! connection.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::net::SocketAddr;
//! use std::sync::Arc;
//! use async_trait::async_trait;
//! use terminet_session::{
//!     ServerConfig, SessionConfig, SessionEvent, SessionHandle, SessionHandler, TelnetServer,
//! };
//! use tokio::sync::mpsc;
//!
//! struct EchoHandler;
//!
//! #[async_trait]
//! impl SessionHandler for EchoHandler {
//!     async fn on_session(
//!         &self,
//!         _peer: SocketAddr,
//!         handle: SessionHandle,
//!         mut events: mpsc::UnboundedReceiver<SessionEvent>,
//!     ) {
//!         while let Some(event) = events.recv().await {
//!             match event {
//!                 SessionEvent::Data(bytes) => {
//!                     let _ = handle.write(bytes);
//!                 }
//!                 SessionEvent::Close => break,
//!                 _ => {}
//!             }
//!         }
//!     }
//! }
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::new("127.0.0.1:2323".parse()?)
//!     .with_session(SessionConfig::default().with_tty(true));
//! let server = TelnetServer::bind(config).await?;
//! server.serve(Arc::new(EchoHandler)).await?;
//! # Ok(())
//! # }
//! ```

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

mod config;
mod connection;
mod event;
mod result;
mod server;
mod session;
mod transport;

pub use self::config::SessionConfig;
pub use self::connection::{SessionConnection, SessionHandle};
pub use self::event::SessionEvent;
pub use self::result::{SessionError, SessionResult};
pub use self::server::{ServerConfig, SessionHandler, TelnetServer};
pub use self::session::TelnetSession;
pub use self::transport::Transport;

// Re-export the protocol types applications match against.
pub use terminet_telnetcodec::{
    CodecError, EnvEntry, EnvKind, OptionEvent, TelnetCommand, TelnetEvent, TelnetFrame,
    TelnetOption, TerminalType, WindowSize,
};
