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

use crate::config::SessionConfig;
use crate::connection::{SessionConnection, SessionHandle};
use crate::event::SessionEvent;
use crate::result::SessionResult;
use async_trait::async_trait;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Server configuration: where to listen and what every spawned session
/// inherits.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind.
    pub bind: SocketAddr,
    /// Configuration applied to each session at creation time. Sessions are
    /// not reconfigured afterwards.
    pub session: SessionConfig,
}

impl ServerConfig {
    /// Creates a server configuration with default session settings.
    pub fn new(bind: SocketAddr) -> Self {
        Self {
            bind,
            session: SessionConfig::default(),
        }
    }

    /// Sets the session configuration handed to every connection.
    pub fn with_session(mut self, session: SessionConfig) -> Self {
        self.session = session;
        self
    }
}

/// Application callback receiving each accepted session.
#[async_trait]
pub trait SessionHandler: Send + Sync + 'static {
    /// Called once per accepted connection with the session's handle and
    /// event stream. The session lives until the handler returns or the
    /// transport closes.
    async fn on_session(
        &self,
        peer: SocketAddr,
        handle: SessionHandle,
        events: mpsc::UnboundedReceiver<SessionEvent>,
    );
}

/// Accept-loop server that spawns one [`SessionConnection`] per inbound TCP
/// connection.
pub struct TelnetServer {
    listener: TcpListener,
    config: ServerConfig,
}

impl TelnetServer {
    /// Binds the listener. Use port 0 to let the OS pick one.
    pub async fn bind(config: ServerConfig) -> SessionResult<TelnetServer> {
        let listener = TcpListener::bind(config.bind).await?;
        info!(addr = %listener.local_addr()?, "telnet server listening");
        Ok(TelnetServer { listener, config })
    }

    /// The address the server is actually bound to.
    pub fn local_addr(&self) -> SessionResult<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Runs the accept loop forever, handing each session to `handler`.
    pub async fn serve(self, handler: Arc<dyn SessionHandler>) -> SessionResult<()> {
        loop {
            let (stream, peer) = self.listener.accept().await?;
            debug!(%peer, "session connected");
            let (handle, events) = SessionConnection::spawn(stream, self.config.session.clone());
            let handler = Arc::clone(&handler);
            tokio::spawn(async move {
                handler.on_session(peer, handle, events).await;
                debug!(%peer, "session handler finished");
            });
        }
    }
}
