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

//! Session configuration
//!
//! # Examples
//!
//! ```
//! use terminet_session::SessionConfig;
//!
//! let config = SessionConfig::default()
//!     .with_tty(true)
//!     .with_terminal_size(120, 40);
//! assert!(config.convert_lf);
//! ```

/// Per-session configuration, applied at session-creation time.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Rewrite lone `\n` bytes to `\r\n` on output. Each write is converted
    /// independently; a `\r` at the end of one write does not suppress
    /// conversion at the start of the next.
    pub convert_lf: bool,

    /// Treat the peer as an interactive terminal: on session open,
    /// proactively send `DO TRANSMIT-BINARY`, `DO TERMINAL-TYPE`, `DO NAWS`
    /// and `DO NEW-ENVIRON`.
    pub tty: bool,

    /// Log each decoded option event at debug level.
    pub debug: bool,

    /// Terminal type assumed until the peer announces one.
    pub terminal_type: String,

    /// Terminal width assumed until the peer announces its window size.
    pub width: u16,

    /// Terminal height assumed until the peer announces its window size.
    pub height: u16,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            convert_lf: true,
            tty: false,
            debug: false,
            terminal_type: "ansi".to_string(),
            width: 80,
            height: 24,
        }
    }
}

impl SessionConfig {
    /// Enable or disable LF-to-CRLF output conversion
    pub fn with_convert_lf(mut self, enabled: bool) -> Self {
        self.convert_lf = enabled;
        self
    }

    /// Enable or disable tty mode
    pub fn with_tty(mut self, enabled: bool) -> Self {
        self.tty = enabled;
        self
    }

    /// Enable or disable parse-trace logging
    pub fn with_debug(mut self, enabled: bool) -> Self {
        self.debug = enabled;
        self
    }

    /// Set the initial terminal type
    pub fn with_terminal_type(mut self, terminal_type: impl Into<String>) -> Self {
        self.terminal_type = terminal_type.into();
        self
    }

    /// Set the initial terminal size
    pub fn with_terminal_size(mut self, width: u16, height: u16) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}
