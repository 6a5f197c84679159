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

//! Telnet protocol byte codes per [RFC 854](https://tools.ietf.org/html/rfc854)
//! and the option RFCs it references.

/// End of subnegotiation parameters.
pub const SE: u8 = 240;
/// No operation.
pub const NOP: u8 = 241;
/// Data Mark - the data stream portion of a Synch.
pub const DM: u8 = 242;
/// NVT character BRK.
pub const BRK: u8 = 243;
/// Interrupt Process.
pub const IP: u8 = 244;
/// Abort Output.
pub const AO: u8 = 245;
/// Are You There.
pub const AYT: u8 = 246;
/// Erase Character.
pub const EC: u8 = 247;
/// Erase Line.
pub const EL: u8 = 248;
/// Go Ahead.
pub const GA: u8 = 249;
/// Begin subnegotiation of the indicated option.
pub const SB: u8 = 250;
/// Indicates the desire to begin performing the indicated option.
pub const WILL: u8 = 251;
/// Indicates the refusal to perform the indicated option.
pub const WONT: u8 = 252;
/// Indicates the request that the other party perform the indicated option.
pub const DO: u8 = 253;
/// Indicates the demand that the other party stop performing the option.
pub const DONT: u8 = 254;
/// Interpret As Command - introduces every Telnet command sequence.
pub const IAC: u8 = 255;

/// Carriage Return.
pub const CR: u8 = b'\r';
/// Line Feed.
pub const LF: u8 = b'\n';

/// Recognised Telnet option codes.
///
/// Only the options this engine decodes are listed; any other code on the
/// wire produces a generic unknown-option event.
pub mod option {
    /// Binary Transmission [RFC856](https://tools.ietf.org/html/rfc856)
    pub const TRANSMIT_BINARY: u8 = 0;
    /// Echo [RFC857](https://tools.ietf.org/html/rfc857)
    pub const ECHO: u8 = 1;
    /// Suppress Go Ahead [RFC858](https://tools.ietf.org/html/rfc858)
    pub const SUPPRESS_GO_AHEAD: u8 = 3;
    /// Status [RFC859](https://tools.ietf.org/html/rfc859)
    pub const STATUS: u8 = 5;
    /// Timing Mark [RFC860](https://tools.ietf.org/html/rfc860)
    pub const TIMING_MARK: u8 = 6;
    /// Terminal Type [RFC1091](https://tools.ietf.org/html/rfc1091)
    pub const TERMINAL_TYPE: u8 = 24;
    /// Negotiate About Window Size [RFC1073](https://tools.ietf.org/html/rfc1073)
    pub const WINDOW_SIZE: u8 = 31;
    /// Terminal Speed [RFC1079](https://tools.ietf.org/html/rfc1079)
    pub const TERMINAL_SPEED: u8 = 32;
    /// Remote Flow Control [RFC1372](https://tools.ietf.org/html/rfc1372)
    pub const REMOTE_FLOW_CONTROL: u8 = 33;
    /// Linemode [RFC1184](https://tools.ietf.org/html/rfc1184)
    pub const LINEMODE: u8 = 34;
    /// X Display Location [RFC1096](https://tools.ietf.org/html/rfc1096)
    pub const X_DISPLAY_LOCATION: u8 = 35;
    /// Authentication [RFC2941](https://tools.ietf.org/html/rfc2941)
    pub const AUTHENTICATION: u8 = 37;
    /// New Environment [RFC1572](https://tools.ietf.org/html/rfc1572)
    pub const ENVIRONMENT_VARIABLES: u8 = 39;

    /// Terminal Type subnegotiation marker bytes.
    pub mod ttype {
        /// Terminal name response.
        pub const IS: u8 = 0;
        /// Terminal name solicitation.
        pub const SEND: u8 = 1;
    }

    /// New Environment subnegotiation marker bytes per RFC 1572.
    pub mod environ {
        /// Environment list response.
        pub const IS: u8 = 0;
        /// Environment list solicitation.
        pub const SEND: u8 = 1;
        /// Unsolicited environment update.
        pub const INFO: u8 = 2;
        /// Well-known variable marker.
        pub const VAR: u8 = 0;
        /// Name/value separator.
        pub const VALUE: u8 = 1;
        /// User-defined variable marker.
        pub const USERVAR: u8 = 3;
    }
}
