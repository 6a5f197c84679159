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

use crate::consts;
use std::fmt::Formatter;

///
/// The Telnet options this engine recognises, out of the
/// [IANA registry](https://www.iana.org/assignments/telnet-options/telnet-options.xhtml).
///
/// Negotiations and subnegotiations for any other code decode to
/// [`TelnetOption::Unknown`]; they are tolerated, surfaced as generic events,
/// and never treated as an error.
///
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TelnetOption {
    /// [`consts::option::TRANSMIT_BINARY`] Binary Transmission [RFC856](https://tools.ietf.org/html/rfc856)
    TransmitBinary,
    /// [`consts::option::ECHO`] Echo [RFC857](https://tools.ietf.org/html/rfc857)
    Echo,
    /// [`consts::option::SUPPRESS_GO_AHEAD`] Suppress Go Ahead [RFC858](https://tools.ietf.org/html/rfc858)
    SuppressGoAhead,
    /// [`consts::option::STATUS`] Status [RFC859](https://tools.ietf.org/html/rfc859)
    Status,
    /// [`consts::option::TIMING_MARK`] Timing Mark [RFC860](https://tools.ietf.org/html/rfc860)
    TimingMark,
    /// [`consts::option::TERMINAL_TYPE`] Terminal Type [RFC1091](https://tools.ietf.org/html/rfc1091)
    TerminalType,
    /// [`consts::option::WINDOW_SIZE`] Negotiate About Window Size [RFC1073](https://tools.ietf.org/html/rfc1073)
    WindowSize,
    /// [`consts::option::TERMINAL_SPEED`] Terminal Speed [RFC1079](https://tools.ietf.org/html/rfc1079)
    TerminalSpeed,
    /// [`consts::option::REMOTE_FLOW_CONTROL`] Remote Flow Control [RFC1372](https://tools.ietf.org/html/rfc1372)
    RemoteFlowControl,
    /// [`consts::option::LINEMODE`] Linemode [RFC1184](https://tools.ietf.org/html/rfc1184)
    ///
    /// Acknowledged but its sub-grammar is not interpreted.
    Linemode,
    /// [`consts::option::X_DISPLAY_LOCATION`] X Display Location [RFC1096](https://tools.ietf.org/html/rfc1096)
    XDisplayLocation,
    /// [`consts::option::AUTHENTICATION`] Authentication [RFC2941](https://tools.ietf.org/html/rfc2941)
    Authentication,
    /// [`consts::option::ENVIRONMENT_VARIABLES`] New Environment [RFC1572](https://tools.ietf.org/html/rfc1572)
    EnvironmentVariables,
    /// Any option code outside the recognised set.
    Unknown(u8),
}

impl TelnetOption {
    /// `NAWS` is the historical name for [`TelnetOption::WindowSize`]; both
    /// spellings are part of the public command API.
    pub const NAWS: TelnetOption = TelnetOption::WindowSize;
    /// `NEW-ENVIRON` is the RFC 1572 name for
    /// [`TelnetOption::EnvironmentVariables`].
    pub const NEW_ENVIRON: TelnetOption = TelnetOption::EnvironmentVariables;

    /// Looks up the option for a wire byte.
    pub fn from_u8(byte: u8) -> TelnetOption {
        match byte {
            consts::option::TRANSMIT_BINARY => TelnetOption::TransmitBinary,
            consts::option::ECHO => TelnetOption::Echo,
            consts::option::SUPPRESS_GO_AHEAD => TelnetOption::SuppressGoAhead,
            consts::option::STATUS => TelnetOption::Status,
            consts::option::TIMING_MARK => TelnetOption::TimingMark,
            consts::option::TERMINAL_TYPE => TelnetOption::TerminalType,
            consts::option::WINDOW_SIZE => TelnetOption::WindowSize,
            consts::option::TERMINAL_SPEED => TelnetOption::TerminalSpeed,
            consts::option::REMOTE_FLOW_CONTROL => TelnetOption::RemoteFlowControl,
            consts::option::LINEMODE => TelnetOption::Linemode,
            consts::option::X_DISPLAY_LOCATION => TelnetOption::XDisplayLocation,
            consts::option::AUTHENTICATION => TelnetOption::Authentication,
            consts::option::ENVIRONMENT_VARIABLES => TelnetOption::EnvironmentVariables,
            other => TelnetOption::Unknown(other),
        }
    }

    /// Converts this option into its wire byte.
    pub fn to_u8(self) -> u8 {
        match self {
            TelnetOption::TransmitBinary => consts::option::TRANSMIT_BINARY,
            TelnetOption::Echo => consts::option::ECHO,
            TelnetOption::SuppressGoAhead => consts::option::SUPPRESS_GO_AHEAD,
            TelnetOption::Status => consts::option::STATUS,
            TelnetOption::TimingMark => consts::option::TIMING_MARK,
            TelnetOption::TerminalType => consts::option::TERMINAL_TYPE,
            TelnetOption::WindowSize => consts::option::WINDOW_SIZE,
            TelnetOption::TerminalSpeed => consts::option::TERMINAL_SPEED,
            TelnetOption::RemoteFlowControl => consts::option::REMOTE_FLOW_CONTROL,
            TelnetOption::Linemode => consts::option::LINEMODE,
            TelnetOption::XDisplayLocation => consts::option::X_DISPLAY_LOCATION,
            TelnetOption::Authentication => consts::option::AUTHENTICATION,
            TelnetOption::EnvironmentVariables => consts::option::ENVIRONMENT_VARIABLES,
            TelnetOption::Unknown(code) => code,
        }
    }

    /// Canonical lowercase name, e.g. `"window size"` for option 31.
    pub fn name(self) -> &'static str {
        match self {
            TelnetOption::TransmitBinary => "transmit binary",
            TelnetOption::Echo => "echo",
            TelnetOption::SuppressGoAhead => "suppress go ahead",
            TelnetOption::Status => "status",
            TelnetOption::TimingMark => "timing mark",
            TelnetOption::TerminalType => "terminal type",
            TelnetOption::WindowSize => "window size",
            TelnetOption::TerminalSpeed => "terminal speed",
            TelnetOption::RemoteFlowControl => "remote flow control",
            TelnetOption::Linemode => "linemode",
            TelnetOption::XDisplayLocation => "x display location",
            TelnetOption::Authentication => "authentication",
            TelnetOption::EnvironmentVariables => "environment variables",
            TelnetOption::Unknown(_) => "unknown",
        }
    }

    /// Short alias names, if the option has any.
    ///
    /// Window size also answers to `"naws"`/`"size"`, terminal type to
    /// `"term"`, and the environment option to `"new environ"`/`"env"`.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            TelnetOption::WindowSize => &["naws", "size"],
            TelnetOption::TerminalType => &["term"],
            TelnetOption::EnvironmentVariables => &["new environ", "env"],
            _ => &[],
        }
    }

    /// Whether this option is in the recognised registry.
    pub fn is_known(self) -> bool {
        !matches!(self, TelnetOption::Unknown(_))
    }
}

impl From<u8> for TelnetOption {
    fn from(byte: u8) -> Self {
        TelnetOption::from_u8(byte)
    }
}

impl From<TelnetOption> for u8 {
    fn from(option: TelnetOption) -> Self {
        option.to_u8()
    }
}

impl std::fmt::Display for TelnetOption {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TelnetOption::Unknown(code) => write!(f, "unknown({code})"),
            other => write!(f, "{}", other.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_round_trip() {
        for code in [0u8, 1, 3, 5, 6, 24, 31, 32, 33, 34, 35, 37, 39] {
            let option = TelnetOption::from_u8(code);
            assert!(option.is_known(), "code {code} should be recognised");
            assert_eq!(option.to_u8(), code);
        }
    }

    #[test]
    fn unrecognised_codes_decode_to_unknown() {
        for code in [2u8, 4, 7, 23, 25, 36, 38, 40, 42, 200] {
            assert_eq!(TelnetOption::from_u8(code), TelnetOption::Unknown(code));
        }
    }

    #[test]
    fn dual_names_are_the_same_option() {
        assert_eq!(TelnetOption::NAWS, TelnetOption::WindowSize);
        assert_eq!(
            TelnetOption::NEW_ENVIRON,
            TelnetOption::EnvironmentVariables
        );
        assert!(TelnetOption::WindowSize.aliases().contains(&"naws"));
        assert!(TelnetOption::EnvironmentVariables
            .aliases()
            .contains(&"new environ"));
    }
}
