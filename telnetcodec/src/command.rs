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
/// The sixteen Telnet command codes, occupying bytes 240 through 255.
///
/// Every inbound command frame carries one of these as its verb. `Iac` (255)
/// appears here because `IAC IAC` is itself looked up as a command during the
/// scan; it denotes an escaped literal 0xFF data byte rather than a control
/// operation.
///
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TelnetCommand {
    /// [`consts::SE`] End of subnegotiation parameters.
    Se,
    /// [`consts::NOP`] No operation.
    Nop,
    /// [`consts::DM`] Data Mark.
    Dm,
    /// [`consts::BRK`] Break.
    Brk,
    /// [`consts::IP`] Interrupt Process.
    Ip,
    /// [`consts::AO`] Abort Output.
    Ao,
    /// [`consts::AYT`] Are You There.
    Ayt,
    /// [`consts::EC`] Erase Character.
    Ec,
    /// [`consts::EL`] Erase Line.
    El,
    /// [`consts::GA`] Go Ahead.
    Ga,
    /// [`consts::SB`] Subnegotiation Begin.
    Sb,
    /// [`consts::WILL`] Sender wants to enable an option locally.
    Will,
    /// [`consts::WONT`] Sender refuses to enable an option locally.
    Wont,
    /// [`consts::DO`] Sender asks the receiver to enable an option.
    Do,
    /// [`consts::DONT`] Sender demands the receiver disable an option.
    Dont,
    /// [`consts::IAC`] Escaped literal 0xFF data byte.
    Iac,
}

impl TelnetCommand {
    /// Looks up the command for a wire byte. Returns `None` for bytes below
    /// 240, which are never command verbs.
    pub fn from_u8(byte: u8) -> Option<TelnetCommand> {
        match byte {
            consts::SE => Some(TelnetCommand::Se),
            consts::NOP => Some(TelnetCommand::Nop),
            consts::DM => Some(TelnetCommand::Dm),
            consts::BRK => Some(TelnetCommand::Brk),
            consts::IP => Some(TelnetCommand::Ip),
            consts::AO => Some(TelnetCommand::Ao),
            consts::AYT => Some(TelnetCommand::Ayt),
            consts::EC => Some(TelnetCommand::Ec),
            consts::EL => Some(TelnetCommand::El),
            consts::GA => Some(TelnetCommand::Ga),
            consts::SB => Some(TelnetCommand::Sb),
            consts::WILL => Some(TelnetCommand::Will),
            consts::WONT => Some(TelnetCommand::Wont),
            consts::DO => Some(TelnetCommand::Do),
            consts::DONT => Some(TelnetCommand::Dont),
            consts::IAC => Some(TelnetCommand::Iac),
            _ => None,
        }
    }

    /// Converts this command into its wire byte.
    pub fn to_u8(self) -> u8 {
        match self {
            TelnetCommand::Se => consts::SE,
            TelnetCommand::Nop => consts::NOP,
            TelnetCommand::Dm => consts::DM,
            TelnetCommand::Brk => consts::BRK,
            TelnetCommand::Ip => consts::IP,
            TelnetCommand::Ao => consts::AO,
            TelnetCommand::Ayt => consts::AYT,
            TelnetCommand::Ec => consts::EC,
            TelnetCommand::El => consts::EL,
            TelnetCommand::Ga => consts::GA,
            TelnetCommand::Sb => consts::SB,
            TelnetCommand::Will => consts::WILL,
            TelnetCommand::Wont => consts::WONT,
            TelnetCommand::Do => consts::DO,
            TelnetCommand::Dont => consts::DONT,
            TelnetCommand::Iac => consts::IAC,
        }
    }

    /// Canonical lowercase name, e.g. `"will"` for 251 or `"sb"` for 250.
    pub fn name(self) -> &'static str {
        match self {
            TelnetCommand::Se => "se",
            TelnetCommand::Nop => "nop",
            TelnetCommand::Dm => "dm",
            TelnetCommand::Brk => "brk",
            TelnetCommand::Ip => "ip",
            TelnetCommand::Ao => "ao",
            TelnetCommand::Ayt => "ayt",
            TelnetCommand::Ec => "ec",
            TelnetCommand::El => "el",
            TelnetCommand::Ga => "ga",
            TelnetCommand::Sb => "sb",
            TelnetCommand::Will => "will",
            TelnetCommand::Wont => "wont",
            TelnetCommand::Do => "do",
            TelnetCommand::Dont => "dont",
            TelnetCommand::Iac => "iac",
        }
    }
}

impl std::fmt::Display for TelnetCommand {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_byte_round_trip() {
        for byte in 240..=255u8 {
            let command = TelnetCommand::from_u8(byte).expect("command in range");
            assert_eq!(command.to_u8(), byte);
        }
    }

    #[test]
    fn bytes_below_240_are_not_commands() {
        assert_eq!(TelnetCommand::from_u8(0), None);
        assert_eq!(TelnetCommand::from_u8(31), None);
        assert_eq!(TelnetCommand::from_u8(239), None);
    }

    #[test]
    fn canonical_names() {
        assert_eq!(TelnetCommand::Will.name(), "will");
        assert_eq!(TelnetCommand::Sb.name(), "sb");
        assert_eq!(TelnetCommand::Iac.name(), "iac");
    }
}
