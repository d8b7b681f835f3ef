use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::encode::{self, Document};
use crate::error::{ApiError, Result};
use crate::value::Value;

/// The control dimensions an item can be bound to
///
/// `State` is the raw status document of the receiver; every other kind is
/// a single field inside it that can also be set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandKind {
    /// Raw basic status document, read-only
    State,
    /// Main zone power (On/Standby)
    Power,
    /// Input selector
    Input,
    /// Master volume in tenths of a dB
    Volume,
    /// Mute switch
    Mute,
}

impl CommandKind {
    /// Every kind, in the order they are listed in item configuration docs
    pub const ALL: [CommandKind; 5] = [
        CommandKind::State,
        CommandKind::Power,
        CommandKind::Input,
        CommandKind::Volume,
        CommandKind::Mute,
    ];

    /// Configuration spelling of this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandKind::State => "state",
            CommandKind::Power => "power",
            CommandKind::Input => "input",
            CommandKind::Volume => "volume",
            CommandKind::Mute => "mute",
        }
    }

    /// True for kinds that can be sent to the receiver
    pub fn is_command(&self) -> bool {
        !matches!(self, CommandKind::State)
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandKind {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        CommandKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| ApiError::UnrecognizedCommand(s.to_string()))
    }
}

/// A setter command with its typed argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Power(bool),
    Input(String),
    Volume(i64),
    Mute(bool),
}

impl Command {
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Power(_) => CommandKind::Power,
            Command::Input(_) => CommandKind::Input,
            Command::Volume(_) => CommandKind::Volume,
            Command::Mute(_) => CommandKind::Mute,
        }
    }

    /// Build the PUT document for this command
    pub fn encode(&self) -> Document {
        match self {
            Command::Power(on) => encode::power(*on),
            Command::Input(name) => encode::input(name),
            Command::Volume(level) => encode::volume(*level),
            Command::Mute(on) => encode::mute(*on),
        }
    }

    /// Convert an item value into the command for `kind`
    ///
    /// Input names are forwarded untouched and volume levels are not range
    /// checked; the receiver decides what it accepts.
    pub fn from_value(kind: CommandKind, value: &Value) -> Result<Self> {
        let invalid = |reason: &str| ApiError::InvalidValue {
            kind: kind.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        };

        match kind {
            CommandKind::State => Err(invalid("state is read-only")),
            CommandKind::Power => value
                .as_bool()
                .map(Command::Power)
                .ok_or_else(|| invalid("expected a boolean")),
            CommandKind::Mute => value
                .as_bool()
                .map(Command::Mute)
                .ok_or_else(|| invalid("expected a boolean")),
            CommandKind::Volume => value
                .as_i64()
                .map(Command::Volume)
                .ok_or_else(|| invalid("expected an integer")),
            CommandKind::Input => value
                .as_text()
                .map(|name| Command::Input(name.to_string()))
                .ok_or_else(|| invalid("expected an input name")),
        }
    }
}
