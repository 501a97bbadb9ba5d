//! Lamp wire protocol: one newline-terminated ASCII line per state change.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Device-wide operating mode.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Mode {
    /// The device manages its own lighting.
    Auto,
    /// The host dictates color and effect.
    Manual,
}

/// Lighting animation the device runs in manual mode.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Effect {
    Static,
    Breathing,
    Heartbeat,
    Strobe,
}

/// An RGB color, one byte per channel.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

/// A single host to device command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Mode(Mode),
    Color(Rgb),
    Effect(Effect),
}

impl Default for Mode {
    fn default() -> Mode {
        Mode::Auto
    }
}

impl Default for Effect {
    fn default() -> Effect {
        Effect::Static
    }
}

impl Mode {
    pub fn name(self) -> &'static str {
        match self {
            Mode::Auto => "auto",
            Mode::Manual => "manual",
        }
    }
}

impl Effect {
    pub const ALL: [Effect; 4] = [
        Effect::Static,
        Effect::Breathing,
        Effect::Heartbeat,
        Effect::Strobe,
    ];

    /// Name used on the wire after `EFFECT:`.
    pub fn wire_name(self) -> &'static str {
        match self {
            Effect::Static => "STATIC",
            Effect::Breathing => "BREATH",
            Effect::Heartbeat => "HEART",
            Effect::Strobe => "STROBE",
        }
    }

    pub fn from_wire_name(name: &str) -> Option<Effect> {
        Effect::ALL.iter().copied().find(|e| e.wire_name() == name)
    }

    /// Human-readable name, as shown on the panel.
    pub fn name(self) -> &'static str {
        match self {
            Effect::Static => "static",
            Effect::Breathing => "breathing",
            Effect::Heartbeat => "heartbeat",
            Effect::Strobe => "strobe",
        }
    }
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(red: u8, green: u8, blue: u8) -> Rgb {
        Rgb { red, green, blue }
    }
}

impl Command {
    /// Render the command as a complete protocol line, including the newline.
    pub fn encode(&self) -> String {
        format!("{}\n", self)
    }
}

/// Writes the line without its terminator.
impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Mode(Mode::Auto) => f.write_str("AUTO"),
            Command::Mode(Mode::Manual) => f.write_str("MANUAL"),
            Command::Color(Rgb { red, green, blue }) => {
                write!(f, "RGB:{},{},{}", red, green, blue)
            }
            Command::Effect(effect) => write!(f, "EFFECT:{}", effect.wire_name()),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown mode: {0}")]
pub struct ModeParseError(pub String);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown effect: {0}")]
pub struct EffectParseError(pub String);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid color {0:?}, expected #rrggbb or r,g,b")]
pub struct ColorParseError(pub String);

impl FromStr for Mode {
    type Err = ModeParseError;

    fn from_str(s: &str) -> Result<Mode, ModeParseError> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(Mode::Auto),
            "manual" => Ok(Mode::Manual),
            _ => Err(ModeParseError(s.to_string())),
        }
    }
}

/// Accepts both panel names and wire names.
impl FromStr for Effect {
    type Err = EffectParseError;

    fn from_str(s: &str) -> Result<Effect, EffectParseError> {
        let wanted = s.trim().to_lowercase();
        Effect::ALL
            .iter()
            .copied()
            .find(|e| e.name() == wanted || e.wire_name().to_lowercase() == wanted)
            .ok_or_else(|| EffectParseError(s.to_string()))
    }
}

/// Parses `#rrggbb` (the color picker format) or decimal `r,g,b`.
impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Rgb, ColorParseError> {
        let s = s.trim();
        let err = || ColorParseError(s.to_string());

        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(err());
            }
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
            return Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?));
        }

        let channels = s
            .split(',')
            .map(|part| {
                let part = part.trim();
                // `u8::from_str` would also take a leading `+`.
                if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(err());
                }
                part.parse::<u8>().map_err(|_| err())
            })
            .collect::<Result<Vec<u8>, ColorParseError>>()?;
        match channels.as_slice() {
            [red, green, blue] => Ok(Rgb::new(*red, *green, *blue)),
            _ => Err(err()),
        }
    }
}
