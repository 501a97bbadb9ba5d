//! Lamp protocol line parser, the inverse of `Command::encode`.

use std::io::{self, Read};

use byteorder::ReadBytesExt;
use thiserror::Error;

use crate::command::{Command, Effect, Mode, Rgb};

/// Command buffer and line parser.
pub struct CommandParser {
    /// Commands parsed so far.
    pub cmds: Vec<Command>,
    /// Bytes of the line being read. Kept across I/O errors such as read
    /// timeouts, so the caller can retry without losing the line start.
    pending: Vec<u8>,
}

pub type ParserResult<T> = Result<T, ParserError>;

#[derive(Error, Debug)]
pub enum ParserError {
    #[error("unknown command: {0:?}")]
    UnknownCommand(String),
    #[error("unknown effect: {0:?}")]
    UnknownEffect(String),
    #[error("invalid color: {0:?}")]
    InvalidColor(String),
    #[error("stream ended in the middle of a line")]
    Truncated,
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl CommandParser {
    pub fn new() -> CommandParser {
        CommandParser {
            cmds: vec![],
            pending: vec![],
        }
    }

    /// Read every command until end-of-data.
    pub fn read_from(&mut self, buf: &mut dyn Read) -> ParserResult<()> {
        self.cmds.clear();
        while let Some(cmd) = self.read_command(buf)? {
            self.cmds.push(cmd);
        }
        Ok(())
    }

    /// Read the next command. Returns Ok(None) on end-of-data between lines.
    pub fn read_command(&mut self, buf: &mut dyn Read) -> ParserResult<Option<Command>> {
        match self.read_line(buf)? {
            Some(line) => parse_line(&line).map(Some),
            None => Ok(None),
        }
    }

    fn read_line(&mut self, buf: &mut dyn Read) -> ParserResult<Option<String>> {
        // Read bytes until we hit a newline
        loop {
            let byte = match buf.read_u8() {
                Ok(byte) => byte,
                Err(io_error) => match io_error.kind() {
                    io::ErrorKind::UnexpectedEof if self.pending.is_empty() => return Ok(None),
                    io::ErrorKind::UnexpectedEof => {
                        self.pending.clear();
                        return Err(ParserError::Truncated);
                    }
                    _ => return Err(ParserError::Io(io_error)),
                },
            };
            if byte == b'\n' {
                break;
            }
            self.pending.push(byte);
        }
        let mut tmp = std::mem::take(&mut self.pending);
        if tmp.last() == Some(&b'\r') {
            tmp.pop();
        }

        // The protocol is ASCII; anything else fails to match below anyway.
        Ok(Some(String::from_utf8_lossy(&tmp).to_string()))
    }
}

impl Default for CommandParser {
    fn default() -> CommandParser {
        CommandParser::new()
    }
}

/// Parse a single line, without its terminator.
pub fn parse_line(line: &str) -> ParserResult<Command> {
    if line == "AUTO" {
        return Ok(Command::Mode(Mode::Auto));
    }
    if line == "MANUAL" {
        return Ok(Command::Mode(Mode::Manual));
    }
    if let Some(name) = line.strip_prefix("EFFECT:") {
        return Effect::from_wire_name(name)
            .map(Command::Effect)
            .ok_or_else(|| ParserError::UnknownEffect(name.to_string()));
    }
    if let Some(channels) = line.strip_prefix("RGB:") {
        return parse_channels(channels)
            .map(Command::Color)
            .ok_or_else(|| ParserError::InvalidColor(channels.to_string()));
    }
    Err(ParserError::UnknownCommand(line.to_string()))
}

/// Channels must be plain decimal literals: no sign, no whitespace.
fn parse_channels(channels: &str) -> Option<Rgb> {
    let mut parts = channels.split(',');
    let mut channel = || -> Option<u8> {
        let part = parts.next()?;
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        part.parse().ok()
    };
    let rgb = Rgb::new(channel()?, channel()?, channel()?);
    if parts.next().is_some() {
        return None;
    }
    Some(rgb)
}
