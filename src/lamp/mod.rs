//! The lamp state machine keeps the panel's belief about the lamp and decides
//! which commands go over the link for each user action.

use log::{debug, warn};
use serde::Serialize;

use crate::command::{Command, Effect, Mode, Rgb};
use crate::link::{ConnectionError, LinkTransport};

/// What the panel believes the lamp is doing.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LampState {
    pub mode: Mode,
    /// Last chosen color. Kept while in auto mode so manual mode resumes it.
    pub color: Rgb,
    /// Last chosen effect. Kept while in auto mode for the same reason.
    pub effect: Effect,
}

/// Owns the lamp state and the link it is mirrored to.
pub struct Lamp<L: LinkTransport> {
    state: LampState,
    link: L,
}

impl<L: LinkTransport> Lamp<L> {
    pub fn new(link: L) -> Lamp<L> {
        Lamp {
            state: LampState::default(),
            link,
        }
    }

    /// Open the link and start a fresh session.
    pub fn connect(&mut self) -> Result<(), ConnectionError> {
        self.link.open()?;
        self.state = LampState::default();
        Ok(())
    }

    /// Close the link. The session state is discarded.
    pub fn disconnect(&mut self) {
        self.link.close();
        self.state = LampState::default();
    }

    pub fn is_connected(&self) -> bool {
        self.link.is_connected()
    }

    pub fn state(&self) -> LampState {
        self.state
    }

    pub fn link(&self) -> &L {
        &self.link
    }

    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }

    /// Switch modes. The mode command is sent even if the mode is unchanged.
    pub fn set_mode(&mut self, mode: Mode) {
        self.state.mode = mode;
        self.transmit(Command::Mode(mode));
    }

    /// Change the color, then re-send the current effect.
    ///
    /// The firmware restarts its effect routine whenever new color bytes
    /// arrive, so the effect line must follow the color line directly.
    /// Ignored in auto mode.
    pub fn set_color(&mut self, color: Rgb) {
        if self.state.mode != Mode::Manual {
            warn!("[lamp] Ignoring color {} outside manual mode", color);
            return;
        }
        self.state.color = color;
        self.transmit(Command::Color(color));
        self.transmit(Command::Effect(self.state.effect));
    }

    /// Change the effect. Ignored in auto mode.
    pub fn set_effect(&mut self, effect: Effect) {
        if self.state.mode != Mode::Manual {
            warn!("[lamp] Ignoring effect {} outside manual mode", effect);
            return;
        }
        self.state.effect = effect;
        self.transmit(Command::Effect(effect));
    }

    /// Encode and write a command. Dropped silently when the link is down.
    fn transmit(&mut self, cmd: Command) {
        if !self.link.is_connected() {
            debug!("[lamp] Link down, dropping {}", cmd);
            return;
        }
        let line = cmd.encode();
        self.link.write_line(line.as_bytes());
        debug!("Sent: {}", cmd);
    }
}
