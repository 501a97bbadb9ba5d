//! Control panel core for a serial RGB lamp.
//!
//! Front end -> `panel` -> `lamp` -> `command` -> `link` -> lamp firmware.

pub mod command;
pub mod config;
pub mod lamp;
pub mod link;
pub mod panel;
pub mod parser;

pub use command::{Command, Effect, Mode, Rgb};
pub use lamp::{Lamp, LampState};
pub use link::{ConnectionError, LinkTransport};
pub use panel::{Action, Control, Panel, PanelError};
