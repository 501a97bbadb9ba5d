//! Presentation-facing surface of the lamp core.
//!
//! A front end renders the controls listed by [`Control::layout`] and reports
//! presses by name; the panel turns them into lamp actions. Layout and hit
//! testing stay in the front end.

use std::fmt;

use log::info;
use thiserror::Error;

use crate::command::{ColorParseError, Effect, Mode, Rgb};
use crate::lamp::{Lamp, LampState};
use crate::link::{ConnectionError, LinkTransport};

/// Every control a front end can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Auto,
    Manual,
    ColorPicker,
    Static,
    Breathing,
    Heartbeat,
    Strobe,
}

/// A user intent, ready for the lamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SelectMode(Mode),
    SelectColor(Rgb),
    SelectEffect(Effect),
}

#[derive(Error, Debug)]
pub enum PanelError {
    #[error("unknown control: {0}")]
    UnknownControl(String),
    #[error("{control} is not available in {mode} mode")]
    Hidden { control: Control, mode: Mode },
    #[error("{0} needs a value")]
    MissingValue(Control),
    #[error("{0} takes no value")]
    UnexpectedValue(Control),
    #[error(transparent)]
    InvalidColor(#[from] ColorParseError),
}

const CONTROLS: [(&str, Control); 7] = [
    ("auto", Control::Auto),
    ("manual", Control::Manual),
    ("color", Control::ColorPicker),
    ("static", Control::Static),
    ("breathing", Control::Breathing),
    ("heartbeat", Control::Heartbeat),
    ("strobe", Control::Strobe),
];

impl Control {
    pub fn from_name(name: &str) -> Option<Control> {
        let name = name.trim().to_lowercase();
        CONTROLS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, control)| *control)
    }

    pub fn name(self) -> &'static str {
        CONTROLS
            .iter()
            .find(|(_, control)| *control == self)
            .map(|(name, _)| *name)
            .unwrap_or("?")
    }

    /// Mode buttons are always shown; the rest only in manual mode.
    pub fn visible_in(self, mode: Mode) -> bool {
        match self {
            Control::Auto | Control::Manual => true,
            _ => mode == Mode::Manual,
        }
    }

    /// Controls to render for the given mode, in display order.
    pub fn layout(mode: Mode) -> Vec<Control> {
        CONTROLS
            .iter()
            .map(|(_, control)| *control)
            .filter(|control| control.visible_in(mode))
            .collect()
    }

    /// The intent behind pressing this control. Only the color picker
    /// carries a value; any other control given one is an error.
    pub fn action(self, value: Option<&str>) -> Result<Action, PanelError> {
        if self != Control::ColorPicker && value.is_some() {
            return Err(PanelError::UnexpectedValue(self));
        }
        let action = match self {
            Control::Auto => Action::SelectMode(Mode::Auto),
            Control::Manual => Action::SelectMode(Mode::Manual),
            Control::ColorPicker => {
                let value = value.ok_or(PanelError::MissingValue(self))?;
                Action::SelectColor(value.parse()?)
            }
            Control::Static => Action::SelectEffect(Effect::Static),
            Control::Breathing => Action::SelectEffect(Effect::Breathing),
            Control::Heartbeat => Action::SelectEffect(Effect::Heartbeat),
            Control::Strobe => Action::SelectEffect(Effect::Strobe),
        };
        Ok(action)
    }
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The lamp as seen by a front end.
pub struct Panel<L: LinkTransport> {
    lamp: Lamp<L>,
}

impl<L: LinkTransport> Panel<L> {
    pub fn new(link: L) -> Panel<L> {
        Panel {
            lamp: Lamp::new(link),
        }
    }

    pub fn connect(&mut self) -> Result<(), ConnectionError> {
        self.lamp.connect()?;
        info!("[panel] Connected");
        Ok(())
    }

    pub fn disconnect(&mut self) {
        self.lamp.disconnect();
    }

    pub fn is_connected(&self) -> bool {
        self.lamp.is_connected()
    }

    /// Snapshot for rendering.
    pub fn current_state(&self) -> LampState {
        self.lamp.state()
    }

    pub fn lamp(&self) -> &Lamp<L> {
        &self.lamp
    }

    pub fn on_user_select_mode(&mut self, mode: Mode) {
        self.lamp.set_mode(mode);
    }

    pub fn on_user_select_color(&mut self, color: Rgb) {
        self.lamp.set_color(color);
    }

    pub fn on_user_select_effect(&mut self, effect: Effect) {
        self.lamp.set_effect(effect);
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::SelectMode(mode) => self.on_user_select_mode(mode),
            Action::SelectColor(color) => self.on_user_select_color(color),
            Action::SelectEffect(effect) => self.on_user_select_effect(effect),
        }
    }

    /// Handle a press on the named control, as rendered for the current mode.
    pub fn press(&mut self, name: &str, value: Option<&str>) -> Result<Action, PanelError> {
        let control =
            Control::from_name(name).ok_or_else(|| PanelError::UnknownControl(name.to_string()))?;
        let mode = self.current_state().mode;
        if !control.visible_in(mode) {
            return Err(PanelError::Hidden { control, mode });
        }
        let action = control.action(value)?;
        self.dispatch(action);
        Ok(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link::MemoryLink;

    fn connected_panel() -> Panel<MemoryLink> {
        let mut panel = Panel::new(MemoryLink::new());
        panel.connect().unwrap();
        panel
    }

    #[test]
    fn auto_layout_only_has_mode_buttons() {
        assert_eq!(Control::layout(Mode::Auto), vec![Control::Auto, Control::Manual]);
        assert_eq!(Control::layout(Mode::Manual).len(), 7);
    }

    #[test]
    fn names_map_both_ways() {
        for (name, control) in CONTROLS.iter() {
            assert_eq!(Control::from_name(name), Some(*control));
            assert_eq!(control.name(), *name);
        }
        assert_eq!(Control::from_name("HeartBeat"), Some(Control::Heartbeat));
        assert_eq!(Control::from_name("rainbow"), None);
    }

    #[test]
    fn color_picker_needs_a_valid_value() {
        assert!(matches!(
            Control::ColorPicker.action(None),
            Err(PanelError::MissingValue(Control::ColorPicker))
        ));
        assert!(matches!(
            Control::ColorPicker.action(Some("#zz0000")),
            Err(PanelError::InvalidColor(_))
        ));
        assert_eq!(
            Control::ColorPicker.action(Some("#00ff00")).unwrap(),
            Action::SelectColor(Rgb::new(0, 255, 0))
        );
    }

    #[test]
    fn hidden_controls_are_rejected() {
        let mut panel = connected_panel();
        assert!(matches!(
            panel.press("strobe", None),
            Err(PanelError::Hidden { control: Control::Strobe, mode: Mode::Auto })
        ));
        assert!(matches!(panel.press("color", Some("#ffffff")), Err(PanelError::Hidden { .. })));
        assert!(panel.lamp().link().sent().is_empty());
    }

    #[test]
    fn presses_drive_the_lamp() {
        let mut panel = connected_panel();
        panel.press("manual", None).unwrap();
        panel.press("breathing", None).unwrap();
        panel.press("color", Some("#102030")).unwrap();
        assert_eq!(
            panel.lamp().link().sent(),
            [
                "MANUAL\n".to_string(),
                "EFFECT:BREATH\n".to_string(),
                "RGB:16,32,48\n".to_string(),
                "EFFECT:BREATH\n".to_string(),
            ]
        );
    }

    #[test]
    fn buttons_take_no_value() {
        assert!(matches!(
            Control::Strobe.action(Some("fast")),
            Err(PanelError::UnexpectedValue(Control::Strobe))
        ));
        let mut panel = connected_panel();
        assert!(matches!(
            panel.press("manual", Some("foo")),
            Err(PanelError::UnexpectedValue(Control::Manual))
        ));
        assert_eq!(panel.current_state().mode, Mode::Auto);
        assert!(panel.lamp().link().sent().is_empty());
    }

    #[test]
    fn unknown_control_sends_nothing() {
        let mut panel = connected_panel();
        assert!(matches!(panel.press("disco", None), Err(PanelError::UnknownControl(_))));
        assert!(panel.lamp().link().sent().is_empty());
    }
}
