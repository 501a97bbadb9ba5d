use std::io::Cursor;

use lampctl::link::MemoryLink;
use lampctl::parser::CommandParser;
use lampctl::{Command, ConnectionError, Effect, LampState, Mode, Panel, Rgb};

fn connected_panel() -> Panel<MemoryLink> {
    let mut panel = Panel::new(MemoryLink::new());
    panel.connect().expect("memory link opens");
    panel
}

fn sent(panel: &Panel<MemoryLink>) -> Vec<String> {
    panel.lamp().link().sent().to_vec()
}

#[test]
fn full_session() {
    let mut panel = connected_panel();
    assert_eq!(
        panel.current_state(),
        LampState {
            mode: Mode::Auto,
            color: Rgb::BLACK,
            effect: Effect::Static,
        }
    );

    panel.on_user_select_mode(Mode::Manual);
    assert_eq!(sent(&panel), vec!["MANUAL\n"]);

    panel.on_user_select_color(Rgb::new(255, 0, 0));
    assert_eq!(sent(&panel), vec!["MANUAL\n", "RGB:255,0,0\n", "EFFECT:STATIC\n"]);

    panel.on_user_select_effect(Effect::Heartbeat);
    assert_eq!(
        sent(&panel),
        vec!["MANUAL\n", "RGB:255,0,0\n", "EFFECT:STATIC\n", "EFFECT:HEART\n"]
    );

    assert_eq!(
        panel.current_state(),
        LampState {
            mode: Mode::Manual,
            color: Rgb::new(255, 0, 0),
            effect: Effect::Heartbeat,
        }
    );
}

#[test]
fn color_change_resends_the_selected_effect() {
    let colors = [Rgb::new(0, 0, 0), Rgb::new(255, 255, 255), Rgb::new(9, 99, 199)];
    for effect in Effect::ALL.iter() {
        for color in colors.iter() {
            let mut panel = connected_panel();
            panel.on_user_select_mode(Mode::Manual);
            panel.on_user_select_effect(*effect);
            let before = sent(&panel).len();

            panel.on_user_select_color(*color);
            let lines = sent(&panel);
            assert_eq!(
                &lines[before..],
                &[
                    format!("RGB:{},{},{}\n", color.red, color.green, color.blue),
                    Command::Effect(*effect).encode(),
                ]
            );
        }
    }
}

#[test]
fn disconnected_panel_stays_silent() {
    let mut panel = Panel::new(MemoryLink::new());
    panel.on_user_select_mode(Mode::Manual);
    panel.on_user_select_color(Rgb::new(1, 2, 3));
    panel.on_user_select_effect(Effect::Strobe);
    panel.on_user_select_mode(Mode::Auto);
    assert!(!panel.is_connected());
    assert!(sent(&panel).is_empty());
}

#[test]
fn failed_connect_can_be_retried_elsewhere() {
    let mut panel = Panel::new(MemoryLink::refusing());
    let err = panel.connect().unwrap_err();
    assert!(matches!(err, ConnectionError::NoDeviceSelected));
    assert_eq!(err.to_string(), "no device selected");
    assert!(!panel.is_connected());
}

#[test]
fn transmitted_lines_decode_to_the_same_commands() {
    let mut panel = connected_panel();
    panel.press("manual", None).unwrap();
    panel.press("strobe", None).unwrap();
    panel.press("color", Some("12,0,255")).unwrap();
    panel.press("auto", None).unwrap();

    let wire: String = sent(&panel).concat();
    let mut parser = CommandParser::new();
    parser.read_from(&mut Cursor::new(wire.as_bytes())).unwrap();
    assert_eq!(
        parser.cmds,
        vec![
            Command::Mode(Mode::Manual),
            Command::Effect(Effect::Strobe),
            Command::Color(Rgb::new(12, 0, 255)),
            Command::Effect(Effect::Strobe),
            Command::Mode(Mode::Auto),
        ]
    );
}
