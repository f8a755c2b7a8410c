// Adapter from winit events to raw input events

use super::dispatch::{EventKind, InputEvent};
use super::keys::KeyCode;
use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta};
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};

/// Scan code for a physical winit key, or `None` for keys the registry
/// has no slot for
pub fn scan_code(key: WinitKeyCode) -> Option<KeyCode> {
    let raw: u32 = match key {
        WinitKeyCode::Escape => 0x01,
        WinitKeyCode::Digit1 => 0x02,
        WinitKeyCode::Digit2 => 0x03,
        WinitKeyCode::Digit3 => 0x04,
        WinitKeyCode::Digit4 => 0x05,
        WinitKeyCode::Digit5 => 0x06,
        WinitKeyCode::Digit6 => 0x07,
        WinitKeyCode::Digit7 => 0x08,
        WinitKeyCode::Digit8 => 0x09,
        WinitKeyCode::Digit9 => 0x0a,
        WinitKeyCode::Digit0 => 0x0b,
        WinitKeyCode::Minus => 0x0c,
        WinitKeyCode::Equal => 0x0d,
        WinitKeyCode::Backspace => 0x0e,
        WinitKeyCode::Tab => 0x0f,
        WinitKeyCode::KeyQ => 0x10,
        WinitKeyCode::KeyW => 0x11,
        WinitKeyCode::KeyE => 0x12,
        WinitKeyCode::KeyR => 0x13,
        WinitKeyCode::KeyT => 0x14,
        WinitKeyCode::KeyY => 0x15,
        WinitKeyCode::KeyU => 0x16,
        WinitKeyCode::KeyI => 0x17,
        WinitKeyCode::KeyO => 0x18,
        WinitKeyCode::KeyP => 0x19,
        WinitKeyCode::BracketLeft => 0x1a,
        WinitKeyCode::BracketRight => 0x1b,
        WinitKeyCode::Enter => 0x1c,
        WinitKeyCode::ControlLeft => 0x1d,
        WinitKeyCode::KeyA => 0x1e,
        WinitKeyCode::KeyS => 0x1f,
        WinitKeyCode::KeyD => 0x20,
        WinitKeyCode::KeyF => 0x21,
        WinitKeyCode::KeyG => 0x22,
        WinitKeyCode::KeyH => 0x23,
        WinitKeyCode::KeyJ => 0x24,
        WinitKeyCode::KeyK => 0x25,
        WinitKeyCode::KeyL => 0x26,
        WinitKeyCode::Semicolon => 0x27,
        WinitKeyCode::Quote => 0x28,
        WinitKeyCode::Backquote => 0x29,
        WinitKeyCode::ShiftLeft => 0x2a,
        WinitKeyCode::Backslash => 0x2b,
        WinitKeyCode::KeyZ => 0x2c,
        WinitKeyCode::KeyX => 0x2d,
        WinitKeyCode::KeyC => 0x2e,
        WinitKeyCode::KeyV => 0x2f,
        WinitKeyCode::KeyB => 0x30,
        WinitKeyCode::KeyN => 0x31,
        WinitKeyCode::KeyM => 0x32,
        WinitKeyCode::Comma => 0x33,
        WinitKeyCode::Period => 0x34,
        WinitKeyCode::Slash => 0x35,
        WinitKeyCode::ShiftRight => 0x36,
        WinitKeyCode::NumpadMultiply => 0x37,
        WinitKeyCode::AltLeft => 0x38,
        WinitKeyCode::Space => 0x39,
        WinitKeyCode::CapsLock => 0x3a,
        WinitKeyCode::F1 => 0x3b,
        WinitKeyCode::F2 => 0x3c,
        WinitKeyCode::F3 => 0x3d,
        WinitKeyCode::F4 => 0x3e,
        WinitKeyCode::F5 => 0x3f,
        WinitKeyCode::F6 => 0x40,
        WinitKeyCode::F7 => 0x41,
        WinitKeyCode::F8 => 0x42,
        WinitKeyCode::F9 => 0x43,
        WinitKeyCode::F10 => 0x44,
        WinitKeyCode::NumLock => 0x45,
        WinitKeyCode::ScrollLock => 0x46,
        WinitKeyCode::Numpad7 => 0x47,
        WinitKeyCode::Numpad8 => 0x48,
        WinitKeyCode::Numpad9 => 0x49,
        WinitKeyCode::NumpadSubtract => 0x4a,
        WinitKeyCode::Numpad4 => 0x4b,
        WinitKeyCode::Numpad5 => 0x4c,
        WinitKeyCode::Numpad6 => 0x4d,
        WinitKeyCode::NumpadAdd => 0x4e,
        WinitKeyCode::Numpad1 => 0x4f,
        WinitKeyCode::Numpad2 => 0x50,
        WinitKeyCode::Numpad3 => 0x51,
        WinitKeyCode::Numpad0 => 0x52,
        WinitKeyCode::NumpadDecimal => 0x53,
        WinitKeyCode::IntlBackslash => 0x56,
        WinitKeyCode::F11 => 0x57,
        WinitKeyCode::F12 => 0x58,
        WinitKeyCode::F13 => 0x64,
        WinitKeyCode::F14 => 0x65,
        WinitKeyCode::F15 => 0x66,
        WinitKeyCode::F16 => 0x67,
        WinitKeyCode::KanaMode => 0x70,
        WinitKeyCode::IntlRo => 0x73,
        WinitKeyCode::Convert => 0x79,
        WinitKeyCode::NonConvert => 0x7b,
        WinitKeyCode::IntlYen => 0x7d,
        WinitKeyCode::NumpadEqual => 0x8d,
        WinitKeyCode::NumpadEnter => 0x9c,
        WinitKeyCode::ControlRight => 0x9d,
        WinitKeyCode::AudioVolumeMute => 0xa0,
        WinitKeyCode::LaunchApp2 => 0xa1,
        WinitKeyCode::MediaPlayPause => 0xa2,
        WinitKeyCode::MediaStop => 0xa4,
        WinitKeyCode::AudioVolumeDown => 0xae,
        WinitKeyCode::AudioVolumeUp => 0xb0,
        WinitKeyCode::BrowserHome => 0xb2,
        WinitKeyCode::NumpadComma => 0xb3,
        WinitKeyCode::NumpadDivide => 0xb5,
        WinitKeyCode::PrintScreen => 0xb7,
        WinitKeyCode::AltRight => 0xb8,
        WinitKeyCode::Pause => 0xc5,
        WinitKeyCode::Home => 0xc7,
        WinitKeyCode::ArrowUp => 0xc8,
        WinitKeyCode::PageUp => 0xc9,
        WinitKeyCode::ArrowLeft => 0xcb,
        WinitKeyCode::ArrowRight => 0xcd,
        WinitKeyCode::End => 0xcf,
        WinitKeyCode::ArrowDown => 0xd0,
        WinitKeyCode::PageDown => 0xd1,
        WinitKeyCode::Insert => 0xd2,
        WinitKeyCode::Delete => 0xd3,
        WinitKeyCode::SuperLeft => 0xdb,
        WinitKeyCode::SuperRight => 0xdc,
        WinitKeyCode::ContextMenu => 0xdd,
        WinitKeyCode::Power => 0xde,
        WinitKeyCode::Sleep => 0xdf,
        WinitKeyCode::WakeUp => 0xe3,
        WinitKeyCode::BrowserSearch => 0xe5,
        WinitKeyCode::BrowserFavorites => 0xe6,
        WinitKeyCode::BrowserRefresh => 0xe7,
        WinitKeyCode::BrowserStop => 0xe8,
        WinitKeyCode::BrowserForward => 0xe9,
        WinitKeyCode::BrowserBack => 0xea,
        WinitKeyCode::LaunchApp1 => 0xeb,
        WinitKeyCode::LaunchMail => 0xec,
        WinitKeyCode::MediaSelect => 0xed,
        _ => return None,
    };
    KeyCode::new(raw)
}

/// Mouse button code; buttons past the eighth are not bindable
pub fn mouse_button_code(button: MouseButton) -> Option<KeyCode> {
    let index: u32 = match button {
        MouseButton::Left => 0,
        MouseButton::Right => 1,
        MouseButton::Middle => 2,
        MouseButton::Back => 3,
        MouseButton::Forward => 4,
        MouseButton::Other(n) if (5..8).contains(&n) => n as u32,
        MouseButton::Other(_) => return None,
    };
    KeyCode::new(KeyCode::MOUSE1.raw() as u32 + index)
}

fn kind(state: ElementState) -> EventKind {
    match state {
        ElementState::Pressed => EventKind::KeyDown,
        ElementState::Released => EventKind::KeyUp,
    }
}

/// Raw event for a physical key. OS auto-repeat presses are dropped.
pub fn key_input(physical_key: PhysicalKey, state: ElementState, repeat: bool) -> Option<InputEvent> {
    if repeat {
        return None;
    }
    let PhysicalKey::Code(key) = physical_key else {
        return None;
    };
    let code = scan_code(key)?;
    Some(InputEvent::new(kind(state), code.raw() as u32))
}

/// Raw event for a winit keyboard event
pub fn key_event(event: &KeyEvent) -> Option<InputEvent> {
    key_input(event.physical_key, event.state, event.repeat)
}

/// Raw event for a mouse button
pub fn mouse_button_event(state: ElementState, button: MouseButton) -> Option<InputEvent> {
    let code = mouse_button_code(button)?;
    Some(InputEvent::new(kind(state), code.raw() as u32))
}

/// Wheel movement as press + release pairs of the wheel "keys"
pub fn wheel_events(delta: MouseScrollDelta) -> Vec<InputEvent> {
    let (x, y) = match delta {
        MouseScrollDelta::LineDelta(x, y) => (x as f64, y as f64),
        MouseScrollDelta::PixelDelta(position) => (position.x, position.y),
    };

    let mut keys = Vec::new();
    if y > 0.0 {
        keys.push(KeyCode::MWHEEL_UP);
    } else if y < 0.0 {
        keys.push(KeyCode::MWHEEL_DOWN);
    }
    if x > 0.0 {
        keys.push(KeyCode::MWHEEL_RIGHT);
    } else if x < 0.0 {
        keys.push(KeyCode::MWHEEL_LEFT);
    }

    keys.into_iter()
        .flat_map(|key| [InputEvent::key_down(key), InputEvent::key_up(key)])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::input::keys::code_for_name;
    use winit::dpi::PhysicalPosition;

    #[test]
    fn test_scan_codes_match_key_names() {
        let cases = [
            (WinitKeyCode::Escape, "Escape"),
            (WinitKeyCode::KeyW, "W"),
            (WinitKeyCode::KeyA, "A"),
            (WinitKeyCode::Digit0, "0"),
            (WinitKeyCode::BracketLeft, "["),
            (WinitKeyCode::Equal, "="),
            (WinitKeyCode::Backquote, "`"),
            (WinitKeyCode::Space, "Space"),
            (WinitKeyCode::F11, "F11"),
            (WinitKeyCode::NumpadEnter, "KP-Enter"),
            (WinitKeyCode::NumpadEqual, "KP="),
            (WinitKeyCode::ArrowUp, "UpArrow"),
            (WinitKeyCode::PrintScreen, "SysRq"),
            (WinitKeyCode::Delete, "Del"),
            (WinitKeyCode::MediaStop, "MediaStop"),
            (WinitKeyCode::LaunchMail, "Mail"),
        ];
        for (winit_key, name) in cases {
            assert_eq!(scan_code(winit_key), code_for_name(name), "{:?}", winit_key);
        }
    }

    #[test]
    fn test_scan_codes_are_keyboard_range() {
        assert!(scan_code(WinitKeyCode::MediaSelect).unwrap().is_keyboard());
    }

    #[test]
    fn test_unmapped_key() {
        assert_eq!(scan_code(WinitKeyCode::F24), None);
    }

    #[test]
    fn test_key_input() {
        let event = key_input(PhysicalKey::Code(WinitKeyCode::Space), ElementState::Pressed, false);
        assert_eq!(event, Some(InputEvent::key_down(KeyCode::SPACE)));

        let event = key_input(PhysicalKey::Code(WinitKeyCode::Space), ElementState::Released, false);
        assert_eq!(event, Some(InputEvent::key_up(KeyCode::SPACE)));
    }

    #[test]
    fn test_key_repeat_dropped() {
        assert!(key_input(PhysicalKey::Code(WinitKeyCode::Space), ElementState::Pressed, true).is_none());
    }

    #[test]
    fn test_mouse_buttons() {
        assert_eq!(mouse_button_code(MouseButton::Left), Some(KeyCode::MOUSE1));
        assert_eq!(mouse_button_code(MouseButton::Right), Some(KeyCode::MOUSE2));
        assert_eq!(mouse_button_code(MouseButton::Middle), Some(KeyCode::MOUSE3));
        assert_eq!(mouse_button_code(MouseButton::Back), Some(KeyCode::MOUSE4));
        assert_eq!(mouse_button_code(MouseButton::Forward), Some(KeyCode::MOUSE5));
        assert_eq!(mouse_button_code(MouseButton::Other(7)), code_for_name("Mouse8"));
        assert_eq!(mouse_button_code(MouseButton::Other(8)), None);

        assert_eq!(
            mouse_button_event(ElementState::Pressed, MouseButton::Left),
            Some(InputEvent::key_down(KeyCode::MOUSE1))
        );
    }

    #[test]
    fn test_wheel_events() {
        assert_eq!(
            wheel_events(MouseScrollDelta::LineDelta(0.0, 1.0)),
            vec![
                InputEvent::key_down(KeyCode::MWHEEL_UP),
                InputEvent::key_up(KeyCode::MWHEEL_UP)
            ]
        );
        assert_eq!(
            wheel_events(MouseScrollDelta::PixelDelta(PhysicalPosition::new(-3.0, -12.0))),
            vec![
                InputEvent::key_down(KeyCode::MWHEEL_DOWN),
                InputEvent::key_up(KeyCode::MWHEEL_DOWN),
                InputEvent::key_down(KeyCode::MWHEEL_LEFT),
                InputEvent::key_up(KeyCode::MWHEEL_LEFT),
            ]
        );
        assert!(wheel_events(MouseScrollDelta::LineDelta(0.0, 0.0)).is_empty());
    }
}
