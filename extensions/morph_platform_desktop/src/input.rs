//! Desktop input conversion (winit -> morph_platform)

use morph_platform::{key_event, scroll_event, InputEvent, Key, KeyState};
use winit::event::{ElementState, MouseScrollDelta};
use winit::keyboard::{Key as WinitKey, NamedKey};

/// Pixels scrolled per wheel line
pub const LINE_HEIGHT: f32 = 40.0;

/// Convert winit element state to KeyState
pub fn convert_key_state(state: ElementState) -> KeyState {
    match state {
        ElementState::Pressed => KeyState::Pressed,
        ElementState::Released => KeyState::Released,
    }
}

/// Convert winit key to Key
pub fn convert_key(key: &WinitKey) -> Key {
    match key {
        WinitKey::Named(named) => match named {
            NamedKey::Escape => Key::Escape,
            NamedKey::Space => Key::Space,
            NamedKey::Home => Key::Home,
            NamedKey::End => Key::End,
            NamedKey::PageUp => Key::PageUp,
            NamedKey::PageDown => Key::PageDown,
            NamedKey::ArrowUp => Key::Up,
            NamedKey::ArrowDown => Key::Down,
            _ => Key::Unknown,
        },
        _ => Key::Unknown,
    }
}

/// Convert a winit keyboard event
pub fn convert_keyboard_event(key: &WinitKey, state: ElementState) -> InputEvent {
    key_event(convert_key(key), convert_key_state(state))
}

/// Convert a wheel delta to a pixel scroll event
pub fn convert_scroll(delta: MouseScrollDelta) -> InputEvent {
    let (dx, dy) = match delta {
        MouseScrollDelta::LineDelta(x, y) => (x * LINE_HEIGHT, y * LINE_HEIGHT),
        MouseScrollDelta::PixelDelta(pos) => (pos.x as f32, pos.y as f32),
    };
    scroll_event(dx, dy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_delta_in_pixels() {
        match convert_scroll(MouseScrollDelta::LineDelta(0.0, -2.0)) {
            InputEvent::Scroll { delta_y, .. } => assert_eq!(delta_y, -80.0),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_named_keys() {
        assert_eq!(convert_key(&WinitKey::Named(NamedKey::PageDown)), Key::PageDown);
        assert_eq!(convert_key(&WinitKey::Named(NamedKey::F1)), Key::Unknown);
    }
}
