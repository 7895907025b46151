//! Input event types for scrolling and keyboard

/// Input events
#[derive(Clone, Debug)]
pub enum InputEvent {
    /// Keyboard event
    Keyboard(KeyboardEvent),
    /// Scroll/wheel event
    Scroll {
        /// Horizontal scroll delta in pixels
        delta_x: f32,
        /// Vertical scroll delta in pixels, positive when scrolling up
        delta_y: f32,
    },
}

/// Keyboard event
#[derive(Clone, Debug)]
pub struct KeyboardEvent {
    /// The key that was pressed or released
    pub key: Key,
    /// Whether the key was pressed or released
    pub state: KeyState,
}

/// Key press/release state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyState {
    /// Key was pressed
    Pressed,
    /// Key was released
    Released,
}

/// Keys the page scroller reacts to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Space,
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
    /// Any other key
    Unknown,
}

/// Build a scroll event
pub fn scroll_event(delta_x: f32, delta_y: f32) -> InputEvent {
    InputEvent::Scroll { delta_x, delta_y }
}

/// Build a key event
pub fn key_event(key: Key, state: KeyState) -> InputEvent {
    InputEvent::Keyboard(KeyboardEvent { key, state })
}
