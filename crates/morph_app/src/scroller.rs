//! Page scrolling
//!
//! The windowed host has no document, so [`PageScroller`] stands in for one:
//! a page exactly as long as the pinned range, scrolled by wheel and keys,
//! feeding its offset into a [`PinTrigger`].

use morph_animation::{PinConfig, PinTrigger, ProgressHandle};
use morph_platform::{InputEvent, Key, KeyState};

/// Pixels moved by the arrow keys
pub const LINE_STEP: f32 = 40.0;

/// Fraction of the viewport moved by page keys
const PAGE_FRACTION: f32 = 0.9;

/// Scroll position over the pinned range
#[derive(Debug)]
pub struct PageScroller {
    trigger: PinTrigger,
    offset: f32,
    viewport_height: f32,
}

impl PageScroller {
    pub fn new(config: PinConfig, viewport_height: f32) -> Self {
        Self {
            trigger: PinTrigger::new(config, viewport_height),
            offset: 0.0,
            viewport_height: viewport_height.max(0.0),
        }
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Largest reachable offset
    pub fn max_offset(&self) -> f32 {
        self.trigger.end().max(0.0)
    }

    pub fn trigger(&self) -> &PinTrigger {
        &self.trigger
    }

    /// Progress source for the renderer
    pub fn handle(&self) -> ProgressHandle {
        self.trigger.handle()
    }

    pub fn scroll_to(&mut self, offset: f32) {
        let offset = if offset.is_finite() { offset } else { 0.0 };
        self.offset = offset.clamp(0.0, self.max_offset());
        self.trigger.on_scroll(self.offset);
    }

    pub fn scroll_by(&mut self, delta: f32) {
        self.scroll_to(self.offset + delta);
    }

    /// Apply a wheel or key event
    ///
    /// Returns `true` if the event moved (or tried to move) the page.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        match event {
            // Wheel deltas are positive when scrolling up.
            InputEvent::Scroll { delta_y, .. } => {
                self.scroll_by(-delta_y);
                true
            }
            InputEvent::Keyboard(kb) if kb.state == KeyState::Pressed => {
                let page = self.viewport_height * PAGE_FRACTION;
                match kb.key {
                    Key::Home => self.scroll_to(0.0),
                    Key::End => self.scroll_to(self.max_offset()),
                    Key::PageDown | Key::Space => self.scroll_by(page),
                    Key::PageUp => self.scroll_by(-page),
                    Key::Down => self.scroll_by(LINE_STEP),
                    Key::Up => self.scroll_by(-LINE_STEP),
                    _ => return false,
                }
                true
            }
            _ => false,
        }
    }

    /// Follow a viewport change, keeping the offset inside the new range
    pub fn set_viewport_height(&mut self, height: f32) {
        if !height.is_finite() || height <= 0.0 {
            return;
        }
        self.viewport_height = height;
        self.trigger.set_viewport_height(height);
        self.scroll_to(self.offset);
    }

    /// Advance scrub smoothing; `true` while progress is still moving
    pub fn update(&mut self, dt: f32) -> bool {
        self.trigger.update(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use morph_platform::{key_event, scroll_event};

    fn immediate() -> PinConfig {
        PinConfig {
            scrub: None,
            ..Default::default()
        }
    }

    #[test]
    fn test_wheel_scrolls_down_and_clamps() {
        let mut page = PageScroller::new(immediate(), 400.0);
        assert_eq!(page.max_offset(), 1000.0);

        page.handle_input(&scroll_event(0.0, -250.0));
        assert_eq!(page.offset(), 250.0);
        assert_eq!(page.trigger().progress(), 0.25);

        page.handle_input(&scroll_event(0.0, -5000.0));
        assert_eq!(page.offset(), 1000.0);
        assert_eq!(page.trigger().progress(), 1.0);

        page.handle_input(&scroll_event(0.0, 5000.0));
        assert_eq!(page.offset(), 0.0);
    }

    #[test]
    fn test_keys() {
        let mut page = PageScroller::new(immediate(), 400.0);

        assert!(page.handle_input(&key_event(Key::End, KeyState::Pressed)));
        assert_eq!(page.offset(), 1000.0);
        assert!(page.handle_input(&key_event(Key::Home, KeyState::Pressed)));
        assert_eq!(page.offset(), 0.0);

        page.handle_input(&key_event(Key::PageDown, KeyState::Pressed));
        assert!((page.offset() - 360.0).abs() < 1e-3);
        page.handle_input(&key_event(Key::Up, KeyState::Pressed));
        assert!((page.offset() - 320.0).abs() < 1e-3);

        assert!(!page.handle_input(&key_event(Key::Down, KeyState::Released)));
        assert!(!page.handle_input(&key_event(Key::Escape, KeyState::Pressed)));
        assert!((page.offset() - 320.0).abs() < 1e-3);
    }

    #[test]
    fn test_viewport_shrink_clamps_offset() {
        let mut page = PageScroller::new(immediate(), 400.0);
        page.scroll_to(900.0);

        page.set_viewport_height(200.0);
        assert_eq!(page.max_offset(), 500.0);
        assert_eq!(page.offset(), 500.0);
        assert_eq!(page.trigger().progress(), 1.0);

        page.set_viewport_height(0.0);
        assert_eq!(page.max_offset(), 500.0);
    }

    #[test]
    fn test_scrubbed_progress_needs_updates() {
        let mut page = PageScroller::new(PinConfig::default(), 400.0);
        page.scroll_to(1000.0);
        assert_eq!(page.trigger().progress(), 0.0);

        let mut steps = 0;
        while page.update(1.0 / 60.0) {
            steps += 1;
            assert!(steps < 10_000);
        }
        assert_eq!(page.trigger().progress(), 1.0);
    }

    #[test]
    fn test_non_finite_offset_is_ignored() {
        let mut page = PageScroller::new(immediate(), 400.0);
        page.scroll_to(f32::NAN);
        assert_eq!(page.offset(), 0.0);
    }
}
