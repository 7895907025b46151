//! Scroll-pinned progress
//!
//! A [`PinTrigger`] holds the canvas in place while the page scrolls through
//! a fixed distance and converts the scroll offset inside that range into
//! progress. With scrub enabled the published value trails the raw value and
//! catches up over roughly `scrub` seconds.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::easing::clamp_unit;
use crate::progress::{ProgressHandle, ProgressSignal};

/// Raw and smoothed progress closer than this are considered equal
const SNAP_EPSILON: f32 = 1e-4;

/// Exponent that brings the lag to ~98% within `scrub` seconds
const SCRUB_RATE: f32 = 4.0;

/// How far the page scrolls while pinned
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PinDistance {
    /// Multiple of the viewport height
    ViewportHeights(f32),
    /// Absolute distance in pixels
    Pixels(f32),
}

impl Default for PinDistance {
    fn default() -> Self {
        PinDistance::ViewportHeights(2.5)
    }
}

/// Scroll pin settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PinConfig {
    /// Identifier for the trigger, unique per page
    pub id: String,
    /// Scroll offset at which pinning begins
    pub start: f32,
    pub distance: PinDistance,
    /// Catch-up time in seconds, `None` to follow scroll directly
    pub scrub: Option<f32>,
}

impl Default for PinConfig {
    fn default() -> Self {
        Self {
            id: "particle-morph".to_string(),
            start: 0.0,
            distance: PinDistance::default(),
            scrub: Some(1.5),
        }
    }
}

/// Maps scroll offsets to morph progress
#[derive(Debug)]
pub struct PinTrigger {
    config: PinConfig,
    viewport_height: f32,
    scroll: f32,
    raw: f32,
    smoothed: f32,
    signal: ProgressSignal,
}

impl PinTrigger {
    pub fn new(config: PinConfig, viewport_height: f32) -> Self {
        Self {
            config,
            viewport_height: viewport_height.max(0.0),
            scroll: 0.0,
            raw: 0.0,
            smoothed: 0.0,
            signal: ProgressSignal::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.config.id
    }

    pub fn config(&self) -> &PinConfig {
        &self.config
    }

    /// Track a new viewport height and re-map the last scroll offset
    pub fn set_viewport_height(&mut self, height: f32) {
        if !height.is_finite() || height <= 0.0 {
            return;
        }
        self.viewport_height = height;
        self.on_scroll(self.scroll);
    }

    /// Pinned scroll distance in pixels
    pub fn distance(&self) -> f32 {
        match self.config.distance {
            PinDistance::ViewportHeights(n) => n * self.viewport_height,
            PinDistance::Pixels(px) => px,
        }
    }

    /// Scroll offset at which pinning ends
    pub fn end(&self) -> f32 {
        self.config.start + self.distance()
    }

    /// Extra page height added while pinned so following content is not overlapped
    pub fn spacing(&self) -> f32 {
        self.distance()
    }

    pub fn is_pinned(&self, offset: f32) -> bool {
        offset >= self.config.start && offset <= self.end()
    }

    /// Translation keeping the pinned element stationary at `offset`
    pub fn pin_offset(&self, offset: f32) -> f32 {
        (offset - self.config.start).clamp(0.0, self.distance().max(0.0))
    }

    /// Feed a scroll offset
    pub fn on_scroll(&mut self, offset: f32) {
        self.scroll = offset;
        let distance = self.distance();
        self.raw = if distance > 0.0 {
            clamp_unit((offset - self.config.start) / distance)
        } else if offset >= self.config.start {
            1.0
        } else {
            0.0
        };
        trace!(id = %self.config.id, offset, raw = self.raw, "scroll");

        if self.config.scrub.is_none() {
            self.smoothed = self.raw;
            self.signal.set(self.raw);
        }
    }

    /// Advance scrub smoothing by `dt` seconds and publish
    ///
    /// Returns `true` while still catching up.
    pub fn update(&mut self, dt: f32) -> bool {
        let scrub = match self.config.scrub {
            Some(s) if s > 0.0 => s,
            _ => {
                self.smoothed = self.raw;
                self.signal.set(self.raw);
                return false;
            }
        };

        let dt = dt.max(0.0);
        let alpha = 1.0 - (-SCRUB_RATE * dt / scrub).exp();
        self.smoothed += (self.raw - self.smoothed) * alpha;
        if (self.raw - self.smoothed).abs() < SNAP_EPSILON {
            self.smoothed = self.raw;
        }
        self.signal.set(self.smoothed);
        self.smoothed != self.raw
    }

    /// Unsmoothed progress for the last scroll offset
    pub fn raw_progress(&self) -> f32 {
        self.raw
    }

    /// Published progress
    pub fn progress(&self) -> f32 {
        self.signal.get()
    }

    pub fn handle(&self) -> ProgressHandle {
        self.signal.handle()
    }

    pub fn signal(&self) -> &ProgressSignal {
        &self.signal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn direct() -> PinConfig {
        PinConfig {
            scrub: None,
            ..PinConfig::default()
        }
    }

    #[test]
    fn test_default_range() {
        let trigger = PinTrigger::new(PinConfig::default(), 800.0);
        assert_eq!(trigger.id(), "particle-morph");
        assert_eq!(trigger.distance(), 2000.0);
        assert_eq!(trigger.end(), 2000.0);
        assert_eq!(trigger.spacing(), 2000.0);
    }

    #[test]
    fn test_direct_progress() {
        let mut trigger = PinTrigger::new(direct(), 800.0);
        trigger.on_scroll(500.0);
        assert!((trigger.progress() - 0.25).abs() < 1e-6);
        trigger.on_scroll(5000.0);
        assert_eq!(trigger.progress(), 1.0);
        trigger.on_scroll(-40.0);
        assert_eq!(trigger.progress(), 0.0);
    }

    #[test]
    fn test_pinning_window() {
        let config = PinConfig {
            start: 100.0,
            distance: PinDistance::Pixels(1000.0),
            ..direct()
        };
        let trigger = PinTrigger::new(config, 800.0);
        assert!(!trigger.is_pinned(50.0));
        assert!(trigger.is_pinned(100.0));
        assert!(trigger.is_pinned(1100.0));
        assert!(!trigger.is_pinned(1101.0));
        assert_eq!(trigger.pin_offset(50.0), 0.0);
        assert_eq!(trigger.pin_offset(600.0), 500.0);
        assert_eq!(trigger.pin_offset(4000.0), 1000.0);
    }

    #[test]
    fn test_scrub_lags_then_settles() {
        let mut trigger = PinTrigger::new(PinConfig::default(), 800.0);
        trigger.on_scroll(2000.0);
        assert_eq!(trigger.raw_progress(), 1.0);
        assert_eq!(trigger.progress(), 0.0);

        assert!(trigger.update(1.0 / 60.0));
        let first = trigger.progress();
        assert!(first > 0.0 && first < 0.1, "{}", first);

        let mut prev = first;
        for _ in 0..60 {
            trigger.update(1.0 / 60.0);
            assert!(trigger.progress() >= prev);
            prev = trigger.progress();
        }
        assert!(prev > 0.9 && prev < 1.0, "{}", prev);

        for _ in 0..600 {
            trigger.update(1.0 / 60.0);
        }
        assert_eq!(trigger.progress(), 1.0);
        assert!(!trigger.update(1.0 / 60.0));
    }

    #[test]
    fn test_resize_remaps_progress() {
        let mut trigger = PinTrigger::new(direct(), 800.0);
        trigger.on_scroll(1000.0);
        assert!((trigger.progress() - 0.5).abs() < 1e-6);
        trigger.set_viewport_height(400.0);
        assert_eq!(trigger.progress(), 1.0);
        trigger.set_viewport_height(0.0);
        assert_eq!(trigger.distance(), 1000.0);
    }

    #[test]
    fn test_config_from_toml() {
        let config: PinConfig = toml::from_str(
            r#"
            id = "hero"
            scrub = 0.5
            distance = { pixels = 1200.0 }
            "#,
        )
        .unwrap();
        assert_eq!(config.id, "hero");
        assert_eq!(config.start, 0.0);
        assert_eq!(config.distance, PinDistance::Pixels(1200.0));
        assert_eq!(config.scrub, Some(0.5));
    }
}
