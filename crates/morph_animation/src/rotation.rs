//! Per-frame rotation
//!
//! Yaw blends from the sphere rate to the spread rate with morph state.
//! Pitch and roll only spin once the cloud starts spreading.

use serde::{Deserialize, Serialize};

/// Radians added per frame
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationRates {
    /// Yaw rate while fully in the sphere formation
    pub sphere_y: f32,
    /// Yaw rate while fully spread
    pub spread_y: f32,
    /// Pitch rate at full spread
    pub spread_x: f32,
    /// Roll rate at full spread
    pub spread_z: f32,
}

impl Default for RotationRates {
    fn default() -> Self {
        Self {
            sphere_y: 0.002,
            spread_y: 0.0015,
            spread_x: 0.0008,
            spread_z: 0.0003,
        }
    }
}

/// Accumulated Euler angles in radians
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RotationState {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

/// Integrates rotation once per frame
#[derive(Clone, Debug, Default)]
pub struct RotationDriver {
    rates: RotationRates,
    state: RotationState,
}

impl RotationDriver {
    pub fn new(rates: RotationRates) -> Self {
        Self {
            rates,
            state: RotationState::default(),
        }
    }

    /// Yaw increment for morph state `eased`
    pub fn yaw_rate(&self, eased: f32) -> f32 {
        let m = eased.clamp(0.0, 1.0);
        self.rates.sphere_y * (1.0 - m) + self.rates.spread_y * m
    }

    /// Advance one frame at morph state `eased`
    pub fn advance(&mut self, eased: f32) -> RotationState {
        let m = eased.clamp(0.0, 1.0);
        self.state.yaw += self.yaw_rate(m);
        self.state.pitch += self.rates.spread_x * m;
        self.state.roll += self.rates.spread_z * m;
        self.state
    }

    pub fn state(&self) -> RotationState {
        self.state
    }

    pub fn rates(&self) -> RotationRates {
        self.rates
    }

    /// Return to zero orientation
    pub fn reset(&mut self) {
        self.state = RotationState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaw_rate_endpoints() {
        let driver = RotationDriver::new(RotationRates::default());
        assert!((driver.yaw_rate(0.0) - 0.002).abs() < 1e-9);
        assert!((driver.yaw_rate(1.0) - 0.0015).abs() < 1e-9);
        assert!((driver.yaw_rate(0.5) - 0.00175).abs() < 1e-9);
    }

    #[test]
    fn test_sphere_only_spins_about_y() {
        let mut driver = RotationDriver::new(RotationRates::default());
        for _ in 0..100 {
            driver.advance(0.0);
        }
        let state = driver.state();
        assert!((state.yaw - 0.2).abs() < 1e-4);
        assert_eq!(state.pitch, 0.0);
        assert_eq!(state.roll, 0.0);
    }

    #[test]
    fn test_angles_never_decrease() {
        let mut driver = RotationDriver::new(RotationRates::default());
        let mut prev = driver.state();
        for i in 0..500 {
            let eased = ((i as f32) * 0.37).sin().abs();
            let next = driver.advance(eased);
            assert!(next.yaw > prev.yaw);
            assert!(next.pitch >= prev.pitch);
            assert!(next.roll >= prev.roll);
            prev = next;
        }
    }

    #[test]
    fn test_full_spread_rates() {
        let mut driver = RotationDriver::new(RotationRates::default());
        let state = driver.advance(1.0);
        assert!((state.yaw - 0.0015).abs() < 1e-9);
        assert!((state.pitch - 0.0008).abs() < 1e-9);
        assert!((state.roll - 0.0003).abs() < 1e-9);

        driver.reset();
        assert_eq!(driver.state(), RotationState::default());
    }
}
