//! Renderer configuration
//!
//! Everything is fixed when a [`ParticleMorph`](crate::ParticleMorph) is
//! constructed. Defaults reproduce the shipped effect; a TOML file may
//! override any subset:
//!
//! ```toml
//! easing = "ease-in-out-cubic"
//!
//! [particles]
//! count = 20000
//! seed = 7
//!
//! [pin]
//! scrub = 0.8
//! distance = { viewport-heights = 3.0 }
//! ```

use std::fs;
use std::path::Path;

use morph_animation::{Easing, PinConfig, PinDistance, RotationRates};
use morph_core::{PaletteConfig, SpreadParams};
use morph_gpu::{CameraConfig, PointStyle};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Particle count and randomness
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticlesConfig {
    pub count: usize,
    /// Seed for the spread formation and colors; random when absent
    pub seed: Option<u64>,
}

impl Default for ParticlesConfig {
    fn default() -> Self {
        Self {
            count: 12_000,
            seed: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereConfig {
    pub radius: f32,
}

impl Default for SphereConfig {
    fn default() -> Self {
        Self { radius: 8.0 }
    }
}

/// Spread formation extent; the aspect ratio comes from the viewport
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpreadConfig {
    pub radius: f32,
    pub depth: f32,
}

impl Default for SpreadConfig {
    fn default() -> Self {
        Self {
            radius: 30.0,
            depth: 25.0,
        }
    }
}

impl SpreadConfig {
    /// Generation parameters for a viewport of the given aspect ratio
    pub fn params(&self, aspect: f32) -> SpreadParams {
        SpreadParams {
            radius: self.radius,
            depth: self.depth,
            aspect,
        }
    }
}

/// Complete renderer configuration
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MorphConfig {
    pub easing: Easing,
    pub particles: ParticlesConfig,
    pub sphere: SphereConfig,
    pub spread: SpreadConfig,
    pub palette: PaletteConfig,
    pub rotation: RotationRates,
    pub pin: PinConfig,
    pub camera: CameraConfig,
    pub appearance: PointStyle,
}

impl MorphConfig {
    /// Parse from TOML, filling missing values with defaults
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Load from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject values the renderer cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let count = self.particles.count;
        if count == 0 || count > u32::MAX as usize {
            return Err(invalid(
                "particles.count",
                format!("must be between 1 and {}, got {}", u32::MAX, count),
            ));
        }

        positive("sphere.radius", self.sphere.radius)?;
        positive("spread.radius", self.spread.radius)?;
        non_negative("spread.depth", self.spread.depth)?;

        for (field, range) in [
            ("palette.hue", self.palette.hue),
            ("palette.saturation", self.palette.saturation),
            ("palette.lightness", self.palette.lightness),
        ] {
            if !range.iter().all(|v| v.is_finite()) || range[0] > range[1] {
                return Err(invalid(field, format!("{:?} is not an ascending range", range)));
            }
        }

        let rates = &self.rotation;
        for (field, rate) in [
            ("rotation.sphere_y", rates.sphere_y),
            ("rotation.spread_y", rates.spread_y),
            ("rotation.spread_x", rates.spread_x),
            ("rotation.spread_z", rates.spread_z),
        ] {
            non_negative(field, rate)?;
        }

        if let Some(scrub) = self.pin.scrub {
            non_negative("pin.scrub", scrub)?;
        }
        match self.pin.distance {
            PinDistance::ViewportHeights(n) => positive("pin.distance", n)?,
            PinDistance::Pixels(px) => positive("pin.distance", px)?,
        }
        if !self.pin.start.is_finite() {
            return Err(invalid("pin.start", "must be finite".into()));
        }

        let camera = &self.camera;
        if !(camera.fov > 0.0 && camera.fov < 180.0) {
            return Err(invalid(
                "camera.fov",
                format!("must be between 0 and 180 degrees, got {}", camera.fov),
            ));
        }
        positive("camera.near", camera.near)?;
        if !(camera.far.is_finite() && camera.far > camera.near) {
            return Err(invalid(
                "camera.far",
                format!("must exceed camera.near ({}), got {}", camera.near, camera.far),
            ));
        }
        if !camera.distance.is_finite() {
            return Err(invalid("camera.distance", "must be finite".into()));
        }

        positive("appearance.size", self.appearance.size)?;
        let opacity = self.appearance.opacity;
        if !(0.0..=1.0).contains(&opacity) {
            return Err(invalid(
                "appearance.opacity",
                format!("must be between 0 and 1, got {}", opacity),
            ));
        }

        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be positive and finite, got {}", value)))
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be non-negative and finite, got {}", value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_shipped_effect() {
        let config = MorphConfig::default();
        assert_eq!(config.particles.count, 12_000);
        assert_eq!(config.sphere.radius, 8.0);
        assert_eq!(config.spread.radius, 30.0);
        assert_eq!(config.spread.depth, 25.0);
        assert_eq!(config.camera.fov, 75.0);
        assert_eq!(config.camera.distance, 25.0);
        assert_eq!(config.appearance.size, 0.1);
        assert_eq!(config.appearance.opacity, 0.9);
        assert_eq!(config.pin.distance, PinDistance::ViewportHeights(2.5));
        assert_eq!(config.pin.scrub, Some(1.5));
        assert_eq!(config.easing, Easing::EaseInQuadOutCubic);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml() {
        let config = MorphConfig::from_toml_str(
            r#"
            easing = "ease-in-out-cubic"

            [particles]
            count = 500
            seed = 9

            [pin]
            distance = { pixels = 1500.0 }
            "#,
        )
        .unwrap();
        assert_eq!(config.easing, Easing::EaseInOutCubic);
        assert_eq!(config.particles.count, 500);
        assert_eq!(config.particles.seed, Some(9));
        assert_eq!(config.pin.distance, PinDistance::Pixels(1500.0));
        assert_eq!(config.pin.id, "particle-morph");
        assert_eq!(config.sphere, SphereConfig::default());
    }

    #[test]
    fn test_dump_and_reload() {
        let mut config = MorphConfig::default();
        config.particles.seed = Some(42);
        config.rotation.sphere_y = 0.004;
        let text = config.to_toml_string().unwrap();
        assert_eq!(MorphConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut config = MorphConfig::default();
        config.particles.count = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid {
                field: "particles.count",
                ..
            })
        ));

        let mut config = MorphConfig::default();
        config.sphere.radius = f32::NAN;
        assert!(config.validate().is_err());

        let mut config = MorphConfig::default();
        config.pin.scrub = Some(-1.0);
        assert!(config.validate().is_err());

        let mut config = MorphConfig::default();
        config.camera.far = 0.05;
        assert!(config.validate().is_err());

        let mut config = MorphConfig::default();
        config.palette.lightness = [0.9, 0.1];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_easing_is_a_parse_error() {
        assert!(matches!(
            MorphConfig::from_toml_str("easing = \"bouncy\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = MorphConfig::load("/nonexistent/particle-morph.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
