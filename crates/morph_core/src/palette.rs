//! Per-particle color generation

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Flat `[r0, g0, b0, r1, ...]` colors in linear light, one triple per particle
pub type ColorArray = Vec<f32>;

/// HSL ranges the palette samples from
///
/// Each field is a `[min, max]` pair; values are drawn uniformly in between.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaletteConfig {
    pub hue: [f32; 2],
    pub saturation: [f32; 2],
    pub lightness: [f32; 2],
}

impl Default for PaletteConfig {
    /// Warm gold tones
    fn default() -> Self {
        Self {
            hue: [0.12, 0.16],
            saturation: [0.8, 1.0],
            lightness: [0.4, 0.8],
        }
    }
}

fn sample<R: Rng + ?Sized>(rng: &mut R, range: [f32; 2]) -> f32 {
    range[0] + rng.gen::<f32>() * (range[1] - range[0])
}

/// Generate `n` colors from the palette
pub fn generate_colors<R: Rng + ?Sized>(n: usize, palette: &PaletteConfig, rng: &mut R) -> ColorArray {
    let mut colors = Vec::with_capacity(n * 3);
    for _ in 0..n {
        let hue = sample(rng, palette.hue);
        let saturation = sample(rng, palette.saturation);
        let lightness = sample(rng, palette.lightness);
        colors.extend_from_slice(&Color::from_hsl(hue, saturation, lightness).to_linear().to_array());
    }
    colors
}
