//! Color type and HSL conversion

/// RGB color
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build an sRGB color from hue, saturation and lightness, all in `0..=1`
    ///
    /// Hue wraps around, saturation and lightness are clamped.
    pub fn from_hsl(h: f32, s: f32, l: f32) -> Self {
        let h = h.rem_euclid(1.0);
        let s = s.clamp(0.0, 1.0);
        let l = l.clamp(0.0, 1.0);

        if s == 0.0 {
            return Self::rgb(l, l, l);
        }

        let q = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;

        Self::rgb(
            hue_to_channel(p, q, h + 1.0 / 3.0),
            hue_to_channel(p, q, h),
            hue_to_channel(p, q, h - 1.0 / 3.0),
        )
    }

    /// Convert an sRGB encoded color to linear light
    pub fn to_linear(&self) -> Self {
        Self::rgb(
            srgb_to_linear(self.r),
            srgb_to_linear(self.g),
            srgb_to_linear(self.b),
        )
    }

    pub fn to_array(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

fn hue_to_channel(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 0.5 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * 6.0 * (2.0 / 3.0 - t);
    }
    p
}

fn srgb_to_linear(c: f32) -> f32 {
    if c < 0.04045 {
        c * 0.0773993808
    } else {
        (c * 0.9478672986 + 0.0521327014).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Color, b: Color) -> bool {
        (a.r - b.r).abs() < 1e-5 && (a.g - b.g).abs() < 1e-5 && (a.b - b.b).abs() < 1e-5
    }

    #[test]
    fn test_hsl_primaries() {
        assert!(approx(Color::from_hsl(0.0, 1.0, 0.5), Color::rgb(1.0, 0.0, 0.0)));
        assert!(approx(
            Color::from_hsl(1.0 / 3.0, 1.0, 0.5),
            Color::rgb(0.0, 1.0, 0.0)
        ));
        assert!(approx(
            Color::from_hsl(2.0 / 3.0, 1.0, 0.5),
            Color::rgb(0.0, 0.0, 1.0)
        ));
    }

    #[test]
    fn test_hsl_grey_when_unsaturated() {
        assert!(approx(Color::from_hsl(0.4, 0.0, 0.3), Color::rgb(0.3, 0.3, 0.3)));
    }

    #[test]
    fn test_hsl_hue_wraps() {
        assert!(approx(Color::from_hsl(1.25, 0.8, 0.6), Color::from_hsl(0.25, 0.8, 0.6)));
    }

    #[test]
    fn test_linear_endpoints() {
        assert!(approx(Color::WHITE.to_linear(), Color::WHITE));
        assert!(approx(Color::BLACK.to_linear(), Color::BLACK));
        assert!(Color::rgb(0.5, 0.5, 0.5).to_linear().r < 0.5);
    }
}
