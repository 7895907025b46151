//! Formation blending
//!
//! The live buffer is never edited directly: every progress change
//! re-derives all positions from the two formations.

use morph_core::{Formation, Vec3};

use crate::easing::{clamp_unit, Easing};

/// Positions actually submitted for drawing, three floats per particle
#[derive(Clone, Debug, PartialEq)]
pub struct LiveBuffer {
    positions: Vec<f32>,
}

impl LiveBuffer {
    /// Start from a copy of `formation`
    pub fn from_formation(formation: &Formation) -> Self {
        Self {
            positions: formation.as_slice().to_vec(),
        }
    }

    /// Number of particles
    pub fn len(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn point(&self, i: usize) -> Vec3 {
        let base = i * 3;
        Vec3::new(
            self.positions[base],
            self.positions[base + 1],
            self.positions[base + 2],
        )
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.positions
    }
}

/// Blend `sphere` towards `spread` by eased progress `t`, allocating a new buffer
///
/// # Panics
///
/// Panics if the formations differ in length.
pub fn blend(sphere: &Formation, spread: &Formation, t: f32, easing: Easing) -> LiveBuffer {
    let mut live = LiveBuffer::from_formation(sphere);
    blend_into(
        sphere.as_slice(),
        spread.as_slice(),
        easing.apply(t),
        &mut live.positions,
    );
    live
}

fn blend_into(sphere: &[f32], spread: &[f32], eased: f32, out: &mut [f32]) {
    assert_eq!(sphere.len(), spread.len(), "formation lengths differ");
    assert_eq!(sphere.len(), out.len(), "live buffer length differs");

    if eased <= 0.0 {
        out.copy_from_slice(sphere);
        return;
    }
    if eased >= 1.0 {
        out.copy_from_slice(spread);
        return;
    }

    for ((o, &a), &b) in out.iter_mut().zip(sphere).zip(spread) {
        *o = a + (b - a) * eased;
    }
}

/// Owns both formations and the live buffer derived from them
#[derive(Debug)]
pub struct MorphInterpolator {
    sphere: Formation,
    spread: Formation,
    live: LiveBuffer,
    easing: Easing,
    progress: f32,
    eased: f32,
}

impl MorphInterpolator {
    /// Create an interpolator resting on the sphere formation
    ///
    /// # Panics
    ///
    /// Panics if the formations differ in length.
    pub fn new(sphere: Formation, spread: Formation, easing: Easing) -> Self {
        assert_eq!(
            sphere.len(),
            spread.len(),
            "sphere and spread formations must have the same particle count"
        );
        let live = LiveBuffer::from_formation(&sphere);
        Self {
            sphere,
            spread,
            live,
            easing,
            progress: 0.0,
            eased: 0.0,
        }
    }

    /// Re-derive the live buffer for raw progress `t`
    ///
    /// `t` is clamped to `[0, 1]` and eased before blending. Returns the eased
    /// value.
    pub fn update(&mut self, t: f32) -> f32 {
        self.progress = clamp_unit(t);
        self.eased = self.easing.apply(self.progress);
        blend_into(
            self.sphere.as_slice(),
            self.spread.as_slice(),
            self.eased,
            &mut self.live.positions,
        );
        self.eased
    }

    /// Current eased morph state, `0.0` = sphere, `1.0` = spread
    pub fn morph_state(&self) -> f32 {
        self.eased
    }

    /// Last raw progress passed to [`update`](Self::update), after clamping
    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn live(&self) -> &LiveBuffer {
        &self.live
    }

    pub fn sphere(&self) -> &Formation {
        &self.sphere
    }

    pub fn spread(&self) -> &Formation {
        &self.spread
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Number of particles
    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}
