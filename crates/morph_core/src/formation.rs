//! Point cloud formations
//!
//! A formation is a flat array of `3 * n` floats describing one target
//! shape of the point cloud. Two generators are provided:
//!
//! - [`generate_sphere`] - deterministic Fibonacci lattice on a sphere surface
//! - [`generate_spread`] - randomized volumetric field with a denser rim

use std::f32::consts::PI;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::math::Vec3;

/// Probability that a spread point is pushed out to the rim
const EDGE_PROBABILITY: f64 = 0.3;
/// Radial multiplier applied to rim points
const EDGE_FACTOR: f32 = 1.3;
/// Innermost fraction of the spread radius a point can land on
const MIN_RADIUS_FRACTION: f32 = 0.2;
/// Flattening applied to the z axis after depth jitter
const DEPTH_SQUASH: f32 = 0.8;

/// Immutable set of particle positions, three floats per particle
#[derive(Clone, Debug, PartialEq)]
pub struct Formation {
    positions: Vec<f32>,
}

impl Formation {
    /// Wrap a flat position array; the length must be a multiple of three
    pub fn from_flat(positions: Vec<f32>) -> Self {
        debug_assert_eq!(positions.len() % 3, 0);
        Self { positions }
    }

    /// Number of particles
    pub fn len(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Position of particle `i`
    pub fn point(&self, i: usize) -> Vec3 {
        let base = i * 3;
        Vec3::new(
            self.positions[base],
            self.positions[base + 1],
            self.positions[base + 2],
        )
    }

    /// Iterate over all particle positions
    pub fn points(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.positions
            .chunks_exact(3)
            .map(|p| Vec3::new(p[0], p[1], p[2]))
    }

    /// Flat `[x0, y0, z0, x1, ...]` view
    pub fn as_slice(&self) -> &[f32] {
        &self.positions
    }
}

/// Shape parameters for the spread formation
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpreadParams {
    /// Outer radius of the field (before the rim factor)
    pub radius: f32,
    /// Amplitude of the extra z jitter
    pub depth: f32,
    /// Horizontal stretch, normally the viewport aspect ratio
    pub aspect: f32,
}

impl Default for SpreadParams {
    fn default() -> Self {
        Self {
            radius: 30.0,
            depth: 25.0,
            aspect: 1.0,
        }
    }
}

/// Place `n` points on a sphere of `radius` using a Fibonacci spiral
///
/// Point `i` sits at inclination `acos(-1 + 2i/n)` and azimuth
/// `sqrt(n * pi) * inclination`. The output only depends on `n` and `radius`.
pub fn generate_sphere(n: usize, radius: f32) -> Formation {
    let mut positions = Vec::with_capacity(n * 3);
    let winding = (n as f64 * std::f64::consts::PI).sqrt();

    for i in 0..n {
        let phi = (-1.0 + (2.0 * i as f64) / n as f64).acos();
        let theta = winding * phi;

        let sin_phi = phi.sin();
        positions.push((radius as f64 * theta.cos() * sin_phi) as f32);
        positions.push((radius as f64 * theta.sin() * sin_phi) as f32);
        positions.push((radius as f64 * phi.cos()) as f32);
    }

    tracing::debug!(count = n, radius, "generated sphere formation");
    Formation::from_flat(positions)
}

/// Scatter `n` points through a volume using `rng`
///
/// Directions are uniform on the sphere, radii fall in
/// `[0.2, 1.0] * radius`, 30% of points are pushed out by 1.3x to form a
/// rim, z gets an extra `depth` jitter and x is stretched by `aspect`.
pub fn generate_spread<R: Rng + ?Sized>(n: usize, params: &SpreadParams, rng: &mut R) -> Formation {
    let mut positions = Vec::with_capacity(n * 3);

    for _ in 0..n {
        let theta = rng.gen::<f32>() * PI * 2.0;
        let phi = (2.0 * rng.gen::<f32>() - 1.0).acos();
        let r = params.radius * (MIN_RADIUS_FRACTION + rng.gen::<f32>() * (1.0 - MIN_RADIUS_FRACTION));
        let edge = if rng.gen_bool(EDGE_PROBABILITY) {
            EDGE_FACTOR
        } else {
            1.0
        };

        let sin_phi = phi.sin();
        positions.push(r * sin_phi * theta.cos() * edge * params.aspect);
        positions.push(r * sin_phi * theta.sin() * edge);
        positions.push((r * phi.cos() + (rng.gen::<f32>() - 0.5) * params.depth) * DEPTH_SQUASH);
    }

    tracing::debug!(
        count = n,
        radius = params.radius,
        aspect = params.aspect,
        "generated spread formation"
    );
    Formation::from_flat(positions)
}
