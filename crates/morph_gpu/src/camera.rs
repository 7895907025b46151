//! Perspective camera

use morph_core::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::ResizeError;

/// Camera settings
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Distance from the origin along +z
    pub distance: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: 75.0,
            distance: 25.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// Perspective camera looking at the origin from `(0, 0, distance)`
#[derive(Clone, Debug)]
pub struct Camera {
    config: CameraConfig,
    aspect: f32,
    view: Mat4,
    projection: Mat4,
}

impl Camera {
    /// Create a camera for a `width` x `height` viewport
    pub fn new(config: CameraConfig, width: u32, height: u32) -> Result<Self, ResizeError> {
        let aspect = aspect_of(width, height)?;
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, config.distance), Vec3::ZERO, Vec3::UP);
        let mut camera = Self {
            config,
            aspect,
            view,
            projection: Mat4::IDENTITY,
        };
        camera.rebuild_projection();
        Ok(camera)
    }

    /// Follow a new viewport size
    ///
    /// On error the previous projection is kept.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), ResizeError> {
        self.set_aspect(aspect_of(width, height)?)
    }

    pub fn set_aspect(&mut self, aspect: f32) -> Result<(), ResizeError> {
        if !aspect.is_finite() || aspect <= 0.0 {
            return Err(ResizeError::InvalidAspect(aspect));
        }
        self.aspect = aspect;
        self.rebuild_projection();
        Ok(())
    }

    fn rebuild_projection(&mut self) {
        self.projection = Mat4::perspective_rh(
            self.config.fov.to_radians(),
            self.aspect,
            self.config.near,
            self.config.far,
        );
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn view(&self) -> &Mat4 {
        &self.view
    }

    pub fn projection(&self) -> &Mat4 {
        &self.projection
    }
}

fn aspect_of(width: u32, height: u32) -> Result<f32, ResizeError> {
    if width == 0 || height == 0 {
        return Err(ResizeError::ZeroSize { width, height });
    }
    Ok(width as f32 / height as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_projects_to_center() {
        let camera = Camera::new(CameraConfig::default(), 1280, 720).unwrap();
        let clip = camera
            .projection()
            .mul(camera.view())
            .transform_point(Vec3::ZERO);
        assert!((clip[0] / clip[3]).abs() < 1e-6);
        assert!((clip[1] / clip[3]).abs() < 1e-6);
        let depth = clip[2] / clip[3];
        assert!(depth > 0.0 && depth < 1.0, "{}", depth);
    }

    #[test]
    fn test_resize_updates_aspect() {
        let mut camera = Camera::new(CameraConfig::default(), 800, 600).unwrap();
        camera.resize(1920, 1080).unwrap();
        assert!((camera.aspect() - 16.0 / 9.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_size_keeps_projection() {
        let mut camera = Camera::new(CameraConfig::default(), 800, 600).unwrap();
        let before = *camera.projection();

        assert_eq!(
            camera.resize(0, 600),
            Err(ResizeError::ZeroSize {
                width: 0,
                height: 600
            })
        );
        assert!(camera.set_aspect(f32::INFINITY).is_err());
        assert!(camera.set_aspect(f32::NAN).is_err());
        assert_eq!(*camera.projection(), before);
    }

    #[test]
    fn test_zero_size_rejected_at_creation() {
        assert!(Camera::new(CameraConfig::default(), 0, 0).is_err());
    }
}
