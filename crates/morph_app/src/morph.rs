//! The particle morph renderer
//!
//! [`ParticleMorph`] is an explicit state machine:
//!
//! ```text
//! Uninitialized --activate--> Active --deactivate--> Disposed
//!       |                                              ^
//!       +--------------- failed activate --------------+
//! ```
//!
//! While active it owns a drawing surface, a point cloud uploaded to it, the
//! camera and the morph/rotation state, plus three host registrations: a
//! resize listener, a recurring frame request and a progress subscription.
//! Teardown releases them in that order before the GPU resources, so no
//! callback can reach a renderer whose buffers are gone.

use morph_animation::{MorphInterpolator, ProgressHandle, ProgressSubscription, RotationDriver};
use morph_core::{generate_colors, generate_sphere, generate_spread, Mat4};
use morph_gpu::{Camera, DrawSurface, FrameUniforms, RenderBackend, ResizeError};
use morph_platform::{FrameRequest, ResizeListener, SurfaceContainer};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::config::MorphConfig;
use crate::error::{MorphError, Result};

/// Lifecycle state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleState {
    Uninitialized,
    Active,
    Disposed,
}

/// What a call to [`ParticleMorph::frame`] did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Not active; nothing touched
    Skipped,
    /// A frame was drawn
    Drawn {
        /// Whether the live buffer was rebuilt for new progress
        rebuilt: bool,
    },
}

/// Resources held only while active
struct Mounted<S: DrawSurface> {
    resize_listener: Option<ResizeListener>,
    frame_request: Option<FrameRequest>,
    progress: Option<ProgressSubscription>,
    cloud: Option<S::PointCloud>,
    surface: S,
    camera: Camera,
    morph: MorphInterpolator,
    rotation: RotationDriver,
}

/// Scroll-driven sphere-to-spread particle renderer
pub struct ParticleMorph<B: RenderBackend> {
    config: MorphConfig,
    backend: B,
    progress: ProgressHandle,
    state: LifecycleState,
    mounted: Option<Mounted<B::Surface>>,
}

impl<B: RenderBackend> ParticleMorph<B> {
    /// Create an inactive renderer reading progress from `progress`
    pub fn new(config: MorphConfig, backend: B, progress: ProgressHandle) -> Self {
        Self {
            config,
            backend,
            progress,
            state: LifecycleState::Uninitialized,
            mounted: None,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == LifecycleState::Active
    }

    pub fn config(&self) -> &MorphConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mount into `container`
    ///
    /// Any failure leaves nothing allocated and moves the renderer to
    /// [`LifecycleState::Disposed`]; a fresh instance is needed to retry.
    pub fn activate<C: SurfaceContainer + ?Sized>(&mut self, container: &C) -> Result<()> {
        match self.state {
            LifecycleState::Uninitialized => {}
            LifecycleState::Active => return Err(MorphError::AlreadyActive),
            LifecycleState::Disposed => return Err(MorphError::Disposed),
        }

        match self.mount(container) {
            Ok(mounted) => {
                info!(
                    id = %self.config.pin.id,
                    "Particle morph active with {} particles",
                    mounted.morph.len()
                );
                self.mounted = Some(mounted);
                self.state = LifecycleState::Active;
                Ok(())
            }
            Err(e) => {
                tracing::error!(id = %self.config.pin.id, "Activation failed: {}", e);
                self.state = LifecycleState::Disposed;
                Err(e)
            }
        }
    }

    fn mount<C: SurfaceContainer + ?Sized>(
        &mut self,
        container: &C,
    ) -> Result<Mounted<B::Surface>> {
        let (width, height) = container.viewport();

        let mut surface = self.backend.acquire(width, height)?;

        let camera = match Camera::new(self.config.camera, width, height) {
            Ok(camera) => camera,
            Err(e) => {
                self.backend.detach(surface);
                return Err(e.into());
            }
        };

        let count = self.config.particles.count;
        let mut rng = match self.config.particles.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let sphere = generate_sphere(count, self.config.sphere.radius);
        let spread = generate_spread(count, &self.config.spread.params(camera.aspect()), &mut rng);
        let colors = generate_colors(count, &self.config.palette, &mut rng);

        let cloud = match surface.create_point_cloud(sphere.as_slice(), &colors) {
            Ok(cloud) => cloud,
            Err(e) => {
                self.backend.detach(surface);
                return Err(e.into());
            }
        };

        let host = container.host();
        let resize_listener = host.listen_resize();
        let frame_request = host.request_frames();
        if frame_request.is_none() {
            warn!("Host is gone; no frames will be delivered");
        }
        let progress = self.progress.subscribe();
        if progress.is_none() {
            warn!("Progress source is gone; holding the sphere formation");
        }

        Ok(Mounted {
            resize_listener,
            frame_request,
            progress,
            cloud: Some(cloud),
            surface,
            camera,
            morph: MorphInterpolator::new(sphere, spread, self.config.easing),
            rotation: RotationDriver::new(self.config.rotation),
        })
    }

    /// Render one frame
    ///
    /// Applies a pending resize, rebuilds the live buffer if progress moved
    /// since the last frame, advances rotation, then draws.
    pub fn frame(&mut self) -> Result<FrameOutcome> {
        if self.state != LifecycleState::Active {
            return Ok(FrameOutcome::Skipped);
        }

        let pending = self
            .mounted
            .as_ref()
            .and_then(|m| m.resize_listener.as_ref())
            .and_then(|listener| listener.take_pending());
        if let Some((width, height)) = pending {
            if let Err(e) = self.resize(width, height) {
                debug!("Keeping previous projection after {}", e);
            }
        }

        let Some(m) = self.mounted.as_mut() else {
            return Ok(FrameOutcome::Skipped);
        };
        let Some(cloud) = m.cloud.as_ref() else {
            return Ok(FrameOutcome::Skipped);
        };

        let mut rebuilt = false;
        if let Some(t) = m.progress.as_mut().and_then(|p| p.take_changed()) {
            m.morph.update(t);
            m.surface.write_positions(cloud, m.morph.live().as_slice());
            rebuilt = true;
        }

        let rotation = m.rotation.advance(m.morph.morph_state());
        let model = Mat4::from_euler_xyz(rotation.pitch, rotation.yaw, rotation.roll);
        let uniforms = FrameUniforms::new(
            &model,
            m.camera.view(),
            m.camera.projection(),
            &self.config.appearance,
        );
        m.surface.draw(cloud, &uniforms)?;

        Ok(FrameOutcome::Drawn { rebuilt })
    }

    /// Follow a viewport change without regenerating particles
    ///
    /// Zero-sized viewports are skipped and the previous projection kept.
    /// Does nothing unless active.
    pub fn resize(&mut self, width: u32, height: u32) -> std::result::Result<(), ResizeError> {
        let Some(m) = self.mounted.as_mut() else {
            return Ok(());
        };

        if let Err(e) = m.camera.resize(width, height) {
            warn!("Skipping resize: {}", e);
            return Err(e);
        }
        m.surface.resize(width, height)?;
        debug!("Resized to {}x{}, aspect {:.3}", width, height, m.camera.aspect());
        Ok(())
    }

    /// Unmount and free everything
    ///
    /// Idempotent, and safe after a failed [`activate`](Self::activate). The
    /// renderer ends up [`LifecycleState::Disposed`].
    pub fn deactivate(&mut self) {
        if let Some(mut m) = self.mounted.take() {
            drop(m.resize_listener.take());
            drop(m.frame_request.take());
            drop(m.progress.take());
            if let Some(cloud) = m.cloud.take() {
                m.surface.release_point_cloud(cloud);
            }
            self.backend.detach(m.surface);
            info!(id = %self.config.pin.id, "Particle morph disposed");
        }
        self.state = LifecycleState::Disposed;
    }

    /// Number of particles, zero unless active
    pub fn particle_count(&self) -> usize {
        self.mounted.as_ref().map_or(0, |m| m.morph.len())
    }

    /// Current eased morph state, `0.0` = sphere, `1.0` = spread
    pub fn morph_state(&self) -> f32 {
        self.mounted.as_ref().map_or(0.0, |m| m.morph.morph_state())
    }

    /// Positions currently uploaded for drawing
    pub fn live_positions(&self) -> Option<&[f32]> {
        self.mounted.as_ref().map(|m| m.morph.live().as_slice())
    }

    pub fn camera(&self) -> Option<&Camera> {
        self.mounted.as_ref().map(|m| &m.camera)
    }

    pub fn rotation(&self) -> Option<morph_animation::RotationState> {
        self.mounted.as_ref().map(|m| m.rotation.state())
    }
}

impl<B: RenderBackend> Drop for ParticleMorph<B> {
    fn drop(&mut self) {
        self.deactivate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use morph_animation::ProgressSignal;
    use morph_gpu::RendererError;
    use morph_platform::HostRegistry;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Default)]
    struct Stats {
        surfaces: usize,
        clouds: usize,
        uploads: usize,
        draws: usize,
        resizes: usize,
        last_uniforms: Option<FrameUniforms>,
        last_positions: Vec<f32>,
    }

    #[derive(Default)]
    struct RecordingBackend {
        stats: Rc<RefCell<Stats>>,
        fail_acquire: bool,
        fail_upload: bool,
    }

    struct RecordingSurface {
        stats: Rc<RefCell<Stats>>,
        size: (u32, u32),
        fail_upload: bool,
    }

    struct RecordedCloud;

    impl RenderBackend for RecordingBackend {
        type Surface = RecordingSurface;

        fn acquire(&mut self, width: u32, height: u32) -> std::result::Result<RecordingSurface, RendererError> {
            if self.fail_acquire {
                return Err(RendererError::Capability("no adapter in test".into()));
            }
            self.stats.borrow_mut().surfaces += 1;
            Ok(RecordingSurface {
                stats: self.stats.clone(),
                size: (width, height),
                fail_upload: self.fail_upload,
            })
        }

        fn detach(&mut self, _surface: RecordingSurface) {
            self.stats.borrow_mut().surfaces -= 1;
        }
    }

    impl DrawSurface for RecordingSurface {
        type PointCloud = RecordedCloud;

        fn size(&self) -> (u32, u32) {
            self.size
        }

        fn create_point_cloud(
            &mut self,
            positions: &[f32],
            _colors: &[f32],
        ) -> std::result::Result<RecordedCloud, RendererError> {
            if self.fail_upload {
                return Err(RendererError::OutOfMemory);
            }
            let mut stats = self.stats.borrow_mut();
            stats.clouds += 1;
            stats.last_positions = positions.to_vec();
            Ok(RecordedCloud)
        }

        fn write_positions(&mut self, _cloud: &RecordedCloud, positions: &[f32]) {
            let mut stats = self.stats.borrow_mut();
            stats.uploads += 1;
            stats.last_positions = positions.to_vec();
        }

        fn resize(&mut self, width: u32, height: u32) -> std::result::Result<(), ResizeError> {
            if width == 0 || height == 0 {
                return Err(ResizeError::ZeroSize { width, height });
            }
            self.size = (width, height);
            self.stats.borrow_mut().resizes += 1;
            Ok(())
        }

        fn draw(
            &mut self,
            _cloud: &RecordedCloud,
            uniforms: &FrameUniforms,
        ) -> std::result::Result<(), RendererError> {
            let mut stats = self.stats.borrow_mut();
            stats.draws += 1;
            stats.last_uniforms = Some(*uniforms);
            Ok(())
        }

        fn release_point_cloud(&mut self, _cloud: RecordedCloud) {
            self.stats.borrow_mut().clouds -= 1;
        }
    }

    fn config() -> MorphConfig {
        let mut config = MorphConfig::default();
        config.particles.count = 400;
        config.particles.seed = Some(11);
        config
    }

    fn renderer(signal: &ProgressSignal) -> (ParticleMorph<RecordingBackend>, Rc<RefCell<Stats>>) {
        let backend = RecordingBackend::default();
        let stats = backend.stats.clone();
        (ParticleMorph::new(config(), backend, signal.handle()), stats)
    }

    #[test]
    fn test_repeated_mounts_leak_nothing() {
        let host = HostRegistry::new(1280, 720);
        let signal = ProgressSignal::new();
        let stats = Rc::new(RefCell::new(Stats::default()));

        for i in 0..5 {
            let backend = RecordingBackend {
                stats: stats.clone(),
                ..Default::default()
            };
            let mut morph = ParticleMorph::new(config(), backend, signal.handle());
            morph.activate(&host).unwrap();
            assert_eq!(stats.borrow().surfaces, 1);
            assert_eq!(stats.borrow().clouds, 1);
            assert_eq!(host.frame_request_count(), 1);
            assert_eq!(host.resize_listener_count(), 1);
            assert_eq!(signal.subscriber_count(), 1);

            signal.set(i as f32 / 4.0);
            morph.frame().unwrap();
            morph.frame().unwrap();

            morph.deactivate();
            morph.deactivate();
            assert_eq!(morph.state(), LifecycleState::Disposed);
        }

        assert_eq!(stats.borrow().surfaces, 0);
        assert_eq!(stats.borrow().clouds, 0);
        assert_eq!(host.frame_request_count(), 0);
        assert_eq!(host.resize_listener_count(), 0);
        assert_eq!(signal.subscriber_count(), 0);
    }

    #[test]
    fn test_failed_acquire_leaves_nothing() {
        let host = HostRegistry::new(800, 600);
        let signal = ProgressSignal::new();
        let backend = RecordingBackend {
            fail_acquire: true,
            ..Default::default()
        };
        let stats = backend.stats.clone();
        let mut morph = ParticleMorph::new(config(), backend, signal.handle());

        let err = morph.activate(&host).unwrap_err();
        assert!(matches!(err, MorphError::Renderer(RendererError::Capability(_))));
        assert_eq!(morph.state(), LifecycleState::Disposed);
        assert_eq!(stats.borrow().surfaces, 0);
        assert_eq!(host.frame_request_count(), 0);
        assert_eq!(signal.subscriber_count(), 0);

        morph.deactivate();
        assert_eq!(morph.frame().unwrap(), FrameOutcome::Skipped);
        assert!(matches!(morph.activate(&host), Err(MorphError::Disposed)));
    }

    #[test]
    fn test_failed_upload_detaches_surface() {
        let host = HostRegistry::new(800, 600);
        let signal = ProgressSignal::new();
        let backend = RecordingBackend {
            fail_upload: true,
            ..Default::default()
        };
        let stats = backend.stats.clone();
        let mut morph = ParticleMorph::new(config(), backend, signal.handle());

        assert!(morph.activate(&host).is_err());
        assert_eq!(stats.borrow().surfaces, 0);
        assert_eq!(stats.borrow().clouds, 0);
        assert_eq!(host.resize_listener_count(), 0);
    }

    #[test]
    fn test_zero_viewport_fails_activation_cleanly() {
        let host = HostRegistry::new(0, 600);
        let signal = ProgressSignal::new();
        let (mut morph, stats) = renderer(&signal);

        assert!(matches!(morph.activate(&host), Err(MorphError::Viewport(_))));
        assert_eq!(stats.borrow().surfaces, 0);
    }

    #[test]
    fn test_lifecycle_transitions() {
        let host = HostRegistry::new(800, 600);
        let signal = ProgressSignal::new();
        let (mut morph, _stats) = renderer(&signal);

        assert_eq!(morph.state(), LifecycleState::Uninitialized);
        assert_eq!(morph.frame().unwrap(), FrameOutcome::Skipped);

        morph.activate(&host).unwrap();
        assert!(morph.is_active());
        assert_eq!(morph.particle_count(), 400);
        assert!(matches!(morph.activate(&host), Err(MorphError::AlreadyActive)));

        morph.deactivate();
        assert!(matches!(morph.activate(&host), Err(MorphError::Disposed)));
        assert_eq!(morph.particle_count(), 0);
    }

    #[test]
    fn test_frames_after_deactivate_are_noops() {
        let host = HostRegistry::new(800, 600);
        let signal = ProgressSignal::new();
        let (mut morph, stats) = renderer(&signal);

        morph.activate(&host).unwrap();
        morph.frame().unwrap();
        let draws = stats.borrow().draws;

        morph.deactivate();
        signal.set(0.7);
        host.dispatch_resize(1024, 768);
        assert_eq!(morph.frame().unwrap(), FrameOutcome::Skipped);
        assert_eq!(morph.resize(1024, 768), Ok(()));
        assert_eq!(stats.borrow().draws, draws);
        assert_eq!(stats.borrow().resizes, 0);
    }

    #[test]
    fn test_progress_burst_rebuilds_once() {
        let host = HostRegistry::new(800, 600);
        let signal = ProgressSignal::new();
        let (mut morph, stats) = renderer(&signal);
        morph.activate(&host).unwrap();

        // First frame consumes the initial value.
        assert_eq!(morph.frame().unwrap(), FrameOutcome::Drawn { rebuilt: true });
        assert_eq!(morph.frame().unwrap(), FrameOutcome::Drawn { rebuilt: false });
        assert_eq!(stats.borrow().uploads, 1);

        for i in 1..=20 {
            signal.set(i as f32 / 20.0);
        }
        assert_eq!(morph.frame().unwrap(), FrameOutcome::Drawn { rebuilt: true });
        assert_eq!(morph.frame().unwrap(), FrameOutcome::Drawn { rebuilt: false });
        assert_eq!(stats.borrow().uploads, 2);
        assert_eq!(stats.borrow().draws, 4);
        assert_eq!(morph.morph_state(), 1.0);
    }

    #[test]
    fn test_uploaded_positions_follow_progress() {
        let host = HostRegistry::new(800, 600);
        let signal = ProgressSignal::new();
        let (mut morph, stats) = renderer(&signal);
        morph.activate(&host).unwrap();

        let sphere = stats.borrow().last_positions.clone();
        assert_eq!(sphere.len(), 1200);
        // Point 0 of the sphere sits on the -z pole.
        assert!(sphere[0].abs() < 1e-5 && sphere[1].abs() < 1e-5);
        assert!((sphere[2] + 8.0).abs() < 1e-5);

        signal.set(1.0);
        morph.frame().unwrap();
        let spread = stats.borrow().last_positions.clone();
        assert_eq!(morph.live_positions().unwrap(), spread.as_slice());

        signal.set(0.0);
        morph.frame().unwrap();
        assert_eq!(stats.borrow().last_positions, sphere);
    }

    #[test]
    fn test_rotation_advances_every_frame() {
        let host = HostRegistry::new(800, 600);
        let signal = ProgressSignal::new();
        let (mut morph, stats) = renderer(&signal);
        morph.activate(&host).unwrap();

        for _ in 0..10 {
            morph.frame().unwrap();
        }
        let rotation = morph.rotation().unwrap();
        assert!((rotation.yaw - 0.02).abs() < 1e-5);
        assert_eq!(rotation.pitch, 0.0);

        let uniforms = stats.borrow().last_uniforms.unwrap();
        assert_eq!(uniforms.params[0], 0.1);
        assert_eq!(uniforms.params[1], 0.9);
    }

    #[test]
    fn test_resize_keeps_particles() {
        let host = HostRegistry::new(800, 600);
        let signal = ProgressSignal::new();
        let (mut morph, stats) = renderer(&signal);
        morph.activate(&host).unwrap();
        morph.frame().unwrap();
        let before = morph.live_positions().unwrap().to_vec();

        host.dispatch_resize(1600, 600);
        morph.frame().unwrap();
        assert!((morph.camera().unwrap().aspect() - 1600.0 / 600.0).abs() < 1e-6);
        assert_eq!(stats.borrow().resizes, 1);
        assert_eq!(morph.live_positions().unwrap(), before.as_slice());
    }

    #[test]
    fn test_zero_resize_keeps_projection() {
        let host = HostRegistry::new(800, 600);
        let signal = ProgressSignal::new();
        let (mut morph, stats) = renderer(&signal);
        morph.activate(&host).unwrap();
        let projection = *morph.camera().unwrap().projection();

        assert!(morph.resize(0, 600).is_err());
        host.dispatch_resize(800, 0);
        morph.frame().unwrap();

        assert_eq!(*morph.camera().unwrap().projection(), projection);
        assert_eq!(stats.borrow().resizes, 0);
    }

    #[test]
    fn test_drop_releases_everything() {
        let host = HostRegistry::new(800, 600);
        let signal = ProgressSignal::new();
        let (mut morph, stats) = renderer(&signal);
        morph.activate(&host).unwrap();
        drop(morph);

        assert_eq!(stats.borrow().surfaces, 0);
        assert_eq!(stats.borrow().clouds, 0);
        assert!(!host.wants_frames());
        assert_eq!(signal.subscriber_count(), 0);
    }

    #[test]
    fn test_instances_are_independent() {
        let host = HostRegistry::new(800, 600);
        let signal = ProgressSignal::new();
        let (mut a, stats_a) = renderer(&signal);
        let (mut b, stats_b) = renderer(&signal);
        a.activate(&host).unwrap();
        b.activate(&host).unwrap();
        assert_eq!(host.frame_request_count(), 2);

        a.deactivate();
        assert_eq!(stats_a.borrow().surfaces, 0);
        assert_eq!(stats_b.borrow().surfaces, 1);
        assert_eq!(host.frame_request_count(), 1);
        assert!(matches!(b.frame().unwrap(), FrameOutcome::Drawn { .. }));
    }
}
