//! Windowed application runner
//!
//! Hosts a [`ParticleMorph`] in a desktop window. The window stands in for
//! the page: the mouse wheel and scroll keys move a [`PageScroller`] whose
//! pinned range drives the morph.
//!
//! # Example
//!
//! ```ignore
//! use morph_app::windowed::WindowedApp;
//! use morph_app::{MorphConfig, WindowConfig};
//!
//! fn main() -> morph_app::Result<()> {
//!     WindowedApp::run(MorphConfig::default(), WindowConfig::default())
//! }
//! ```

use std::time::Instant;

use morph_gpu::{RendererConfig, WgpuBackend};
use morph_platform::{
    ControlFlow, Event, EventLoop, HostRegistry, InputEvent, Key, KeyState, LifecycleEvent,
    Platform, Window, WindowConfig, WindowEvent,
};
use morph_platform_desktop::{DesktopPlatform, DesktopWindow};

use crate::config::MorphConfig;
use crate::error::Result;
use crate::morph::{FrameOutcome, ParticleMorph};
use crate::scroller::PageScroller;

type DesktopMorph = ParticleMorph<WgpuBackend<winit::window::Window>>;

/// Everything that exists while the window has a surface
struct Session {
    host: HostRegistry,
    scroller: PageScroller,
    morph: DesktopMorph,
    last_frame: Option<Instant>,
}

impl Session {
    fn start(config: &MorphConfig, window: &DesktopWindow) -> Result<Self> {
        let (width, height) = window.size();
        let host = HostRegistry::new(width, height);
        let scroller = PageScroller::new(config.pin.clone(), height as f32);

        let backend = WgpuBackend::new(window.winit_window_arc(), RendererConfig::default());
        let mut morph = ParticleMorph::new(config.clone(), backend, scroller.handle());
        morph.activate(&host)?;

        Ok(Self {
            host,
            scroller,
            morph,
            last_frame: None,
        })
    }

    fn frame(&mut self) -> Result<FrameOutcome> {
        let now = Instant::now();
        let dt = self
            .last_frame
            .replace(now)
            .map_or(0.0, |last| now.duration_since(last).as_secs_f32());
        self.scroller.update(dt);
        self.morph.frame()
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.host.dispatch_resize(width, height);
        self.scroller.set_viewport_height(height as f32);
    }

    fn stop(mut self) {
        self.morph.deactivate();
    }
}

/// Desktop runner for the particle morph
pub struct WindowedApp;

impl WindowedApp {
    /// Open a window and run until it is closed
    pub fn run(config: MorphConfig, window_config: WindowConfig) -> Result<()> {
        let platform = DesktopPlatform::new()?;
        tracing::info!("Starting on {} platform", platform.name());
        let event_loop = platform.create_event_loop(window_config)?;

        let mut session: Option<Session> = None;

        event_loop.run(move |event, window| {
            match event {
                Event::Lifecycle(LifecycleEvent::Resumed) => {
                    if session.is_none() {
                        match Session::start(&config, window) {
                            Ok(s) => {
                                session = Some(s);
                                tracing::info!("Particle morph window initialized");
                            }
                            // The window stays open without the effect.
                            Err(e) => tracing::error!("Failed to start renderer: {}", e),
                        }
                    }
                }

                Event::Lifecycle(LifecycleEvent::Suspended) => {
                    if let Some(s) = session.take() {
                        s.stop();
                    }
                }

                Event::Window(WindowEvent::Resized { width, height }) => {
                    if let Some(s) = session.as_mut() {
                        s.resize(width, height);
                    }
                }

                Event::Window(WindowEvent::CloseRequested) => {
                    if let Some(s) = session.take() {
                        s.stop();
                    }
                    return ControlFlow::Exit;
                }

                Event::Input(InputEvent::Keyboard(kb))
                    if kb.key == Key::Escape && kb.state == KeyState::Pressed =>
                {
                    if let Some(s) = session.take() {
                        s.stop();
                    }
                    return ControlFlow::Exit;
                }

                Event::Input(input) => {
                    if let Some(s) = session.as_mut() {
                        s.scroller.handle_input(&input);
                    }
                }

                Event::Frame => {
                    if let Some(s) = session.as_mut() {
                        if let Err(e) = s.frame() {
                            tracing::error!("Render error: {}", e);
                            if let Some(s) = session.take() {
                                s.stop();
                            }
                            return ControlFlow::Exit;
                        }
                    }
                }

                _ => {}
            }

            match session.as_ref() {
                Some(s) if s.host.wants_frames() => ControlFlow::Continue,
                _ => ControlFlow::Wait,
            }
        })?;

        Ok(())
    }
}
