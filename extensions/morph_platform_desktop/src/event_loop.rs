//! Desktop event loop implementation using winit

use morph_platform::{
    ControlFlow, Event, EventLoop, LifecycleEvent, PlatformError, Window, WindowConfig, WindowEvent,
};
use winit::application::ApplicationHandler;
use winit::error::EventLoopError;
use winit::event::WindowEvent as WinitWindowEvent;
use winit::event_loop::{
    ActiveEventLoop, ControlFlow as WinitControlFlow, EventLoop as WinitEventLoop,
};
use winit::window::WindowId;

use crate::input;
use crate::window::DesktopWindow;

/// Desktop event loop wrapping winit's event loop
pub struct DesktopEventLoop {
    event_loop: WinitEventLoop<()>,
    window_config: WindowConfig,
}

impl DesktopEventLoop {
    /// Create a new desktop event loop
    pub fn new(config: WindowConfig) -> Result<Self, PlatformError> {
        let event_loop =
            WinitEventLoop::new().map_err(|e| PlatformError::EventLoop(e.to_string()))?;
        event_loop.set_control_flow(WinitControlFlow::Wait);

        Ok(Self {
            event_loop,
            window_config: config,
        })
    }
}

impl EventLoop for DesktopEventLoop {
    type Window = DesktopWindow;

    fn run<F>(self, handler: F) -> Result<(), PlatformError>
    where
        F: FnMut(Event, &Self::Window) -> ControlFlow + 'static,
    {
        let mut app = DesktopApp::new(self.window_config, handler);
        let result = self.event_loop.run_app(&mut app);
        exit_status(result, app.failure)
    }
}

/// A failure recorded inside the loop outranks how the loop itself ended
fn exit_status(
    result: Result<(), EventLoopError>,
    failure: Option<PlatformError>,
) -> Result<(), PlatformError> {
    match (failure, result) {
        (Some(failure), _) => Err(failure),
        (None, Err(e)) => Err(PlatformError::EventLoop(e.to_string())),
        (None, Ok(())) => Ok(()),
    }
}

/// Internal winit application handler
struct DesktopApp<F>
where
    F: FnMut(Event, &DesktopWindow) -> ControlFlow,
{
    window_config: WindowConfig,
    window: Option<DesktopWindow>,
    handler: F,
    /// Last answer from the handler; frames keep coming while it is `Continue`
    flow: ControlFlow,
    /// Why the loop was stopped from inside
    failure: Option<PlatformError>,
}

impl<F> DesktopApp<F>
where
    F: FnMut(Event, &DesktopWindow) -> ControlFlow,
{
    fn new(window_config: WindowConfig, handler: F) -> Self {
        Self {
            window_config,
            window: None,
            handler,
            flow: ControlFlow::Continue,
            failure: None,
        }
    }

    fn handle_event(&mut self, event: Event) {
        if let Some(ref window) = self.window {
            let flow = (self.handler)(event, window);
            if self.flow != ControlFlow::Exit {
                self.flow = flow;
            }
        }
    }
}

impl<F> ApplicationHandler for DesktopApp<F>
where
    F: FnMut(Event, &DesktopWindow) -> ControlFlow,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        // Create window if we don't have one
        if self.window.is_none() {
            match DesktopWindow::new(event_loop, &self.window_config) {
                Ok(window) => {
                    self.window = Some(window);
                    self.handle_event(Event::Lifecycle(LifecycleEvent::Resumed));
                }
                Err(e) => {
                    self.failure = Some(PlatformError::WindowCreation(e.to_string()));
                    event_loop.exit();
                }
            }
        }
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        self.handle_event(Event::Lifecycle(LifecycleEvent::Suspended));
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WinitWindowEvent,
    ) {
        match event {
            WinitWindowEvent::CloseRequested => {
                self.handle_event(Event::Window(WindowEvent::CloseRequested));
            }

            WinitWindowEvent::Resized(size) => {
                self.handle_event(Event::Window(WindowEvent::Resized {
                    width: size.width,
                    height: size.height,
                }));
            }

            WinitWindowEvent::RedrawRequested => {
                self.handle_event(Event::Frame);
            }

            WinitWindowEvent::KeyboardInput { event, .. } => {
                let input_event = input::convert_keyboard_event(&event.logical_key, event.state);
                self.handle_event(Event::Input(input_event));
            }

            WinitWindowEvent::MouseWheel { delta, .. } => {
                self.handle_event(Event::Input(input::convert_scroll(delta)));
            }

            _ => {}
        }

        // Check for exit
        if self.flow == ControlFlow::Exit {
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if self.flow == ControlFlow::Continue {
            if let Some(ref window) = self.window {
                window.request_redraw();
            }
        }
    }
}
