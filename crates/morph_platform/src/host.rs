//! Host registrations
//!
//! The host owns the frame clock and the viewport. Renderers register a
//! recurring frame request and a resize listener through a weak
//! [`HostHandle`]; both registrations are RAII guards that deregister on drop,
//! so a renderer that goes away can never be called back.
//!
//! ```
//! use morph_platform::HostRegistry;
//!
//! let host = HostRegistry::new(800, 600);
//! let handle = host.handle();
//!
//! let frames = handle.request_frames().unwrap();
//! assert!(host.wants_frames());
//!
//! drop(frames);
//! assert!(!host.wants_frames());
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Identifies a recurring frame request
    pub struct FrameRequestId;
    /// Identifies a resize listener
    pub struct ResizeListenerId;
}

#[derive(Debug, Default)]
struct ListenerSlot {
    pending: Option<(u32, u32)>,
}

#[derive(Debug, Default)]
struct HostInner {
    frame_requests: SlotMap<FrameRequestId, ()>,
    resize_listeners: SlotMap<ResizeListenerId, ListenerSlot>,
    viewport: (u32, u32),
}

fn lock(inner: &Mutex<HostInner>) -> MutexGuard<'_, HostInner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Anything a renderer can be mounted into
pub trait SurfaceContainer {
    /// Viewport size in physical pixels
    fn viewport(&self) -> (u32, u32);

    /// Handle for registering frame requests and resize listeners
    fn host(&self) -> HostHandle;
}

/// Registry of frame requests and resize listeners, owned by the host loop
#[derive(Debug)]
pub struct HostRegistry {
    inner: Arc<Mutex<HostInner>>,
}

impl HostRegistry {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HostInner {
                viewport: (width, height),
                ..Default::default()
            })),
        }
    }

    /// Get a weak handle for registrations
    pub fn handle(&self) -> HostHandle {
        HostHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Whether anyone wants frame ticks
    pub fn wants_frames(&self) -> bool {
        !lock(&self.inner).frame_requests.is_empty()
    }

    pub fn frame_request_count(&self) -> usize {
        lock(&self.inner).frame_requests.len()
    }

    pub fn resize_listener_count(&self) -> usize {
        lock(&self.inner).resize_listeners.len()
    }

    /// Record a new viewport size and notify every listener
    ///
    /// Returns the number of listeners notified.
    pub fn dispatch_resize(&self, width: u32, height: u32) -> usize {
        let mut inner = lock(&self.inner);
        inner.viewport = (width, height);
        for (_, slot) in inner.resize_listeners.iter_mut() {
            slot.pending = Some((width, height));
        }
        let notified = inner.resize_listeners.len();
        tracing::trace!("Resize {}x{} dispatched to {} listeners", width, height, notified);
        notified
    }
}

impl SurfaceContainer for HostRegistry {
    fn viewport(&self) -> (u32, u32) {
        lock(&self.inner).viewport
    }

    fn host(&self) -> HostHandle {
        self.handle()
    }
}

/// A weak handle to the host registry
///
/// It won't prevent the registry from being dropped.
#[derive(Clone, Debug)]
pub struct HostHandle {
    inner: Weak<Mutex<HostInner>>,
}

impl HostHandle {
    /// Ask for a frame tick every display refresh until the request is dropped
    pub fn request_frames(&self) -> Option<FrameRequest> {
        self.inner.upgrade().map(|inner| {
            let id = lock(&inner).frame_requests.insert(());
            FrameRequest {
                handle: self.clone(),
                id,
            }
        })
    }

    /// Listen for viewport changes until the listener is dropped
    pub fn listen_resize(&self) -> Option<ResizeListener> {
        self.inner.upgrade().map(|inner| {
            let id = lock(&inner)
                .resize_listeners
                .insert(ListenerSlot::default());
            ResizeListener {
                handle: self.clone(),
                id,
            }
        })
    }

    /// Current viewport, if the host is still alive
    pub fn viewport(&self) -> Option<(u32, u32)> {
        self.inner.upgrade().map(|inner| lock(&inner).viewport)
    }

    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    fn remove_frame_request(&self, id: FrameRequestId) {
        if let Some(inner) = self.inner.upgrade() {
            lock(&inner).frame_requests.remove(id);
        }
    }

    fn remove_resize_listener(&self, id: ResizeListenerId) {
        if let Some(inner) = self.inner.upgrade() {
            lock(&inner).resize_listeners.remove(id);
        }
    }

    fn take_pending_resize(&self, id: ResizeListenerId) -> Option<(u32, u32)> {
        let inner = self.inner.upgrade()?;
        let mut guard = lock(&inner);
        guard.resize_listeners.get_mut(id)?.pending.take()
    }
}

/// A recurring frame request
///
/// Dropping it cancels the request.
#[derive(Debug)]
pub struct FrameRequest {
    handle: HostHandle,
    id: FrameRequestId,
}

impl FrameRequest {
    pub fn id(&self) -> FrameRequestId {
        self.id
    }

    /// Cancel now
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for FrameRequest {
    fn drop(&mut self) {
        self.handle.remove_frame_request(self.id);
    }
}

/// A resize listener
///
/// Sizes dispatched while it is registered are kept until taken; only the
/// latest one is kept. Dropping it deregisters.
#[derive(Debug)]
pub struct ResizeListener {
    handle: HostHandle,
    id: ResizeListenerId,
}

impl ResizeListener {
    pub fn id(&self) -> ResizeListenerId {
        self.id
    }

    /// The most recent size dispatched since the last call
    pub fn take_pending(&self) -> Option<(u32, u32)> {
        self.handle.take_pending_resize(self.id)
    }

    /// Deregister now
    pub fn remove(self) {
        drop(self);
    }
}

impl Drop for ResizeListener {
    fn drop(&mut self) {
        self.handle.remove_resize_listener(self.id);
    }
}
