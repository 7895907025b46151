//! Scroll progress signal
//!
//! One writer publishes progress in `[0, 1]`; any number of readers pull it
//! when they are about to draw. Each change bumps a version counter so a
//! reader can tell whether it has already consumed the latest value, which
//! keeps rebuilds to at most one per frame no matter how often scroll fires.
//!
//! ```
//! use morph_animation::ProgressSignal;
//!
//! let signal = ProgressSignal::new();
//! let mut sub = signal.handle().subscribe().unwrap();
//!
//! assert_eq!(sub.take_changed(), Some(0.0));
//! assert_eq!(sub.take_changed(), None);
//!
//! signal.set(0.4);
//! signal.set(0.6);
//! assert_eq!(sub.take_changed(), Some(0.6));
//! ```

use std::sync::atomic::{AtomicU32, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Weak};

use crate::easing::clamp_unit;

#[derive(Debug, Default)]
struct ProgressInner {
    bits: AtomicU32,
    version: AtomicU64,
    subscribers: AtomicUsize,
}

impl ProgressInner {
    fn load(&self) -> f32 {
        f32::from_bits(self.bits.load(Ordering::Acquire))
    }
}

/// Writer side of the progress signal
///
/// Not `Clone`: there is exactly one source of progress.
#[derive(Debug, Default)]
pub struct ProgressSignal {
    inner: Arc<ProgressInner>,
}

impl ProgressSignal {
    /// Create a signal starting at `0.0`
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a new value, clamped to `[0, 1]`
    ///
    /// Returns `true` if the stored value changed.
    pub fn set(&self, value: f32) -> bool {
        let value = clamp_unit(value);
        let previous = self.inner.bits.swap(value.to_bits(), Ordering::AcqRel);
        if previous == value.to_bits() {
            return false;
        }
        self.inner.version.fetch_add(1, Ordering::AcqRel);
        true
    }

    pub fn get(&self) -> f32 {
        self.inner.load()
    }

    /// Number of changes published so far
    pub fn version(&self) -> u64 {
        self.inner.version.load(Ordering::Acquire)
    }

    /// Get a weak handle for readers
    pub fn handle(&self) -> ProgressHandle {
        ProgressHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.load(Ordering::Acquire)
    }
}

/// Weak reader handle
///
/// Does not keep the signal alive.
#[derive(Clone, Debug)]
pub struct ProgressHandle {
    inner: Weak<ProgressInner>,
}

impl ProgressHandle {
    /// Start reading; `None` once the signal has been dropped
    pub fn subscribe(&self) -> Option<ProgressSubscription> {
        let inner = self.inner.upgrade()?;
        inner.subscribers.fetch_add(1, Ordering::AcqRel);
        Some(ProgressSubscription { inner, seen: None })
    }

    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}

/// An active reader
///
/// Dropping it unsubscribes.
#[derive(Debug)]
pub struct ProgressSubscription {
    inner: Arc<ProgressInner>,
    seen: Option<u64>,
}

impl ProgressSubscription {
    /// Current value, without marking it consumed
    pub fn get(&self) -> f32 {
        self.inner.load()
    }

    /// The value if it changed since the last call
    ///
    /// The first call always yields the current value.
    pub fn take_changed(&mut self) -> Option<f32> {
        let version = self.inner.version.load(Ordering::Acquire);
        if self.seen == Some(version) {
            return None;
        }
        self.seen = Some(version);
        Some(self.inner.load())
    }
}

impl Drop for ProgressSubscription {
    fn drop(&mut self) {
        self.inner.subscribers.fetch_sub(1, Ordering::AcqRel);
    }
}
