//! Exclusive hold on the radio for the duration of one operation.
//!
//! The lease is released through a single finalization point guarded by a one-shot flag:
//! - [`RadioLease::release`] runs the release hook the first time and is a no-op afterwards;
//! - dropping an unreleased lease releases it, which covers unwinding out of a start call.
use std::{
    fmt,
    sync::{
        Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

use tracing::trace;

type ReleaseHook = Box<dyn FnOnce() + Send>;

pub struct RadioLease {
    released: AtomicBool,
    on_release: Mutex<Option<ReleaseHook>>,
}

impl RadioLease {
    /// Create a lease that runs `on_release` exactly once.
    pub fn new<F>(on_release: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            released: AtomicBool::new(false),
            on_release: Mutex::new(Some(Box::new(on_release))),
        }
    }

    /// A lease with no release hook, for operations run outside a [`crate::RadioQueue`].
    pub fn detached() -> Self {
        Self {
            released: AtomicBool::new(false),
            on_release: Mutex::new(None),
        }
    }

    /// Release the radio.
    ///
    /// Returns `true` only for the call that actually released it.
    pub fn release(&self) -> bool {
        if self.released.swap(true, Ordering::AcqRel) {
            return false;
        }
        let hook = self
            .on_release
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        if let Some(hook) = hook {
            hook();
        }
        trace!(target: "radio.core.lease", "radio released");
        true
    }

    #[inline]
    pub fn is_released(&self) -> bool {
        self.released.load(Ordering::Acquire)
    }
}

impl Drop for RadioLease {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for RadioLease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RadioLease")
            .field("released", &self.is_released())
            .finish()
    }
}
