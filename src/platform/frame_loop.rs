//! Cancellable frame loop
//!
//! At most one frame is ever pending. Cancelling revokes it with the host,
//! and dropping the loop cancels, so no frame runs after teardown.

/// Host animation clock (requestAnimationFrame on the web)
pub trait FrameScheduler {
    /// Ask for the next frame callback; returns a handle to cancel it
    fn request(&mut self) -> Option<i32>;

    /// Revoke a pending callback
    fn cancel(&mut self, handle: i32);
}

/// Tracks the pending frame for a scheduler
pub struct FrameLoop<S: FrameScheduler> {
    scheduler: S,
    pending: Option<i32>,
}

impl<S: FrameScheduler> FrameLoop<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            pending: None,
        }
    }

    /// Schedule the next frame unless one is already pending
    pub fn schedule(&mut self) -> bool {
        if self.pending.is_none() {
            self.pending = self.scheduler.request();
            if self.pending.is_none() {
                log::warn!("Frame request refused; loop stopped");
            }
        }
        self.pending.is_some()
    }

    /// Mark the pending frame as delivered. Call first thing in the frame
    /// callback; returns false if the frame was cancelled in the meantime.
    pub fn begin_frame(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Revoke the pending frame, if any
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
    }
}

impl<S: FrameScheduler> Drop for FrameLoop<S> {
    fn drop(&mut self) {
        self.cancel();
    }
}
