//! Per-frame redraw coalescing.
//!
//! Any number of redraw requests between two frames collapse into a single
//! frame callback. The flag is cleared at the start of a frame, before the
//! scene is rendered, so a request made while rendering (the next animation
//! step) arms the following frame instead of being swallowed.

#[cfg(test)]
#[path = "redraw_test.rs"]
mod redraw_test;

/// Pending-redraw flag for one overlay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RedrawScheduler {
    pending: bool,
}

impl RedrawScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the scene dirty.
    ///
    /// Returns `true` only on the idle→pending transition; the caller must
    /// arm exactly one frame callback when it does.
    #[must_use = "a true result means a frame callback must be scheduled"]
    pub fn request(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    /// Clear the flag at the start of a frame callback.
    pub fn begin_frame(&mut self) {
        self.pending = false;
    }

    /// Drop a pending request whose frame callback could not be armed.
    pub fn abandon(&mut self) {
        self.pending = false;
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
    }
}
