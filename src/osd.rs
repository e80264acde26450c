//! On-screen display visibility timer.
//!
//! Time is supplied by the host so the engine stays synchronous.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct OsdTimer {
    timeout: Duration,
    deadline: Option<Instant>,
    visible: bool,
}

impl OsdTimer {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            deadline: None,
            visible: false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// A touch arrived. Returns true when the OSD just became visible.
    pub fn touched(&mut self, now: Instant, edit_mode: bool) -> bool {
        let shown = !self.visible;
        self.visible = true;
        self.deadline = if edit_mode { None } else { Some(now + self.timeout) };
        shown
    }

    /// Returns true when the OSD should be hidden now.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if self.visible && now >= deadline => {
                self.visible = false;
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Drop the pending hide; the OSD stays up.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}
