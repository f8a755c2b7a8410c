// Monotonic millisecond clock used for input timing

#[cfg(test)]
use std::cell::Cell;
#[cfg(test)]
use std::rc::Rc;
use std::time::Instant;

/// Source of coarse monotonic timestamps.
///
/// Timestamps are milliseconds since an arbitrary epoch and wrap around at
/// `u32::MAX`, so consumers must compare them with wrapping arithmetic.
pub trait Clock {
    fn now_ms(&self) -> u32;
}

/// Clock backed by `Instant`, starting at zero when created
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u32 {
        // Truncation is the wraparound
        self.start.elapsed().as_millis() as u32
    }
}

/// Hand-driven clock. Clones share the same time value, so a test can keep
/// one handle and move time forward under a dispatcher that owns another.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<u32>>,
}

#[cfg(test)]
impl ManualClock {
    pub fn new(start_ms: u32) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    /// Jump to an absolute time
    pub fn set(&self, ms: u32) {
        self.now.set(ms);
    }

    /// Move time forward, wrapping at `u32::MAX`
    pub fn advance(&self, ms: u32) {
        self.now.set(self.now.get().wrapping_add(ms));
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now_ms(&self) -> u32 {
        self.now.get()
    }
}
