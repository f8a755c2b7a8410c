// Single vs. double click detection per key

use super::keys::{KeyCode, NUM_KEYS};

/// How long after a press a second press of the same key counts as a
/// double click (in milliseconds)
pub const DOUBLE_CLICK_WINDOW_MS: u32 = 571;

/// Which binding table a key event resolves against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableChoice {
    Normal,
    Double,
}

/// Where a key is in the click gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickPhase {
    Idle,
    ArmedAfterFirstPress,
    CompletingDoubleClick,
}

#[derive(Debug, Clone, Copy, Default)]
struct ClickSlot {
    /// End of the double-click window opened by the last single press
    expires_at: Option<u32>,

    /// Second press landed inside the window and its release is pending
    double_clicked: bool,
}

impl ClickSlot {
    fn window_open(&self, now: u32) -> bool {
        // Signed difference so the comparison survives clock wraparound
        self.expires_at
            .is_some_and(|expiry| (expiry.wrapping_sub(now) as i32) > 0)
    }
}

/// Per-key timing state for double-click detection
#[derive(Debug, Clone)]
pub struct ClickDisambiguator {
    slots: Vec<ClickSlot>,
}

impl ClickDisambiguator {
    pub fn new() -> Self {
        Self {
            slots: vec![ClickSlot::default(); NUM_KEYS],
        }
    }

    /// Register a key press at `now`.
    ///
    /// When `detect_double` is false the press always counts as a single
    /// press, but it still opens a window for the next one.
    pub fn key_down(&mut self, code: KeyCode, now: u32, detect_double: bool) -> TableChoice {
        let slot = &mut self.slots[code.index()];

        if detect_double && slot.window_open(now) {
            slot.double_clicked = true;
            TableChoice::Double
        } else {
            slot.expires_at = Some(now.wrapping_add(DOUBLE_CLICK_WINDOW_MS));
            slot.double_clicked = false;
            TableChoice::Normal
        }
    }

    /// Register a key release. Releasing a double click ends the gesture.
    pub fn key_up(&mut self, code: KeyCode, detect_double: bool) -> TableChoice {
        let slot = &mut self.slots[code.index()];

        if detect_double && slot.double_clicked {
            slot.double_clicked = false;
            slot.expires_at = None;
            TableChoice::Double
        } else {
            TableChoice::Normal
        }
    }

    /// Current gesture phase of a key
    pub fn phase(&self, code: KeyCode, now: u32) -> ClickPhase {
        let slot = &self.slots[code.index()];
        if slot.double_clicked {
            ClickPhase::CompletingDoubleClick
        } else if slot.window_open(now) {
            ClickPhase::ArmedAfterFirstPress
        } else {
            ClickPhase::Idle
        }
    }

    /// Forget all pending gestures
    pub fn reset(&mut self) {
        self.slots.fill(ClickSlot::default());
    }
}

impl Default for ClickDisambiguator {
    fn default() -> Self {
        Self::new()
    }
}
