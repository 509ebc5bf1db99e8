//! Channel timer: a down-counter that reloads from its period

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Timer {
    /// Reload value (11 bits for pulse/triangle)
    pub period: u16,

    /// Current countdown
    pub counter: u16,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    /// One clock; returns true on expiry (sequencer advance)
    #[inline]
    pub fn clock(&mut self) -> bool {
        if self.counter == 0 {
            self.counter = self.period;
            true
        } else {
            self.counter -= 1;
            false
        }
    }
}
