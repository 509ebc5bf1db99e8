//! Linear counter (triangle channel gate)
//!
//! A finer-grained gate than the length counter, clocked on quarter
//! frames.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinearCounter {
    /// Control/halt bit: while set, the reload flag is never cleared
    pub control: bool,

    /// 7-bit reload value from the triangle config register
    pub reload_value: u8,

    /// Set by a high-timer write; makes the next clock reload
    pub reload_flag: bool,

    /// Current gate value; 0 silences the triangle sequencer
    pub counter: u8,
}

impl LinearCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Quarter-frame clock
    pub fn clock(&mut self) {
        if self.reload_flag {
            self.counter = self.reload_value;
        } else if self.counter > 0 {
            self.counter -= 1;
        }
        if !self.control {
            self.reload_flag = false;
        }
    }

    pub fn is_active(&self) -> bool {
        self.counter > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reload_then_count_down() {
        let mut lc = LinearCounter::new();
        lc.reload_value = 2;
        lc.reload_flag = true;

        lc.clock();
        assert_eq!(lc.counter, 2);
        assert!(!lc.reload_flag);

        lc.clock();
        lc.clock();
        assert!(!lc.is_active());
    }

    #[test]
    fn test_control_keeps_reloading() {
        let mut lc = LinearCounter::new();
        lc.control = true;
        lc.reload_value = 5;
        lc.reload_flag = true;

        lc.clock();
        lc.clock();
        // Reload flag survives while control is set, so the counter pins
        assert_eq!(lc.counter, 5);
    }
}
