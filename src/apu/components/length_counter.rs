//! Length counter
//!
//! Gates a channel off after a register-programmed duration; clocked on
//! half frames.

use serde::{Deserialize, Serialize};

use crate::apu::constants::APU_LENGTH_TABLE;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LengthCounter {
    /// Halt bit: freezes the counter (doubles as the envelope loop flag)
    pub halt: bool,

    /// Remaining half-frames of output; 0 silences the channel
    pub counter: u8,
}

impl LengthCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from the 5-bit index written to the high-timer register
    ///
    /// Callers gate this on the channel's $4015 enable bit; a disabled
    /// channel ignores loads.
    pub fn load(&mut self, index: u8) {
        self.counter = APU_LENGTH_TABLE[(index & 0x1F) as usize];
    }

    /// Half-frame clock
    pub fn clock(&mut self) {
        if !self.halt && self.counter > 0 {
            self.counter -= 1;
        }
    }

    /// Channel still audible
    pub fn is_active(&self) -> bool {
        self.counter > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_uses_table() {
        let mut lc = LengthCounter::new();
        lc.load(0);
        assert_eq!(lc.counter, 10);
        lc.load(1);
        assert_eq!(lc.counter, 254);
    }

    #[test]
    fn test_clock_counts_down_to_zero() {
        let mut lc = LengthCounter::new();
        lc.load(3); // 2
        lc.clock();
        assert!(lc.is_active());
        lc.clock();
        assert!(!lc.is_active());
        lc.clock();
        assert_eq!(lc.counter, 0);
    }

    #[test]
    fn test_halt_freezes_counter() {
        let mut lc = LengthCounter::new();
        lc.load(0);
        lc.halt = true;
        lc.clock();
        assert_eq!(lc.counter, 10);
    }
}
