//! Envelope generator
//!
//! Shared by the pulse and noise channels. Either outputs a constant
//! volume or a decay from 15, optionally looping, clocked on quarter
//! frames.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Envelope {
    /// Use the volume field directly instead of the decay level
    pub constant_volume: bool,

    /// 4-bit volume (constant mode) or divider period (decay mode)
    pub volume: u8,

    /// Restart the decay at 15 when it reaches 0 (shared with the length
    /// counter halt bit)
    pub loop_flag: bool,

    /// Set by a high-timer write; consumed by the next quarter-frame clock
    pub start_flag: bool,

    /// Divider counting down quarter frames
    pub divider: u8,

    /// Current decay level (15 -> 0)
    pub decay_level: u8,
}

impl Envelope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the shared control byte (duty/halt/constant/volume layout)
    pub fn write_control(&mut self, value: u8) {
        self.loop_flag = value & 0x20 != 0;
        self.constant_volume = value & 0x10 != 0;
        self.volume = value & 0x0F;
    }

    /// Restart the envelope (high-timer write side effect)
    pub fn restart(&mut self) {
        self.start_flag = true;
    }

    /// Quarter-frame clock
    pub fn clock(&mut self) {
        if self.start_flag {
            self.start_flag = false;
            self.decay_level = 15;
            self.divider = self.volume;
        } else if self.divider == 0 {
            self.divider = self.volume;
            if self.decay_level > 0 {
                self.decay_level -= 1;
            } else if self.loop_flag {
                self.decay_level = 15;
            }
        } else {
            self.divider -= 1;
        }
    }

    /// Current output volume (0-15)
    pub fn output(&self) -> u8 {
        if self.constant_volume {
            self.volume
        } else {
            self.decay_level
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_volume() {
        let mut envelope = Envelope::new();
        envelope.write_control(0b0001_1010); // constant, volume 10
        assert_eq!(envelope.output(), 10);
    }

    #[test]
    fn test_decay_counts_down() {
        let mut envelope = Envelope::new();
        envelope.write_control(0b0000_0000); // decay mode, period 0
        envelope.restart();

        envelope.clock(); // consumes start flag, decay = 15
        assert_eq!(envelope.output(), 15);

        for expected in (0..15).rev() {
            envelope.clock();
            assert_eq!(envelope.output(), expected);
        }

        // Without the loop flag it stays at 0
        envelope.clock();
        assert_eq!(envelope.output(), 0);
    }

    #[test]
    fn test_loop_restarts_decay() {
        let mut envelope = Envelope::new();
        envelope.write_control(0b0010_0000); // loop, period 0
        envelope.restart();
        envelope.clock();

        for _ in 0..15 {
            envelope.clock();
        }
        assert_eq!(envelope.output(), 0);
        envelope.clock();
        assert_eq!(envelope.output(), 15);
    }

    #[test]
    fn test_divider_slows_decay() {
        let mut envelope = Envelope::new();
        envelope.write_control(0b0000_0010); // period 2
        envelope.restart();
        envelope.clock(); // decay = 15, divider = 2

        // Two clocks tick the divider down, the third steps the decay
        envelope.clock();
        envelope.clock();
        assert_eq!(envelope.output(), 15);
        envelope.clock();
        assert_eq!(envelope.output(), 14);
    }
}
