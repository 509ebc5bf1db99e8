//! Triangle wave channel

use serde::{Deserialize, Serialize};

use crate::apu::components::{LengthCounter, LinearCounter, Timer};
use crate::apu::constants::{
    HALF_FRAME_TICKS, QUARTER_FRAME_TICKS, TICKS_IN_FRAME, TRIANGLE_SEQUENCE,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriangleChannel {
    /// Enabled flag (from $4015)
    pub enabled: bool,

    pub length_counter: LengthCounter,
    pub linear_counter: LinearCounter,

    /// Timer clocked at CPU rate (twice per sample)
    pub timer: Timer,

    /// Position in the 32-step triangle sequence
    pub sequencer: u8,

    /// Last sequence value; held while the gates are closed
    pub current_value: u8,

    /// Sample tick within the quarter/half-frame cadence
    pub current_tick: u32,
}

impl TriangleChannel {
    pub fn new() -> Self {
        TriangleChannel {
            enabled: false,
            length_counter: LengthCounter::new(),
            linear_counter: LinearCounter::new(),
            timer: Timer::new(),
            sequencer: 0,
            current_value: 0,
            current_tick: 0,
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.length_counter.counter = 0;
        }
    }

    /// Write one of the channel's registers (offset 0-3; offset 1 is the
    /// unused slot and is ignored)
    pub fn write_register(&mut self, register: u8, value: u8) {
        match register {
            0 => {
                // One bit feeds both gates
                self.length_counter.halt = value & 0x80 != 0;
                self.linear_counter.control = value & 0x80 != 0;
                self.linear_counter.reload_value = value & 0x7F;
            }
            1 => {}
            2 => {
                self.timer.period = (self.timer.period & 0x700) | value as u16;
            }
            3 => {
                self.timer.period = (self.timer.period & 0xFF) | (((value & 0x07) as u16) << 8);
                if self.enabled {
                    self.length_counter.load(value >> 3);
                }
                self.linear_counter.reload_flag = true;
            }
            _ => unreachable!("triangle register offset is 0-3"),
        }
    }

    /// Synthesize one frame of raw channel output (0-15 per sample)
    ///
    /// Runs even when disabled: the gates then hold the sequencer, and the
    /// output sits at the last sequence value (a DC level the filter chain
    /// removes).
    pub fn generate(&mut self, out: &mut [u8]) {
        debug_assert_eq!(out.len(), TICKS_IN_FRAME);

        for sample in out.iter_mut() {
            self.current_tick = (self.current_tick + 1) % HALF_FRAME_TICKS;
            if self.current_tick % QUARTER_FRAME_TICKS == 0 {
                self.linear_counter.clock();
            }
            if self.current_tick == 0 {
                self.length_counter.clock();
            }

            if self.length_counter.is_active() && self.linear_counter.is_active() {
                // The triangle timer runs at CPU rate: two clocks per sample
                for _ in 0..2 {
                    if self.timer.clock() {
                        self.sequencer = (self.sequencer + 1) & 0x1F;
                        self.current_value = TRIANGLE_SEQUENCE[self.sequencer as usize];
                    }
                }
            }

            *sample = self.current_value;
        }
    }
}

impl Default for TriangleChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_0_feeds_both_gates() {
        let mut triangle = TriangleChannel::new();
        triangle.write_register(0, 0b1101_0101);
        assert!(triangle.length_counter.halt);
        assert!(triangle.linear_counter.control);
        assert_eq!(triangle.linear_counter.reload_value, 0x55);
    }

    #[test]
    fn test_high_timer_write_arms_reload() {
        let mut triangle = TriangleChannel::new();
        triangle.set_enabled(true);
        triangle.write_register(2, 0x42);
        triangle.write_register(3, 0b0000_1011); // high 3, length index 1

        assert_eq!(triangle.timer.period, 0x342);
        assert!(triangle.linear_counter.reload_flag);
        assert_eq!(triangle.length_counter.counter, 254);
    }

    #[test]
    fn test_gated_channel_holds_value() {
        let mut triangle = TriangleChannel::new();
        // Both gates closed: output pinned at the initial value
        let mut out = vec![0u8; TICKS_IN_FRAME];
        triangle.generate(&mut out);
        assert!(out.iter().all(|&s| s == 0));
        assert_eq!(triangle.sequencer, 0);
    }

    #[test]
    fn test_running_channel_steps_sequence() {
        let mut triangle = TriangleChannel::new();
        triangle.set_enabled(true);
        triangle.write_register(0, 0b1111_1111); // control + big linear reload
        triangle.write_register(2, 0x80);
        triangle.write_register(3, 0b0000_1001); // period 0x180, length 254
        // Open the linear gate immediately
        triangle.linear_counter.counter = 127;

        let mut out = vec![0u8; TICKS_IN_FRAME];
        triangle.generate(&mut out);

        // The full 0-15 range shows up as the wave climbs and falls
        assert!(out.iter().any(|&s| s == 15));
        assert!(out.iter().any(|&s| s == 0));
        assert!(out.iter().any(|&s| s == 7));
    }
}
