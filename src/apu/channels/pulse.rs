//! Pulse wave channel (two instances)

use serde::{Deserialize, Serialize};

use crate::apu::components::{Envelope, LengthCounter, Sweep, Timer};
use crate::apu::constants::{DUTY_SEQUENCES, HALF_FRAME_TICKS, QUARTER_FRAME_TICKS, TICKS_IN_FRAME};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PulseChannel {
    /// Enabled flag (from $4015)
    pub enabled: bool,

    /// Duty cycle selector (0-3)
    pub duty: u8,

    /// Position in the 8-step duty sequence
    pub duty_position: u8,

    /// Configured 11-bit timer value; becomes the playing period on a
    /// high-timer write
    pub load_period: u16,

    pub envelope: Envelope,
    pub sweep: Sweep,
    pub length_counter: LengthCounter,

    /// Playing timer; its period is what the sweep retargets
    pub timer: Timer,

    /// Sample tick within the quarter/half-frame cadence
    pub current_tick: u32,
}

impl PulseChannel {
    /// `channel_number` is 1 or 2; it selects the sweep negate flavor
    pub fn new(channel_number: u8) -> Self {
        PulseChannel {
            enabled: false,
            duty: 0,
            duty_position: 0,
            load_period: 0,
            envelope: Envelope::new(),
            sweep: Sweep::new(channel_number),
            length_counter: LengthCounter::new(),
            timer: Timer::new(),
            current_tick: 0,
        }
    }

    /// Enable/disable from the status register; disabling zeroes the
    /// length counter
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.length_counter.counter = 0;
        }
    }

    /// Write one of the channel's four registers (offset 0-3)
    pub fn write_register(&mut self, register: u8, value: u8) {
        match register {
            0 => {
                self.duty = value >> 6;
                self.length_counter.halt = value & 0x20 != 0;
                self.envelope.write_control(value);
            }
            1 => self.sweep.write_control(value),
            2 => {
                self.load_period = (self.load_period & 0x700) | value as u16;
            }
            3 => {
                self.load_period = (self.load_period & 0xFF) | (((value & 0x07) as u16) << 8);
                if self.enabled {
                    self.length_counter.load(value >> 3);
                }
                // Side effects: the configured period becomes the playing
                // period, the wave restarts, the envelope restarts
                self.timer.period = self.load_period;
                self.timer.counter = self.load_period;
                self.duty_position = 0;
                self.envelope.restart();
            }
            _ => unreachable!("pulse register offset is 0-3"),
        }
    }

    /// Synthesize one frame of raw channel output (0-15 per sample)
    ///
    /// A disabled pulse contributes silence and holds its state, matching
    /// the hardware's gating of the sequencer clock.
    pub fn generate(&mut self, out: &mut [u8]) {
        debug_assert_eq!(out.len(), TICKS_IN_FRAME);
        if !self.enabled {
            return;
        }

        for sample in out.iter_mut() {
            self.current_tick = (self.current_tick + 1) % HALF_FRAME_TICKS;
            if self.current_tick % QUARTER_FRAME_TICKS == 0 {
                self.envelope.clock();
            }
            if self.current_tick == 0 {
                self.length_counter.clock();
                if let Some(period) = self.sweep.clock(self.timer.period) {
                    self.timer.period = period;
                }
            }

            if self.timer.clock() {
                self.duty_position = (self.duty_position + 1) & 0x7;
            }

            if !self.length_counter.is_active() || self.sweep.is_muting(self.timer.period) {
                continue;
            }
            if DUTY_SEQUENCES[self.duty as usize][self.duty_position as usize] != 0 {
                *sample = self.envelope.output();
            }
        }
    }
}
