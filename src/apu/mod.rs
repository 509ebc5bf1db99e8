// APU module - batched audio processing unit
//
// Register writes during the CPU burst reconfigure the channels; after the
// burst, one `generate` call synthesizes the whole frame: each channel
// renders 14890 raw samples, the nonlinear mixer folds them together, and
// the three-stage filter chain shapes the result into the host's i16
// buffer. There is no cycle-driven frame sequencer - envelopes, sweeps,
// and counters clock on a fixed quarter-frame cadence inside generation.

pub mod channels;
pub mod components;
pub mod constants;
pub mod filter;
pub mod mixer;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};

use crate::error::EmulationError;
use channels::{NoiseChannel, PulseChannel, TriangleChannel};
use constants::{SAMPLE_RATE, TICKS_IN_FRAME};
use filter::FirstOrderFilter;

/// The audio processing unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Apu {
    /// Frame counter mode bit ($4017 bit 7): 0 = 4-step, 1 = 5-step.
    /// Recorded only; the batched cadence does not change with it.
    pub frame_counter_mode: u8,

    /// Frame counter interrupt inhibit ($4017 bit 6). Recorded; no IRQ is
    /// modeled.
    pub irq_inhibit: bool,

    pub pulse1: PulseChannel,
    pub pulse2: PulseChannel,
    pub triangle: TriangleChannel,
    pub noise: NoiseChannel,

    /// DMC enable bit from $4015; actually playing a sample is a loud
    /// failure rather than silent zeros
    pub dmc_enabled: bool,

    /// 90 Hz high-pass
    pub filter1: FirstOrderFilter,

    /// 442 Hz high-pass
    pub filter2: FirstOrderFilter,

    /// 14 kHz low-pass
    pub filter3: FirstOrderFilter,
}

impl Apu {
    pub fn new() -> Self {
        Apu {
            frame_counter_mode: 0,
            irq_inhibit: false,
            pulse1: PulseChannel::new(1),
            pulse2: PulseChannel::new(2),
            triangle: TriangleChannel::new(),
            noise: NoiseChannel::new(),
            dmc_enabled: false,
            filter1: FirstOrderFilter::high_pass(SAMPLE_RATE, 90.0),
            filter2: FirstOrderFilter::high_pass(SAMPLE_RATE, 442.0),
            filter3: FirstOrderFilter::low_pass(SAMPLE_RATE, 14_000.0),
        }
    }

    /// Write an APU register (offset within $4000-$401F)
    pub fn write_register(&mut self, register: u8, value: u8) -> Result<(), EmulationError> {
        match register {
            0x00..=0x03 => {
                self.pulse1.write_register(register, value);
                Ok(())
            }
            0x04..=0x07 => {
                self.pulse2.write_register(register & 0x03, value);
                Ok(())
            }
            0x08 | 0x0A | 0x0B => {
                self.triangle.write_register(register & 0x03, value);
                Ok(())
            }
            // The triangle's unused slot is writable and ignored
            0x09 => Ok(()),
            0x0C | 0x0E | 0x0F => {
                self.noise.write_register(register & 0x03, value);
                Ok(())
            }
            0x0D => Err(EmulationError::Unimplemented {
                what: "noise unused register write",
            }),
            // DMC: only the direct-load register is accepted (and ignored);
            // configuring actual sample playback fails loudly
            0x11 => Ok(()),
            0x10 | 0x12 | 0x13 => Err(EmulationError::Unimplemented {
                what: "DMC register write",
            }),
            0x15 => {
                self.dmc_enabled = value & 0x10 != 0;
                self.noise.set_enabled(value & 0x08 != 0);
                self.triangle.set_enabled(value & 0x04 != 0);
                self.pulse2.set_enabled(value & 0x02 != 0);
                self.pulse1.set_enabled(value & 0x01 != 0);
                Ok(())
            }
            0x17 => {
                self.frame_counter_mode = value >> 7;
                self.irq_inhibit = value & 0x40 != 0;
                // Inherited quirk: this compares the post-shift mode bit
                // against 0x40, so the branch can never be taken. Kept
                // as-is; there is no IRQ path to clear.
                if self.frame_counter_mode & 0x40 != 0 {
                    return Err(EmulationError::Unimplemented {
                        what: "APU frame counter interrupt clear",
                    });
                }
                Ok(())
            }
            _ => unreachable!("bus routes only APU register offsets here"),
        }
    }

    /// Synthesize one frame of audio into a 14890-sample i16 buffer
    pub fn generate(&mut self, audio: &mut [i16]) -> Result<(), EmulationError> {
        debug_assert_eq!(audio.len(), TICKS_IN_FRAME);

        let mut pulse1 = vec![0u8; TICKS_IN_FRAME];
        let mut pulse2 = vec![0u8; TICKS_IN_FRAME];
        let mut triangle = vec![0u8; TICKS_IN_FRAME];
        let mut noise = vec![0u8; TICKS_IN_FRAME];

        self.pulse1.generate(&mut pulse1);
        self.pulse2.generate(&mut pulse2);
        self.triangle.generate(&mut triangle);
        self.noise.generate(&mut noise);
        let dmc = self.generate_dmc()?;

        for i in 0..TICKS_IN_FRAME {
            let mixed = mixer::mix(pulse1[i], pulse2[i], triangle[i], noise[i], dmc[i]);
            let filtered = self
                .filter3
                .process(self.filter2.process(self.filter1.process(mixed)));
            audio[i] = (filtered * i16::MAX as f32)
                .clamp(i16::MIN as f32, i16::MAX as f32) as i16;
        }
        Ok(())
    }

    /// DMC playback is deliberately stubbed: ROMs that enable it fail
    /// loudly instead of silently losing a channel
    fn generate_dmc(&self) -> Result<Vec<u8>, EmulationError> {
        if self.dmc_enabled {
            return Err(EmulationError::Unimplemented {
                what: "DMC sample playback",
            });
        }
        Ok(vec![0u8; TICKS_IN_FRAME])
    }
}

impl Default for Apu {
    fn default() -> Self {
        Self::new()
    }
}
