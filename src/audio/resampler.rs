// Resampling and buffering between the APU and the host stream

use std::collections::VecDeque;

use crate::apu::constants::SAMPLE_RATE;

/// Linear-interpolation resampler from the APU rate to a host rate
pub struct Resampler {
    /// Source samples per output sample
    step: f64,

    /// Fractional read position carried between frames
    position: f64,

    /// Last sample of the previous frame, for interpolation continuity
    previous: f32,
}

impl Resampler {
    pub fn new(target_rate: u32) -> Self {
        Resampler {
            step: SAMPLE_RATE as f64 / target_rate as f64,
            position: 0.0,
            previous: 0.0,
        }
    }

    /// Resample one frame of i16 samples into f32 output samples
    pub fn resample(&mut self, input: &[i16], output: &mut Vec<f32>) {
        let scale = 1.0 / i16::MAX as f32;
        while self.position < input.len() as f64 {
            let index = self.position as usize;
            let frac = (self.position - index as f64) as f32;

            let current = input[index] as f32 * scale;
            let before = if index == 0 {
                self.previous
            } else {
                input[index - 1] as f32 * scale
            };
            output.push(before + (current - before) * frac);

            self.position += self.step;
        }
        self.position -= input.len() as f64;
        self.previous = *input.last().unwrap_or(&0) as f32 * scale;
    }
}

/// Bounded FIFO shared between the emulation thread and the audio callback
pub struct RingBuffer {
    samples: VecDeque<f32>,
    capacity: usize,
}

impl RingBuffer {
    pub fn new(capacity: usize) -> Self {
        RingBuffer {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append samples, dropping the oldest on overflow
    ///
    /// Overrun means the consumer stalled; favoring fresh audio keeps the
    /// latency bounded.
    pub fn push(&mut self, samples: &[f32]) {
        for &sample in samples {
            if self.samples.len() == self.capacity {
                self.samples.pop_front();
            }
            self.samples.push_back(sample);
        }
    }

    /// Fill `dest`, padding with silence on underrun
    pub fn pop(&mut self, dest: &mut [f32]) {
        for slot in dest.iter_mut() {
            *slot = self.samples.pop_front().unwrap_or(0.0);
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apu::constants::TICKS_IN_FRAME;

    #[test]
    fn test_resampler_output_rate() {
        let mut resampler = Resampler::new(48_000);
        let input = vec![0i16; TICKS_IN_FRAME];
        let mut output = Vec::new();
        resampler.resample(&input, &mut output);

        // One frame at 60 FPS is 800 host samples at 48 kHz
        assert_eq!(output.len(), 800);
    }

    #[test]
    fn test_resampler_carries_position() {
        let mut resampler = Resampler::new(44_100);
        let input = vec![0i16; TICKS_IN_FRAME];
        let mut total = 0;
        for _ in 0..60 {
            let mut output = Vec::new();
            resampler.resample(&input, &mut output);
            total += output.len();
        }
        // One second of frames lands on one second of host samples
        // (within a sample of floating-point carry)
        assert!((total as i64 - 44_100).abs() <= 1, "total = {}", total);
    }

    #[test]
    fn test_ring_buffer_overflow_drops_oldest() {
        let mut ring = RingBuffer::new(4);
        ring.push(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(ring.len(), 4);

        let mut out = [0.0; 4];
        ring.pop(&mut out);
        assert_eq!(out, [2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_ring_buffer_underrun_pads_silence() {
        let mut ring = RingBuffer::new(8);
        ring.push(&[1.0]);

        let mut out = [9.0; 3];
        ring.pop(&mut out);
        assert_eq!(out, [1.0, 0.0, 0.0]);
    }
}
