//! First-order IIR filters for the output chain
//!
//! The NES front end is modeled as two high-passes (90 Hz and 442 Hz) and
//! one low-pass (14 kHz), all running at the APU sample rate. Previous
//! input/output pairs persist across frames so the chain is continuous at
//! frame boundaries.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum FilterKind {
    HighPass,
    LowPass,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirstOrderFilter {
    kind: FilterKind,
    coefficient: f32,

    /// Previous input sample
    pub previous_input: f32,

    /// Previous output sample
    pub previous_output: f32,
}

impl FirstOrderFilter {
    pub fn high_pass(sample_rate: f32, cutoff: f32) -> Self {
        let rc = 1.0 / (2.0 * std::f32::consts::PI * cutoff);
        let dt = 1.0 / sample_rate;
        FirstOrderFilter {
            kind: FilterKind::HighPass,
            coefficient: rc / (rc + dt),
            previous_input: 0.0,
            previous_output: 0.0,
        }
    }

    pub fn low_pass(sample_rate: f32, cutoff: f32) -> Self {
        let rc = 1.0 / (2.0 * std::f32::consts::PI * cutoff);
        let dt = 1.0 / sample_rate;
        FirstOrderFilter {
            kind: FilterKind::LowPass,
            coefficient: dt / (rc + dt),
            previous_input: 0.0,
            previous_output: 0.0,
        }
    }

    /// Run one sample through the filter
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let output = match self.kind {
            FilterKind::HighPass => {
                self.coefficient * (self.previous_output + input - self.previous_input)
            }
            FilterKind::LowPass => {
                self.previous_output + self.coefficient * (input - self.previous_output)
            }
        };
        self.previous_input = input;
        self.previous_output = output;
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_in_zero_history_zero_out() {
        let mut hp = FirstOrderFilter::high_pass(893_400.0, 90.0);
        let mut lp = FirstOrderFilter::low_pass(893_400.0, 14_000.0);
        for _ in 0..100 {
            assert_eq!(hp.process(0.0), 0.0);
            assert_eq!(lp.process(0.0), 0.0);
        }
    }

    #[test]
    fn test_high_pass_rejects_dc() {
        let mut hp = FirstOrderFilter::high_pass(893_400.0, 90.0);
        let mut output = 0.0;
        for _ in 0..2_000_000 {
            output = hp.process(1.0);
        }
        // A constant input decays toward zero
        assert!(output.abs() < 0.01);
    }

    #[test]
    fn test_low_pass_settles_on_dc() {
        let mut lp = FirstOrderFilter::low_pass(893_400.0, 14_000.0);
        let mut output = 0.0;
        for _ in 0..100_000 {
            output = lp.process(1.0);
        }
        assert!((output - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_history_persists() {
        let mut hp = FirstOrderFilter::high_pass(893_400.0, 90.0);
        hp.process(0.5);
        assert_eq!(hp.previous_input, 0.5);
        assert_ne!(hp.previous_output, 0.0);
    }
}
