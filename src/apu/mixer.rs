// Nonlinear channel mixer
//
// The NES mixes its channels through two resistor ladders rather than
// summing them; the standard rational approximations reproduce that curve:
//
// ```text
// pulse_out = 95.88 / (8128 / (pulse1 + pulse2) + 100)
// tnd_out   = 159.79 / (1 / (triangle/8227 + noise/12241 + dmc/22638) + 100)
// ```
//
// Both terms are defined as 0 when their channel sum is 0, so full silence
// mixes to exactly 0.0 and scales to an all-zero sample buffer.

/// Mix one sample's worth of raw channel levels into a float
///
/// Pure over its inputs; the filter chain and scaling happen in the APU's
/// generate pass.
#[inline]
pub fn mix(pulse1: u8, pulse2: u8, triangle: u8, noise: u8, dmc: u8) -> f32 {
    mix_pulse(pulse1, pulse2) + mix_tnd(triangle, noise, dmc)
}

#[inline]
fn mix_pulse(pulse1: u8, pulse2: u8) -> f32 {
    let pulse_sum = pulse1 as f32 + pulse2 as f32;
    if pulse_sum == 0.0 {
        return 0.0;
    }
    95.88 / (8128.0 / pulse_sum + 100.0)
}

#[inline]
fn mix_tnd(triangle: u8, noise: u8, dmc: u8) -> f32 {
    let tnd_sum =
        triangle as f32 / 8227.0 + noise as f32 / 12241.0 + dmc as f32 / 22638.0;
    if tnd_sum == 0.0 {
        return 0.0;
    }
    159.79 / (1.0 / tnd_sum + 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silence_mixes_to_zero() {
        assert_eq!(mix(0, 0, 0, 0, 0), 0.0);
    }

    #[test]
    fn test_pulse_formula() {
        let expected = 95.88 / (8128.0 / 16.0 + 100.0);
        assert!((mix(8, 8, 0, 0, 0) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_tnd_formula() {
        let tnd_sum = 8.0 / 8227.0 + 8.0 / 12241.0 + 64.0 / 22638.0;
        let expected = 159.79 / (1.0 / tnd_sum + 100.0);
        assert!((mix(0, 0, 8, 8, 64) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_output_is_bounded() {
        // Full-scale everything stays comfortably inside [0, 1)
        let max = mix(15, 15, 15, 15, 127);
        assert!(max > 0.0 && max < 1.0);
    }

    #[test]
    fn test_mix_is_monotonic_in_pulse_level() {
        let mut previous = 0.0;
        for level in 0..=15 {
            let mixed = mix(level, 0, 0, 0, 0);
            assert!(mixed >= previous);
            previous = mixed;
        }
    }
}
