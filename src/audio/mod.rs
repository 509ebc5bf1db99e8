// Audio module - host playback (feature `audio`)
//
// The console synthesizes at the APU rate (893.4 kHz); the resampler
// decimates each frame down to the host rate and a cpal stream drains the
// shared ring buffer.

mod output;
mod resampler;

pub use output::AudioOutput;
pub use resampler::{Resampler, RingBuffer};
