// Audio output - cpal stream fed from the frame loop

use std::sync::{Arc, Mutex};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Stream, StreamConfig};

use super::resampler::{Resampler, RingBuffer};
use crate::emulator::AudioConfig;

/// A running mono output stream
pub struct AudioOutput {
    // Held so the stream stays alive; cpal stops on drop
    _stream: Stream,
    buffer: Arc<Mutex<RingBuffer>>,
    resampler: Mutex<Resampler>,
    volume: f32,
}

impl AudioOutput {
    /// Open the default output device at the configured rate
    pub fn new(config: &AudioConfig) -> Result<Self, String> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| "no audio output device".to_string())?;

        let stream_config = StreamConfig {
            channels: 1,
            sample_rate: cpal::SampleRate(config.sample_rate),
            buffer_size: cpal::BufferSize::Default,
        };

        // Capacity for ~100 ms keeps latency low but survives a slow frame
        let capacity = config.sample_rate as usize / 10;
        let buffer = Arc::new(Mutex::new(RingBuffer::new(capacity)));

        let callback_buffer = Arc::clone(&buffer);
        let stream = device
            .build_output_stream(
                &stream_config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    match callback_buffer.lock() {
                        Ok(mut ring) => ring.pop(data),
                        Err(_) => data.fill(0.0),
                    }
                },
                |e| log::error!("audio stream error: {}", e),
                None,
            )
            .map_err(|e| format!("failed to build output stream: {}", e))?;

        stream
            .play()
            .map_err(|e| format!("failed to start output stream: {}", e))?;

        log::info!("audio output at {} Hz", config.sample_rate);
        Ok(AudioOutput {
            _stream: stream,
            buffer,
            resampler: Mutex::new(Resampler::new(config.sample_rate)),
            volume: config.volume.clamp(0.0, 1.0),
        })
    }

    /// Queue one frame of APU samples for playback
    pub fn push_frame(&self, samples: &[i16]) {
        let mut resampled = Vec::new();
        if let Ok(mut resampler) = self.resampler.lock() {
            resampler.resample(samples, &mut resampled);
        }
        if self.volume != 1.0 {
            for sample in &mut resampled {
                *sample *= self.volume;
            }
        }
        if let Ok(mut ring) = self.buffer.lock() {
            ring.push(&resampled);
        }
    }
}
