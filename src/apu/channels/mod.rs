//! Synthesis channels

mod noise;
mod pulse;
mod triangle;

pub use noise::NoiseChannel;
pub use pulse::PulseChannel;
pub use triangle::TriangleChannel;
