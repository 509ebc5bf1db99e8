// famicore - a batched NES emulator core
//
// The simulator runs whole frames at a time: a CPU burst from NMI entry to
// a terminal instruction, then one-shot video composition and audio
// synthesis. See DESIGN.md for the model's tradeoffs.

pub mod apu;
#[cfg(feature = "audio")]
pub mod audio;
pub mod cartridge;
pub mod cpu;
pub mod display;
pub mod emulator;
pub mod error;
pub mod input;
pub mod ppu;

pub use apu::Apu;
pub use cartridge::{Cartridge, INesError, INesHeader, Mirroring};
pub use cpu::{Cpu, HaltReason};
pub use emulator::{Console, ConsoleError, EmulatorConfig, SaveStateError, Snapshot};
pub use error::EmulationError;
pub use input::Buttons;
pub use ppu::Ppu;
