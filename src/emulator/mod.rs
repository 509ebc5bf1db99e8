// Emulator module - the console aggregate and frame driver
//
// A `Console` owns one cartridge and one CPU aggregate (which transitively
// owns the PPU and APU). Each `advance_one_frame` call is indivisible:
// vblank setup, the NMI burst, video composition, audio synthesis, in that
// order, with no suspension points in between.

mod config;
mod save_state;
mod screenshot;

pub use config::{AudioConfig, EmulatorConfig, PathsConfig, VideoConfig, CONFIG_FILE};
pub use save_state::{SaveStateError, Snapshot};
pub use screenshot::{save_screenshot, ScreenshotError};

use std::fmt;
use std::path::{Path, PathBuf};

use crate::cartridge::{Cartridge, INesError};
use crate::cpu::{Cpu, HaltReason};
use crate::error::EmulationError;
use crate::input::Buttons;
use crate::ppu::constants::{FRAME_HEIGHT, FRAME_WIDTH};

/// Errors surfaced by console construction and frame advancement
#[derive(Debug)]
pub enum ConsoleError {
    /// The ROM failed to load
    Cartridge(INesError),

    /// The emulation core faulted
    Emulation(EmulationError),
}

impl fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsoleError::Cartridge(e) => write!(f, "cartridge error: {}", e),
            ConsoleError::Emulation(e) => write!(f, "emulation error: {}", e),
        }
    }
}

impl std::error::Error for ConsoleError {}

impl From<INesError> for ConsoleError {
    fn from(e: INesError) -> Self {
        ConsoleError::Cartridge(e)
    }
}

impl From<EmulationError> for ConsoleError {
    fn from(e: EmulationError) -> Self {
        ConsoleError::Emulation(e)
    }
}

/// One emulated NES console
pub struct Console {
    /// Shared read-only ROM data; never part of the serialized aggregate
    cartridge: Cartridge,

    /// The CPU aggregate (CPU + PPU + APU + RAM)
    cpu: Cpu,

    /// Save slot selected for the next save/load (0-9)
    current_slot: u8,

    /// ROM path, used to name save-state and screenshot files
    rom_path: Option<PathBuf>,
}

impl Console {
    /// Visible frame width in pixels
    pub const WIDTH: usize = FRAME_WIDTH;

    /// Visible frame height in pixels
    pub const HEIGHT: usize = FRAME_HEIGHT;

    /// Frames per second
    pub const FPS: u32 = 60;

    /// Host tick budget per frame (CPU cycles; twice the APU sample count)
    pub const TICKS_IN_FRAME: u32 = 29780;

    /// Number of save slots
    pub const SAVE_SLOTS: u8 = 10;

    /// Boot a console from an iNES file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConsoleError> {
        let cartridge = Cartridge::from_file(path.as_ref())?;
        let mut console = Self::with_cartridge(cartridge)?;
        console.rom_path = Some(path.as_ref().to_path_buf());
        Ok(console)
    }

    /// Boot a console from an already-loaded cartridge
    ///
    /// Runs the reset burst: PC loads from the RESET vector and the CPU
    /// executes until the init code settles into its wait-for-vblank spin.
    pub fn with_cartridge(cartridge: Cartridge) -> Result<Self, ConsoleError> {
        let mut cpu = Cpu::new(cartridge.mirroring);
        cpu.load_rst_entrypoint(&cartridge)?;
        let halt = cpu.run_burst(&cartridge)?;
        if halt != HaltReason::InfiniteLoop {
            log::debug!("reset burst ended via {:?} instead of an idle spin", halt);
        }

        Ok(Console {
            cartridge,
            cpu,
            current_slot: 0,
            rom_path: None,
        })
    }

    /// Latch the currently pressed buttons for the next $4016 read-out
    pub fn set_input(&mut self, buttons: Buttons) {
        self.cpu.input_value = buttons.to_latch();
    }

    /// Run one 60 Hz frame
    ///
    /// Fills `video` (224x256 RGBA pixels) and `audio` (14890 samples) and
    /// returns `(true, TICKS_IN_FRAME)` per the host contract. Ordering is
    /// strict: vblank entry, NMI burst, render, synthesize. Both burst
    /// terminals are normal; every other failure aborts the frame.
    pub fn advance_one_frame(
        &mut self,
        video: &mut [u32],
        audio: &mut [i16],
    ) -> Result<(bool, u32), EmulationError> {
        self.cpu.ppu.begin_vblank();
        self.cpu.load_nmi_entrypoint(&self.cartridge)?;
        self.cpu.run_burst(&self.cartridge)?;
        self.cpu.ppu.render(&self.cartridge, video)?;
        self.cpu.apu.generate(audio)?;
        Ok((true, Self::TICKS_IN_FRAME))
    }

    /// Completed frame count
    pub fn frame(&self) -> u64 {
        self.cpu.frame
    }

    /// Borrow the CPU aggregate (tests and debugging)
    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// Mutably borrow the CPU aggregate (tests and debugging)
    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    /// Borrow the cartridge
    pub fn cartridge(&self) -> &Cartridge {
        &self.cartridge
    }

    // ========================================
    // Save states
    // ========================================

    /// Select the save slot used by `save_state`/`load_state`
    pub fn set_current_slot(&mut self, slot: u8) {
        self.current_slot = slot % Self::SAVE_SLOTS;
    }

    pub fn current_slot(&self) -> u8 {
        self.current_slot
    }

    /// Serialize the CPU aggregate into the current slot
    ///
    /// The cartridge is not part of the snapshot; `load_state` reuses the
    /// one already attached to this console.
    pub fn save_state(&self) -> Result<PathBuf, SaveStateError> {
        let path = self.slot_path(self.current_slot)?;
        let snapshot = Snapshot::capture(&self.cpu);
        snapshot.write_compressed(&path)?;
        log::info!("saved state to {:?}", path);
        Ok(path)
    }

    /// Replace the CPU aggregate from the current slot
    ///
    /// A missing snapshot file is a silent no-op (returns false), matching
    /// the "load before ever saving" hotkey case.
    pub fn load_state(&mut self) -> Result<bool, SaveStateError> {
        let path = self.slot_path(self.current_slot)?;
        if !path.exists() {
            log::debug!("no state in slot {}, ignoring", self.current_slot);
            return Ok(false);
        }
        let snapshot = Snapshot::read_compressed(&path)?;
        snapshot.restore(&mut self.cpu);
        log::info!("loaded state from {:?}", path);
        Ok(true)
    }

    fn slot_path(&self, slot: u8) -> Result<PathBuf, SaveStateError> {
        let rom_path = self.rom_path.as_deref().ok_or(SaveStateError::NoRomLoaded)?;
        Ok(save_state::slot_path(rom_path, slot))
    }
}
