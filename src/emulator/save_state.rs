// Save states
//
// A snapshot mirrors the CPU aggregate field by field: registers, RAM, the
// whole PPU (including its pixel cache and dirty bookkeeping, so a restore
// is exact), and the APU with its filter history. The cartridge is
// deliberately absent - the console re-attaches its own after a load. On
// disk a snapshot is a JSON document behind LZ4 frame compression.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::apu::Apu;
use crate::cartridge::Mirroring;
use crate::cpu::Cpu;
use crate::ppu::TileIndex;

/// Current snapshot format version
const SNAPSHOT_VERSION: u32 = 1;

/// Errors from save-state operations
#[derive(Debug)]
pub enum SaveStateError {
    /// I/O error
    Io(io::Error),

    /// JSON encoding/decoding error
    Serialization(serde_json::Error),

    /// The compressed blob is corrupt
    Decompression(lz4_flex::block::DecompressError),

    /// Snapshot format version mismatch
    VersionMismatch { expected: u32, found: u32 },

    /// The console was built from bytes, so there is no path to save under
    NoRomLoaded,
}

impl fmt::Display for SaveStateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveStateError::Io(e) => write!(f, "I/O error: {}", e),
            SaveStateError::Serialization(e) => write!(f, "serialization error: {}", e),
            SaveStateError::Decompression(e) => write!(f, "decompression error: {}", e),
            SaveStateError::VersionMismatch { expected, found } => {
                write!(f, "version mismatch: expected {}, found {}", expected, found)
            }
            SaveStateError::NoRomLoaded => write!(f, "no ROM loaded"),
        }
    }
}

impl std::error::Error for SaveStateError {}

impl From<io::Error> for SaveStateError {
    fn from(e: io::Error) -> Self {
        SaveStateError::Io(e)
    }
}

impl From<serde_json::Error> for SaveStateError {
    fn from(e: serde_json::Error) -> Self {
        SaveStateError::Serialization(e)
    }
}

impl From<lz4_flex::block::DecompressError> for SaveStateError {
    fn from(e: lz4_flex::block::DecompressError) -> Self {
        SaveStateError::Decompression(e)
    }
}

/// On-disk path for a slot: `<rom>.slot<N>.state` next to the ROM
pub(super) fn slot_path(rom_path: &Path, slot: u8) -> PathBuf {
    let mut name = rom_path.as_os_str().to_os_string();
    name.push(format!(".slot{}.state", slot));
    PathBuf::from(name)
}

/// A complete serialized CPU aggregate
#[derive(Debug, Serialize, Deserialize)]
pub struct Snapshot {
    version: u32,
    timestamp: String,
    cpu: CpuState,
    ppu: PpuState,
    apu: Apu,
}

#[derive(Debug, Serialize, Deserialize)]
struct CpuState {
    pc: u16,
    sp: u8,
    a: u8,
    x: u8,
    y: u8,
    n: bool,
    z: bool,
    c: bool,
    v: bool,
    i: bool,
    d: bool,
    ram: Vec<u8>,
    frame: u64,
    instruction_count: u64,
    input_value: u8,
}

#[derive(Debug, Serialize, Deserialize)]
struct PpuState {
    oam: Vec<u8>,
    ram: Vec<u8>,
    palette: Vec<u8>,
    mirroring: Mirroring,
    ctrl: u8,
    mask: u8,
    x_scroll: u8,
    y_scroll: u8,
    scroll_toggle: bool,
    oam_addr: u8,
    ppu_addr: u16,
    ppu_addr_toggle: bool,
    delayed_read: u8,
    vblank: bool,
    sprite_zero_hit: bool,
    x_scroll_before_sprite_zero_hit: u16,
    y_scroll_before_sprite_zero_hit: u16,
    instruction_count_at_last_ppu_status_read: u64,
    background_pattern_table_changed: bool,
    background_palette_changed: bool,
    background_tile_changed: Vec<TileIndex>,
    background_tiles_with_palette: [Vec<TileIndex>; 4],
    background_tiles: Vec<u32>,
}

/// Sort a set into a stable list so snapshots are byte-reproducible
fn sorted(set: &HashSet<TileIndex>) -> Vec<TileIndex> {
    let mut entries: Vec<TileIndex> = set.iter().copied().collect();
    entries.sort_unstable();
    entries
}

impl Snapshot {
    /// Capture the aggregate's current state
    pub fn capture(cpu: &Cpu) -> Self {
        Snapshot {
            version: SNAPSHOT_VERSION,
            timestamp: chrono::Local::now().to_rfc3339(),
            cpu: CpuState {
                pc: cpu.pc,
                sp: cpu.sp,
                a: cpu.a,
                x: cpu.x,
                y: cpu.y,
                n: cpu.n,
                z: cpu.z,
                c: cpu.c,
                v: cpu.v,
                i: cpu.i,
                d: cpu.d,
                ram: cpu.ram.to_vec(),
                frame: cpu.frame,
                instruction_count: cpu.instruction_count,
                input_value: cpu.input_value,
            },
            ppu: PpuState {
                oam: cpu.ppu.oam.to_vec(),
                ram: cpu.ppu.ram.to_vec(),
                palette: cpu.ppu.palette.to_vec(),
                mirroring: cpu.ppu.mirroring,
                ctrl: cpu.ppu.ctrl,
                mask: cpu.ppu.mask,
                x_scroll: cpu.ppu.x_scroll,
                y_scroll: cpu.ppu.y_scroll,
                scroll_toggle: cpu.ppu.scroll_toggle,
                oam_addr: cpu.ppu.oam_addr,
                ppu_addr: cpu.ppu.ppu_addr,
                ppu_addr_toggle: cpu.ppu.ppu_addr_toggle,
                delayed_read: cpu.ppu.delayed_read,
                vblank: cpu.ppu.vblank,
                sprite_zero_hit: cpu.ppu.sprite_zero_hit,
                x_scroll_before_sprite_zero_hit: cpu.ppu.x_scroll_before_sprite_zero_hit,
                y_scroll_before_sprite_zero_hit: cpu.ppu.y_scroll_before_sprite_zero_hit,
                instruction_count_at_last_ppu_status_read: cpu
                    .ppu
                    .instruction_count_at_last_ppu_status_read,
                background_pattern_table_changed: cpu.ppu.background_pattern_table_changed,
                background_palette_changed: cpu.ppu.background_palette_changed,
                background_tile_changed: sorted(&cpu.ppu.background_tile_changed),
                background_tiles_with_palette: [
                    sorted(&cpu.ppu.background_tiles_with_palette[0]),
                    sorted(&cpu.ppu.background_tiles_with_palette[1]),
                    sorted(&cpu.ppu.background_tiles_with_palette[2]),
                    sorted(&cpu.ppu.background_tiles_with_palette[3]),
                ],
                background_tiles: cpu.ppu.background_tiles.clone(),
            },
            apu: cpu.apu.clone(),
        }
    }

    /// Overwrite the aggregate with this snapshot's state
    ///
    /// The tile-rasterization memo is dropped; it is a pure function of
    /// ROM and palette values and repopulates on the next render.
    pub fn restore(&self, cpu: &mut Cpu) {
        cpu.pc = self.cpu.pc;
        cpu.sp = self.cpu.sp;
        cpu.a = self.cpu.a;
        cpu.x = self.cpu.x;
        cpu.y = self.cpu.y;
        cpu.n = self.cpu.n;
        cpu.z = self.cpu.z;
        cpu.c = self.cpu.c;
        cpu.v = self.cpu.v;
        cpu.i = self.cpu.i;
        cpu.d = self.cpu.d;
        cpu.ram.copy_from_slice(&self.cpu.ram);
        cpu.frame = self.cpu.frame;
        cpu.instruction_count = self.cpu.instruction_count;
        cpu.input_value = self.cpu.input_value;

        let ppu = &mut cpu.ppu;
        ppu.oam.copy_from_slice(&self.ppu.oam);
        ppu.ram.copy_from_slice(&self.ppu.ram);
        ppu.palette.copy_from_slice(&self.ppu.palette);
        ppu.mirroring = self.ppu.mirroring;
        ppu.ctrl = self.ppu.ctrl;
        ppu.mask = self.ppu.mask;
        ppu.x_scroll = self.ppu.x_scroll;
        ppu.y_scroll = self.ppu.y_scroll;
        ppu.scroll_toggle = self.ppu.scroll_toggle;
        ppu.oam_addr = self.ppu.oam_addr;
        ppu.ppu_addr = self.ppu.ppu_addr;
        ppu.ppu_addr_toggle = self.ppu.ppu_addr_toggle;
        ppu.delayed_read = self.ppu.delayed_read;
        ppu.vblank = self.ppu.vblank;
        ppu.sprite_zero_hit = self.ppu.sprite_zero_hit;
        ppu.x_scroll_before_sprite_zero_hit = self.ppu.x_scroll_before_sprite_zero_hit;
        ppu.y_scroll_before_sprite_zero_hit = self.ppu.y_scroll_before_sprite_zero_hit;
        ppu.instruction_count_at_last_ppu_status_read =
            self.ppu.instruction_count_at_last_ppu_status_read;
        ppu.background_pattern_table_changed = self.ppu.background_pattern_table_changed;
        ppu.background_palette_changed = self.ppu.background_palette_changed;
        ppu.background_tile_changed = self.ppu.background_tile_changed.iter().copied().collect();
        for (target, source) in ppu
            .background_tiles_with_palette
            .iter_mut()
            .zip(self.ppu.background_tiles_with_palette.iter())
        {
            *target = source.iter().copied().collect();
        }
        ppu.background_tiles.copy_from_slice(&self.ppu.background_tiles);
        ppu.tile_memo.clear();

        cpu.apu = self.apu.clone();
    }

    /// Write the snapshot as an LZ4-compressed JSON blob
    pub fn write_compressed(&self, path: &Path) -> Result<(), SaveStateError> {
        let json = serde_json::to_vec(self)?;
        let compressed = lz4_flex::compress_prepend_size(&json);
        fs::write(path, compressed)?;
        Ok(())
    }

    /// Read a snapshot back from its compressed blob
    pub fn read_compressed(path: &Path) -> Result<Self, SaveStateError> {
        let compressed = fs::read(path)?;
        let json = lz4_flex::decompress_size_prepended(&compressed)?;
        let snapshot: Snapshot = serde_json::from_slice(&json)?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SaveStateError::VersionMismatch {
                expected: SNAPSHOT_VERSION,
                found: snapshot.version,
            });
        }
        Ok(snapshot)
    }
}
