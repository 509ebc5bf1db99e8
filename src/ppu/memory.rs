// PPU memory access - pattern/nametable/palette addressing
//
// Also home to the tile-index math shared with the renderer: a cell in the
// 64x64 index space covers the 2x2 nametable expansion, with bank B mapped
// to x >= 32 and the (unreachable on these carts) bottom tables to y >= 32.

use super::constants::{ATTRIBUTE_OFFSET, NAMETABLE_SIZE};
use super::{Ppu, TileIndex};
use crate::cartridge::{Cartridge, Mirroring};
use crate::error::EmulationError;

impl Ppu {
    /// Map a nametable address ($2000-$2FFF) to physical VRAM
    ///
    /// The low 10 bits address within a table; which physical bank a table
    /// lands in depends on the cartridge mirroring.
    pub(super) fn mirror_nametable_addr(&self, addr: u16) -> usize {
        let a_addr = (addr & 0x3FF) as usize;
        let b_addr = a_addr + NAMETABLE_SIZE;
        let table = (addr as usize >> 10) & 0x3;

        match (table, self.mirroring) {
            (0, _) => a_addr,
            (1, Mirroring::Horizontal) => a_addr,
            (1, Mirroring::Vertical) => b_addr,
            (2, Mirroring::Horizontal) => b_addr,
            (2, Mirroring::Vertical) => a_addr,
            (3, _) => b_addr,
            _ => unreachable!(),
        }
    }

    /// Read from PPU address space
    ///
    /// Pattern memory reads are delayed one read through the buffer, the
    /// way games expect when streaming CHR through $2007. Nametable and
    /// palette reads return current contents directly.
    pub(super) fn ppu_read(&mut self, cart: &Cartridge, addr: u16) -> Result<u8, EmulationError> {
        match addr {
            0x0000..=0x1FFF => {
                let result = self.delayed_read;
                self.delayed_read = cart.read_chr(addr);
                Ok(result)
            }
            0x2000..=0x2FFF => {
                let physical = self.mirror_nametable_addr(addr);
                Ok(self.ram[physical])
            }
            0x3F00..=0x3F1F => Ok(self.palette[(addr & 0x1F) as usize]),
            _ => Err(EmulationError::InvalidPpuAccess { addr }),
        }
    }

    /// Write to PPU address space
    pub(super) fn ppu_write(&mut self, addr: u16, value: u8) -> Result<(), EmulationError> {
        match addr {
            0x2000..=0x2FFF => {
                let physical = self.mirror_nametable_addr(addr);
                if self.ram[physical] != value {
                    for index in addr_to_indexes(physical as u16) {
                        self.background_tile_changed.insert(index);
                    }
                }
                self.ram[physical] = value;
                Ok(())
            }
            0x3F00..=0x3F1F => {
                let folded = (addr & 0x1F) as usize;
                match folded {
                    // The four background color slots mirror into the
                    // sprite half and vice versa
                    0x00 | 0x04 | 0x08 | 0x0C => {
                        self.palette[folded | 0x10] = value;
                    }
                    0x10 | 0x14 | 0x18 | 0x1C => {
                        self.palette[folded & !0x10] = value;
                    }
                    _ if folded < 0x10 && self.palette[folded] != value => {
                        // A changed background palette entry dirties every
                        // tile currently drawn with that palette
                        let palette_index = folded >> 2;
                        for &index in &self.background_tiles_with_palette[palette_index] {
                            self.background_tile_changed.insert(index);
                        }
                    }
                    _ => {}
                }
                self.palette[folded] = value;
                Ok(())
            }
            _ => Err(EmulationError::InvalidPpuAccess { addr }),
        }
    }
}

/// Compute the VRAM addresses backing a tile cell
///
/// Returns (pattern address, attribute address), both physical when the
/// cell's nametable bits are physical (the renderer passes y < 30, x < 64).
pub(super) fn index_to_addr(y: u8, x: u8) -> (u16, u16) {
    let y = y as u16;
    let x = x as u16;
    let nametable = ((y & 0x20) << 6) | ((x & 0x20) << 5);
    let pattern = nametable | ((y & 0x1F) << 5) | (x & 0x1F);
    let attribute = nametable | ATTRIBUTE_OFFSET | ((y & 0x1C) << 1) | ((x & 0x1C) >> 2);
    (pattern, attribute)
}

/// Compute the tile cells a VRAM write touches
///
/// A tile-index byte maps to one cell; an attribute byte fans out to its
/// 4x4 cell block.
pub(super) fn addr_to_indexes(addr: u16) -> Vec<TileIndex> {
    let y_bank = (((addr >> 11) & 0x01) << 5) as u8;
    let x_bank = (((addr >> 10) & 0x01) << 5) as u8;
    let addr = addr & 0x3FF;

    if addr < ATTRIBUTE_OFFSET {
        let y = y_bank | ((addr >> 5) & 0x1F) as u8;
        let x = x_bank | (addr & 0x1F) as u8;
        return vec![(y, x)];
    }

    let y = y_bank | ((addr & 0b0011_1000) >> 1) as u8;
    let x = x_bank | ((addr & 0b0000_0111) << 2) as u8;
    let mut indexes = Vec::with_capacity(16);
    for dy in 0..4 {
        for dx in 0..4 {
            indexes.push((y | dy, x | dx));
        }
    }
    indexes
}
