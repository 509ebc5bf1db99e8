// Shared helpers for ROM-based integration tests
//
// Assembles minimal NROM images in memory: a 16 KiB PRG bank with caller
// supplied code and vectors, plus an 8 KiB CHR bank with optional patches.

#![allow(dead_code)]

use famicore::cartridge::{Cartridge, PRG_BANK_SIZE};

pub const CHR_ROM_SIZE: usize = 8 * 1024;

/// Builder for a one-bank NROM image
pub struct RomBuilder {
    prg: Vec<u8>,
    chr: Vec<u8>,
    flag6: u8,
}

impl RomBuilder {
    pub fn new() -> Self {
        RomBuilder {
            prg: vec![0xEA; PRG_BANK_SIZE],
            chr: vec![0x00; CHR_ROM_SIZE],
            flag6: 0,
        }
    }

    /// Place code at a CPU address in $8000-$BFFF
    pub fn code(mut self, cpu_addr: u16, bytes: &[u8]) -> Self {
        let offset = (cpu_addr - 0x8000) as usize;
        self.prg[offset..offset + bytes.len()].copy_from_slice(bytes);
        self
    }

    /// Set the reset vector ($FFFC)
    pub fn reset_vector(mut self, target: u16) -> Self {
        self.prg[0x3FFC] = target as u8;
        self.prg[0x3FFD] = (target >> 8) as u8;
        self
    }

    /// Set the NMI vector ($FFFA)
    pub fn nmi_vector(mut self, target: u16) -> Self {
        self.prg[0x3FFA] = target as u8;
        self.prg[0x3FFB] = (target >> 8) as u8;
        self
    }

    /// Patch a CHR byte
    pub fn chr(mut self, addr: usize, value: u8) -> Self {
        self.chr[addr] = value;
        self
    }

    /// Make tile `index` solid pixel-value 3
    pub fn solid_tile(mut self, index: usize) -> Self {
        for row in 0..16 {
            self.chr[index * 16 + row] = 0xFF;
        }
        self
    }

    pub fn vertical_mirroring(mut self) -> Self {
        self.flag6 |= 0x01;
        self
    }

    /// Serialize to iNES bytes
    pub fn build_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"NES\x1a");
        bytes.push(1); // one PRG bank
        bytes.push(1); // one CHR bank
        bytes.push(self.flag6);
        bytes.extend_from_slice(&[0; 9]);
        bytes.extend_from_slice(&self.prg);
        bytes.extend_from_slice(&self.chr);
        bytes
    }

    pub fn build(&self) -> Cartridge {
        Cartridge::from_ines_bytes(&self.build_bytes()).unwrap()
    }
}

/// A reset routine that parks the CPU in a self-loop at $8000
pub fn idle_reset() -> RomBuilder {
    RomBuilder::new()
        .code(0x8000, &[0x4C, 0x00, 0x80]) // JMP $8000
        .reset_vector(0x8000)
        .nmi_vector(0x8000)
}
