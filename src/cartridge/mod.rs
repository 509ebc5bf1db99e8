// Cartridge module - iNES loading and the NROM cartridge model
//
// Only mapper 0 (NROM) is supported: 16 KiB or 32 KiB of PRG-ROM, 8 KiB of
// CHR-ROM, and a fixed mirroring arrangement from the header. The cartridge
// is immutable after load and shared read-only between the CPU and the PPU.

mod ines;

pub use ines::{INesError, INesHeader};

use std::path::Path;

/// PRG-ROM bank size (16 KiB)
pub const PRG_BANK_SIZE: usize = 16 * 1024;

/// CHR-ROM size for NROM (8 KiB)
pub const CHR_ROM_SIZE: usize = 8 * 1024;

/// Nametable mirroring arrangement
///
/// The 2 KiB of physical nametable RAM backs a 4-table address space; the
/// cartridge wiring decides which logical tables share a physical bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Mirroring {
    /// Tables 0/1 share bank A, tables 2/3 share bank B
    Horizontal,
    /// Tables 0/2 share bank A, tables 1/3 share bank B
    Vertical,
}

/// A loaded NROM cartridge
///
/// Immutable after construction. The CPU reads PRG-ROM through the bus and
/// the PPU reads CHR-ROM while rasterizing tiles; neither ever writes here.
pub struct Cartridge {
    /// Mapper id from the header (always 0 for a successfully loaded cart)
    pub mapper: u8,

    /// Nametable mirroring arrangement
    pub mirroring: Mirroring,

    /// Cartridge-side PRG RAM present (flag 6 bit 1; informational only)
    pub has_prg_ram: bool,

    /// PRG-ROM contents (16 KiB or 32 KiB)
    prg_rom: Vec<u8>,

    /// CHR-ROM contents (8 KiB)
    chr_rom: Vec<u8>,
}

impl Cartridge {
    /// Load a cartridge from an iNES file on disk
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, INesError> {
        let bytes = std::fs::read(path.as_ref())?;
        let cartridge = Self::from_ines_bytes(&bytes)?;
        log::info!(
            "loaded {:?}: mapper {}, {} KiB PRG, {} KiB CHR, {:?} mirroring",
            path.as_ref(),
            cartridge.mapper,
            cartridge.prg_rom.len() / 1024,
            cartridge.chr_rom.len() / 1024,
            cartridge.mirroring
        );
        Ok(cartridge)
    }

    /// Parse a cartridge from an in-memory iNES image
    ///
    /// The image must contain exactly the header, optional 512-byte trainer,
    /// PRG-ROM, and CHR-ROM; trailing bytes are rejected.
    pub fn from_ines_bytes(bytes: &[u8]) -> Result<Self, INesError> {
        let header = INesHeader::parse(bytes)?;

        if header.mapper != 0 {
            return Err(INesError::UnsupportedMapper {
                mapper: header.mapper,
            });
        }
        if header.prg_rom_size != PRG_BANK_SIZE && header.prg_rom_size != 2 * PRG_BANK_SIZE {
            return Err(INesError::BadPrgSize {
                size: header.prg_rom_size,
            });
        }
        if header.chr_rom_size != CHR_ROM_SIZE {
            return Err(INesError::BadChrSize {
                size: header.chr_rom_size,
            });
        }

        let mut offset = INesHeader::SIZE;
        if header.has_trainer {
            offset += 512;
        }

        let prg_end = offset + header.prg_rom_size;
        let chr_end = prg_end + header.chr_rom_size;
        if bytes.len() < chr_end {
            return Err(INesError::Truncated {
                expected: chr_end,
                found: bytes.len(),
            });
        }
        if bytes.len() > chr_end {
            return Err(INesError::TrailingBytes {
                count: bytes.len() - chr_end,
            });
        }

        Ok(Cartridge {
            mapper: header.mapper,
            mirroring: header.mirroring,
            has_prg_ram: header.has_prg_ram,
            prg_rom: bytes[offset..prg_end].to_vec(),
            chr_rom: bytes[prg_end..chr_end].to_vec(),
        })
    }

    /// Read a byte of PRG-ROM by CPU offset (0 = $8000)
    ///
    /// 16 KiB cartridges mirror the single bank into the upper half, so
    /// the reset/NMI vectors at $FFFA-$FFFF resolve into the bank's tail.
    #[inline]
    pub fn read_prg(&self, offset: u16) -> u8 {
        self.prg_rom[offset as usize % self.prg_rom.len()]
    }

    /// Read a byte of CHR-ROM (pattern memory, $0000-$1FFF in PPU space)
    #[inline]
    pub fn read_chr(&self, addr: u16) -> u8 {
        self.chr_rom[addr as usize & (CHR_ROM_SIZE - 1)]
    }

    /// PRG-ROM length in bytes (16 KiB or 32 KiB)
    pub fn prg_len(&self) -> usize {
        self.prg_rom.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Assemble a minimal valid iNES image for tests
    fn build_ines(prg_banks: u8, flag6: u8, extra_trailing: usize) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"NES\x1a");
        bytes.push(prg_banks); // PRG banks
        bytes.push(1); // CHR banks
        bytes.push(flag6);
        bytes.extend_from_slice(&[0; 9]); // flag7..flag15
        bytes.extend(std::iter::repeat(0xEA).take(prg_banks as usize * PRG_BANK_SIZE));
        bytes.extend(std::iter::repeat(0x00).take(CHR_ROM_SIZE));
        bytes.extend(std::iter::repeat(0xFF).take(extra_trailing));
        bytes
    }

    #[test]
    fn test_load_16k_cartridge() {
        let cart = Cartridge::from_ines_bytes(&build_ines(1, 0, 0)).unwrap();
        assert_eq!(cart.mapper, 0);
        assert_eq!(cart.mirroring, Mirroring::Horizontal);
        assert_eq!(cart.prg_len(), PRG_BANK_SIZE);
    }

    #[test]
    fn test_load_32k_cartridge() {
        let cart = Cartridge::from_ines_bytes(&build_ines(2, 0x01, 0)).unwrap();
        assert_eq!(cart.mirroring, Mirroring::Vertical);
        assert_eq!(cart.prg_len(), 2 * PRG_BANK_SIZE);
    }

    #[test]
    fn test_prg_mirroring_for_16k() {
        let mut bytes = build_ines(1, 0, 0);
        // Last two bytes of the 16 KiB bank are the reset vector
        let prg_start = INesHeader::SIZE;
        bytes[prg_start + PRG_BANK_SIZE - 4] = 0x00;
        bytes[prg_start + PRG_BANK_SIZE - 3] = 0x90;
        let cart = Cartridge::from_ines_bytes(&bytes).unwrap();

        // $FFFC maps to offset 0x7FFC which mirrors down to 0x3FFC
        assert_eq!(cart.read_prg(0x7FFC), 0x00);
        assert_eq!(cart.read_prg(0x7FFD), 0x90);
        assert_eq!(cart.read_prg(0x3FFC), cart.read_prg(0x7FFC));
    }

    #[test]
    fn test_bad_magic_rejected() {
        let mut bytes = build_ines(1, 0, 0);
        bytes[0] = b'X';
        assert!(matches!(
            Cartridge::from_ines_bytes(&bytes),
            Err(INesError::BadMagic)
        ));
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let bytes = build_ines(1, 0, 7);
        assert!(matches!(
            Cartridge::from_ines_bytes(&bytes),
            Err(INesError::TrailingBytes { count: 7 })
        ));
    }

    #[test]
    fn test_truncated_rejected() {
        let mut bytes = build_ines(1, 0, 0);
        bytes.truncate(bytes.len() - 100);
        assert!(matches!(
            Cartridge::from_ines_bytes(&bytes),
            Err(INesError::Truncated { .. })
        ));
    }

    #[test]
    fn test_unsupported_mapper_rejected() {
        // Mapper 1 in the high nibble of flag 6
        let bytes = build_ines(1, 0x10, 0);
        assert!(matches!(
            Cartridge::from_ines_bytes(&bytes),
            Err(INesError::UnsupportedMapper { mapper: 1 })
        ));
    }

    #[test]
    fn test_trainer_is_skipped() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"NES\x1a");
        bytes.push(1);
        bytes.push(1);
        bytes.push(0x04); // trainer present
        bytes.extend_from_slice(&[0; 9]);
        bytes.extend(std::iter::repeat(0x55).take(512)); // trainer
        bytes.extend(std::iter::repeat(0xEA).take(PRG_BANK_SIZE));
        bytes.extend(std::iter::repeat(0x00).take(CHR_ROM_SIZE));

        let cart = Cartridge::from_ines_bytes(&bytes).unwrap();
        // PRG starts after the trainer, so the first PRG byte is 0xEA
        assert_eq!(cart.read_prg(0), 0xEA);
    }
}
