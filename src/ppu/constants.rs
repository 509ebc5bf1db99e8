//! PPU dimensions and layout constants

/// Visible frame width in pixels
pub const FRAME_WIDTH: usize = 256;

/// Visible frame height in pixels (240 minus the 8 cropped scanlines at the
/// top and bottom, matching what a period CRT actually showed)
pub const FRAME_HEIGHT: usize = 224;

/// Scanlines cropped off the top (and bottom) of the raw 240-line image
pub const CROPPED_ROWS: usize = 8;

/// One logical nametable: 32x30 tiles plus the attribute table
pub const NAMETABLE_SIZE: usize = 0x400;

/// Physical nametable RAM (two banks)
pub const VRAM_SIZE: usize = 2 * NAMETABLE_SIZE;

/// Offset of the attribute table within a nametable
pub const ATTRIBUTE_OFFSET: u16 = 0x3C0;

/// Tile cache width: two nametables side by side (2 x 256 pixels)
pub const CACHE_WIDTH: usize = 512;

/// Tile cache height: two nametables stacked (2 x 240 pixels)
pub const CACHE_HEIGHT: usize = 480;

/// Tile columns across the cache (2 x 32)
pub const TILE_COLS: u8 = 64;

/// Visible tile rows per nametable (rows 30/31 hold attributes, not tiles)
pub const VISIBLE_TILE_ROWS: u8 = 30;

/// OAM size in bytes (64 sprites x 4 bytes)
pub const OAM_SIZE: usize = 256;

/// Palette RAM size in bytes
pub const PALETTE_SIZE: usize = 32;
