// Screenshots
//
// Dumps the last composited frame as an RGBA PNG.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::ppu::constants::{FRAME_HEIGHT, FRAME_WIDTH};

/// Errors from screenshot operations
#[derive(Debug)]
pub enum ScreenshotError {
    /// I/O error
    Io(io::Error),

    /// PNG encoding error
    PngEncoding(png::EncodingError),
}

impl fmt::Display for ScreenshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScreenshotError::Io(e) => write!(f, "I/O error: {}", e),
            ScreenshotError::PngEncoding(e) => write!(f, "PNG encoding error: {}", e),
        }
    }
}

impl std::error::Error for ScreenshotError {}

impl From<io::Error> for ScreenshotError {
    fn from(e: io::Error) -> Self {
        ScreenshotError::Io(e)
    }
}

impl From<png::EncodingError> for ScreenshotError {
    fn from(e: png::EncodingError) -> Self {
        ScreenshotError::PngEncoding(e)
    }
}

/// Save a 224x256 frame as a PNG under `directory`
///
/// The file is named from the ROM stem and a local timestamp, e.g.
/// `smb_2024-01-01_12-30-00.png`.
pub fn save_screenshot(
    frame: &[u32],
    directory: &Path,
    rom_path: Option<&Path>,
) -> Result<PathBuf, ScreenshotError> {
    assert_eq!(frame.len(), FRAME_WIDTH * FRAME_HEIGHT);
    fs::create_dir_all(directory)?;

    let stem = rom_path
        .and_then(|p| p.file_stem())
        .and_then(|s| s.to_str())
        .unwrap_or("frame");
    let timestamp = chrono::Local::now().format("%Y-%m-%d_%H-%M-%S");
    let path = directory.join(format!("{}_{}.png", stem, timestamp));

    let file = fs::File::create(&path)?;
    let mut encoder = png::Encoder::new(
        io::BufWriter::new(file),
        FRAME_WIDTH as u32,
        FRAME_HEIGHT as u32,
    );
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);

    let mut bytes = Vec::with_capacity(frame.len() * 4);
    for &pixel in frame {
        bytes.extend_from_slice(&pixel.to_le_bytes());
    }

    let mut writer = encoder.write_header()?;
    writer.write_image_data(&bytes)?;

    log::info!("saved screenshot to {:?}", path);
    Ok(path)
}
