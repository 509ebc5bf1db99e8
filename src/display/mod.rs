// Display module - windowed host
//
// Presents the console's 224x256 frame through winit + pixels and feeds
// keyboard state back in as controller input.

mod framebuffer;
mod keyboard;
mod window;

pub use framebuffer::FrameBuffer;
pub use keyboard::KeyboardMapping;
pub use window::{run_display, WindowConfig};
