// Window host - winit event loop + pixels surface around a Console
//
// Hotkeys: F5 saves to the current slot, F7 loads it, F12 takes a
// screenshot, and the digit row selects the slot.

use std::sync::Arc;
use std::time::{Duration, Instant};

use pixels::{Pixels, SurfaceTexture};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use super::framebuffer::FrameBuffer;
use super::keyboard::{KeyboardMapping, KeyboardState};
use crate::apu::constants::TICKS_IN_FRAME;
use crate::emulator::{save_screenshot, Console, EmulatorConfig};

#[cfg(feature = "audio")]
use crate::audio::AudioOutput;

/// Window configuration
#[derive(Debug, Clone, Copy)]
pub struct WindowConfig {
    /// Integer scale factor
    pub scale: u32,

    /// Pace frames to 60 Hz instead of rendering as fast as possible
    pub vsync: bool,
}

impl WindowConfig {
    pub fn from_emulator_config(config: &EmulatorConfig) -> Self {
        WindowConfig {
            scale: config.video.scale.clamp(1, 8),
            vsync: config.video.vsync,
        }
    }

    fn window_width(&self) -> u32 {
        Console::WIDTH as u32 * self.scale
    }

    fn window_height(&self) -> u32 {
        Console::HEIGHT as u32 * self.scale
    }

    fn frame_duration(&self) -> Duration {
        Duration::from_micros(1_000_000 / Console::FPS as u64)
    }
}

struct DisplayWindow {
    console: Console,
    config: WindowConfig,
    emulator_config: EmulatorConfig,
    window: Option<Arc<Window>>,
    pixels: Option<Pixels<'static>>,
    frame_buffer: FrameBuffer,
    audio_buffer: Vec<i16>,
    mapping: KeyboardMapping,
    keyboard: KeyboardState,
    last_frame_time: Instant,
    #[cfg(feature = "audio")]
    audio: Option<AudioOutput>,
}

impl DisplayWindow {
    fn new(console: Console, emulator_config: EmulatorConfig) -> Self {
        let config = WindowConfig::from_emulator_config(&emulator_config);

        #[cfg(feature = "audio")]
        let audio = if emulator_config.audio.enabled {
            match AudioOutput::new(&emulator_config.audio) {
                Ok(output) => Some(output),
                Err(e) => {
                    log::warn!("audio disabled: {}", e);
                    None
                }
            }
        } else {
            None
        };

        DisplayWindow {
            console,
            config,
            emulator_config,
            window: None,
            pixels: None,
            frame_buffer: FrameBuffer::new(),
            audio_buffer: vec![0; TICKS_IN_FRAME],
            mapping: KeyboardMapping::default(),
            keyboard: KeyboardState::new(),
            last_frame_time: Instant::now(),
            #[cfg(feature = "audio")]
            audio,
        }
    }

    /// Advance the console one frame and present it
    fn run_frame(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.console.set_input(self.keyboard.held());
        self.console
            .advance_one_frame(self.frame_buffer.pixels_mut(), &mut self.audio_buffer)?;

        #[cfg(feature = "audio")]
        if let Some(audio) = &self.audio {
            audio.push_frame(&self.audio_buffer);
        }

        if let Some(pixels) = &mut self.pixels {
            self.frame_buffer.write_rgba(pixels.frame_mut());
            pixels.render()?;
        }
        Ok(())
    }

    fn handle_hotkey(&mut self, key: KeyCode) {
        match key {
            KeyCode::F5 => {
                if let Err(e) = self.console.save_state() {
                    log::error!("save state failed: {}", e);
                }
            }
            KeyCode::F7 => {
                if let Err(e) = self.console.load_state() {
                    log::error!("load state failed: {}", e);
                }
            }
            KeyCode::F12 => {
                let dir = std::path::PathBuf::from(&self.emulator_config.paths.screenshot_dir);
                if let Err(e) = save_screenshot(self.frame_buffer.pixels(), &dir, None) {
                    log::error!("screenshot failed: {}", e);
                }
            }
            _ => {
                if let Some(slot) = digit_for(key) {
                    self.console.set_current_slot(slot);
                    log::info!("save slot {}", slot);
                }
            }
        }
    }

    fn should_run_frame(&mut self) -> bool {
        if !self.config.vsync {
            self.last_frame_time = Instant::now();
            return true;
        }
        if self.last_frame_time.elapsed() >= self.config.frame_duration() {
            self.last_frame_time = Instant::now();
            true
        } else {
            false
        }
    }
}

fn digit_for(key: KeyCode) -> Option<u8> {
    match key {
        KeyCode::Digit0 => Some(0),
        KeyCode::Digit1 => Some(1),
        KeyCode::Digit2 => Some(2),
        KeyCode::Digit3 => Some(3),
        KeyCode::Digit4 => Some(4),
        KeyCode::Digit5 => Some(5),
        KeyCode::Digit6 => Some(6),
        KeyCode::Digit7 => Some(7),
        KeyCode::Digit8 => Some(8),
        KeyCode::Digit9 => Some(9),
        _ => None,
    }
}

impl ApplicationHandler for DisplayWindow {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title("famicore")
            .with_inner_size(LogicalSize::new(
                self.config.window_width(),
                self.config.window_height(),
            ))
            .with_resizable(false);

        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("window creation failed: {}", e);
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        let surface = SurfaceTexture::new(size.width, size.height, window.clone());
        match Pixels::new(Console::WIDTH as u32, Console::HEIGHT as u32, surface) {
            Ok(pixels) => {
                self.window = Some(window);
                self.pixels = Some(pixels);
            }
            Err(e) => {
                log::error!("pixel surface creation failed: {}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state,
                        repeat,
                        ..
                    },
                ..
            } => match state {
                ElementState::Pressed => {
                    self.keyboard.press(&self.mapping, key);
                    if !repeat {
                        self.handle_hotkey(key);
                    }
                }
                ElementState::Released => self.keyboard.release(&self.mapping, key),
            },
            WindowEvent::RedrawRequested => {
                if self.should_run_frame() {
                    if let Err(e) = self.run_frame() {
                        log::error!("frame failed: {}", e);
                        event_loop.exit();
                        return;
                    }
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// Run the windowed host until the user closes it
pub fn run_display(
    console: Console,
    config: EmulatorConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut display = DisplayWindow::new(console, config);
    event_loop.run_app(&mut display)?;
    Ok(())
}
