//!
//! SDL2 presentation layer.
//!
//! **Supported:**
//! - Fullscreen-desktop window (or a fixed-size window with `--windowed`)
//! - Per-tick full-frame upload and continuous redraw
//! - Quit handling (window close, Escape key)
//!
//! **NOT Supported (by design):**
//! - Dirty-rectangle optimization (every presented frame is re-uploaded)
//! - Multi-display policy (the window opens on the default display)
//! - Gamma correction or scanline effects
//!
//! SDL2 must be initialized on the main thread; the [`Display`] is owned by
//! the render thread and never shared.

pub mod scaler;

pub use scaler::FrameScaler;

use sdl2::{
    event::Event,
    keyboard::Keycode,
    pixels::{Color, PixelFormatEnum},
    render::{Canvas, TextureAccess},
    video::Window,
    EventPump,
};

use crate::error::{FaceError, Result};
use crate::library::Frame;

/// Pixel format matching RGBA8 byte order in memory.
#[cfg(target_endian = "big")]
const PIXEL_FORMAT: PixelFormatEnum = PixelFormatEnum::RGBA8888;

#[cfg(target_endian = "little")]
const PIXEL_FORMAT: PixelFormatEnum = PixelFormatEnum::ABGR8888;

/// Window size used in `--windowed` development mode.
const WINDOWED_WIDTH: u32 = 800;
const WINDOWED_HEIGHT: u32 = 480;

/// Fullscreen output surface for expression frames.
pub struct Display {
    canvas: Canvas<Window>,
    event_pump: EventPump,
    scaler: FrameScaler,
    width: u32,
    height: u32,
}

impl Display {
    /// Initialize SDL2 and open the output window.
    pub fn open(windowed: bool) -> Result<Self> {
        let sdl_context = sdl2::init()
            .map_err(|e| FaceError::Display(format!("SDL2 init: {}", e)))?;
        let video_subsystem = sdl_context
            .video()
            .map_err(|e| FaceError::Display(format!("Video subsystem: {}", e)))?;

        tracing::info!(
            driver = video_subsystem.current_video_driver(),
            "SDL2 video initialized"
        );

        let title = format!("Robot Face v{}", env!("CARGO_PKG_VERSION"));
        let mut window_builder = video_subsystem.window(&title, WINDOWED_WIDTH, WINDOWED_HEIGHT);
        if windowed {
            window_builder.position_centered();
        } else {
            window_builder.fullscreen_desktop();
        }

        let window = window_builder
            .build()
            .map_err(|e| FaceError::Display(format!("Window creation failed: {}", e)))?;

        let event_pump = sdl_context
            .event_pump()
            .map_err(|e| FaceError::Display(format!("Event pump: {}", e)))?;

        let canvas = window
            .into_canvas()
            .accelerated()
            .build()
            .map_err(|e| FaceError::Display(format!("Renderer creation failed: {}", e)))?;

        let (width, height) = canvas
            .output_size()
            .map_err(|e| FaceError::Display(format!("Output size: {}", e)))?;
        tracing::info!(width, height, "Output surface ready");

        sdl_context.mouse().show_cursor(false);

        Ok(Self {
            canvas,
            event_pump,
            scaler: FrameScaler::new(width, height),
            width,
            height,
        })
    }

    /// Output surface dimensions in pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Drain pending window events. Returns true if an exit was requested
    /// (window close or Escape).
    pub fn poll_quit(&mut self) -> bool {
        let mut quit = false;
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => quit = true,
                Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => quit = true,
                _ => {}
            }
        }
        quit
    }

    /// Clear to black, scale `frame` to the full output surface, and
    /// present it. The frame is re-scaled and re-uploaded every call even
    /// when the underlying bitmap did not change.
    pub fn present(&mut self, frame: &Frame) -> Result<()> {
        self.canvas.set_draw_color(Color::RGB(0, 0, 0));
        self.canvas.clear();

        let pixels = self
            .scaler
            .scale(frame.width(), frame.height(), frame.pixels())
            .ok_or_else(|| FaceError::Display("Frame scaling failed".to_string()))?;

        // Texture is recreated per frame and dropped automatically; the
        // creator must outlive it.
        let texture_creator = self.canvas.texture_creator();
        let mut texture = texture_creator
            .create_texture(PIXEL_FORMAT, TextureAccess::Streaming, self.width, self.height)
            .map_err(|e| FaceError::Display(format!("Texture creation: {}", e)))?;

        let pitch = self.width as usize * 4;
        texture
            .update(None, pixels, pitch)
            .map_err(|e| FaceError::Display(format!("Texture update: {}", e)))?;

        self.canvas
            .copy(&texture, None, None)
            .map_err(|e| FaceError::Display(format!("Render copy: {}", e)))?;

        self.canvas.present();
        Ok(())
    }
}
