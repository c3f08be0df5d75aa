//! SDL2 window, renderer, and input plumbing.
//!
//! Effects never touch SDL directly: they draw into a `PixelBuffer` and
//! the runtime presents it through `Display`. This keeps the whole
//! effect library runnable headless in tests.

mod font;
mod pixel_buffer;

pub use font::{
    draw_char_scaled, draw_text, draw_text_centered, draw_text_scaled, render_text, text_width,
    text_width_scaled, GLYPH_HEIGHT, GLYPH_WIDTH,
};
pub use pixel_buffer::PixelBuffer;

use sdl2::event::Event;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas, Texture as SdlTexture, TextureCreator};
use sdl2::video::{Window, WindowContext};
use sdl2::EventPump;

use crate::error::{Error, Result};

/// Fallback viewport when not fullscreen
pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 600;

/// Platform events the runtime cares about, already reduced to the exit
/// policy's vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    KeyDown,
    MouseDown,
    MouseMove,
}

pub struct Display {
    canvas: Canvas<Window>,
    event_pump: EventPump,
    width: u32,
    height: u32,
}

pub struct RenderTarget<'a> {
    texture: SdlTexture<'a>,
}

impl Display {
    /// Create the window. Fullscreen uses the desktop resolution; windowed
    /// falls back to 800x600.
    pub fn open(title: &str, fullscreen: bool) -> Result<(Self, TextureCreator<WindowContext>)> {
        let sdl_context = sdl2::init().map_err(Error::InitFailure)?;
        let video = sdl_context.video().map_err(Error::InitFailure)?;

        let (width, height) = if fullscreen {
            match video.desktop_display_mode(0) {
                Ok(mode) => (mode.w as u32, mode.h as u32),
                Err(_) => (DEFAULT_WIDTH, DEFAULT_HEIGHT),
            }
        } else {
            (DEFAULT_WIDTH, DEFAULT_HEIGHT)
        };

        let mut builder = video.window(title, width, height);
        if fullscreen {
            builder.fullscreen_desktop();
        } else {
            builder.position_centered();
        }
        let window = builder.build().map_err(|e| Error::InitFailure(e.to_string()))?;

        let canvas = window
            .into_canvas()
            .accelerated()
            .build()
            .map_err(|e| Error::InitFailure(e.to_string()))?;

        let texture_creator = canvas.texture_creator();
        let event_pump = sdl_context.event_pump().map_err(Error::InitFailure)?;

        Ok((
            Self {
                canvas,
                event_pump,
                width,
                height,
            },
            texture_creator,
        ))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Drain pending events, non-blocking
    pub fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();

        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => events.push(InputEvent::Quit),
                Event::KeyDown { .. } => events.push(InputEvent::KeyDown),
                Event::MouseButtonDown { .. } => events.push(InputEvent::MouseDown),
                Event::MouseMotion { .. } => events.push(InputEvent::MouseMove),
                _ => {},
            }
        }

        events
    }

    pub fn present(&mut self, target: &mut RenderTarget, buffer: &PixelBuffer) -> Result<()> {
        target
            .texture
            .update(None, buffer.as_bytes(), (buffer.width() * 4) as usize)
            .map_err(|e| Error::InitFailure(e.to_string()))?;

        self.canvas
            .copy(&target.texture, None, None)
            .map_err(Error::InitFailure)?;
        self.canvas.present();
        Ok(())
    }
}

impl<'a> RenderTarget<'a> {
    pub fn with_size(
        texture_creator: &'a TextureCreator<WindowContext>,
        width: u32,
        height: u32,
    ) -> Result<Self> {
        let texture = texture_creator
            .create_texture_streaming(PixelFormatEnum::RGBA8888, width, height)
            .map_err(|e| Error::InitFailure(e.to_string()))?;
        Ok(Self { texture })
    }
}
