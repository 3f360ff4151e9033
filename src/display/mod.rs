mod pixel_buffer;

#[allow(unused_imports)]
pub use pixel_buffer::{pack_rgba, unpack_rgba, PixelBuffer};

use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::{Window, WindowContext};
use sdl2::EventPump;

pub const DEFAULT_WIDTH: u32 = 640;
pub const DEFAULT_HEIGHT: u32 = 480;

/// Streaming texture format whose in-memory byte order matches the
/// PixelBuffer layout (R, G, B, A per pixel). SDL names its packed formats
/// by numeric layout, so the right name depends on target endianness.
#[cfg(target_endian = "little")]
const TEXTURE_FORMAT: PixelFormatEnum = PixelFormatEnum::ABGR8888;
#[cfg(target_endian = "big")]
const TEXTURE_FORMAT: PixelFormatEnum = PixelFormatEnum::RGBA8888;

/// Error for a missing or unusable drawing surface (SDL init, video
/// subsystem, or window creation failed). Fatal: there is no fallback
/// surface to draw on.
fn canvas_not_found(detail: impl std::fmt::Display) -> String {
    format!("canvas not found: {}", detail)
}

/// Error for a surface that exists but cannot render (canvas or streaming
/// texture creation failed). Fatal: there is no fallback rendering path.
fn context_unsupported(detail: impl std::fmt::Display) -> String {
    format!("2D context not supported: {}", detail)
}

pub struct Display {
    canvas: Canvas<Window>,
    event_pump: EventPump,
    width: u32,
    height: u32,
}

pub struct RenderTarget<'a> {
    texture: Texture<'a>,
    width: u32,
    height: u32,
}

#[derive(Debug, Clone)]
pub enum InputEvent {
    Quit,
    KeyDown(Keycode),
}

impl Display {
    /// Create display with VSync enabled (default, 60fps locked)
    pub fn new(title: &str) -> Result<(Self, TextureCreator<WindowContext>), String> {
        Self::with_options(title, DEFAULT_WIDTH, DEFAULT_HEIGHT, true)
    }

    /// Create display with custom resolution and VSync settings.
    /// Each acquisition step is checked immediately; the first failure
    /// aborts with a descriptive error before anything is drawn.
    pub fn with_options(
        title: &str,
        width: u32,
        height: u32,
        vsync: bool,
    ) -> Result<(Self, TextureCreator<WindowContext>), String> {
        let sdl_context = sdl2::init().map_err(canvas_not_found)?;
        let video_subsystem = sdl_context.video().map_err(canvas_not_found)?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .build()
            .map_err(canvas_not_found)?;

        let mut canvas_builder = window.into_canvas().accelerated();
        if vsync {
            canvas_builder = canvas_builder.present_vsync();
        }
        let canvas = canvas_builder.build().map_err(context_unsupported)?;

        let texture_creator = canvas.texture_creator();
        let event_pump = sdl_context.event_pump().map_err(canvas_not_found)?;

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

    /// Blit the whole buffer onto the surface at origin (0, 0) and flip.
    /// One atomic presentation step; the buffer itself is untouched, so
    /// presenting the same buffer again shows the same picture.
    pub fn present(
        &mut self,
        target: &mut RenderTarget,
        buffer: &PixelBuffer,
    ) -> Result<(), String> {
        target
            .texture
            .update(None, buffer.as_bytes(), (buffer.width() * 4) as usize)
            .map_err(|e| e.to_string())?;

        self.canvas.copy(&target.texture, None, None)?;
        self.canvas.present();
        Ok(())
    }

    pub fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();

        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => events.push(InputEvent::Quit),
                Event::KeyDown {
                    keycode: Some(k), ..
                } => events.push(InputEvent::KeyDown(k)),
                _ => {},
            }
        }

        events
    }
}

impl<'a> RenderTarget<'a> {
    /// Create render target with default resolution
    pub fn new(texture_creator: &'a TextureCreator<WindowContext>) -> Result<Self, String> {
        Self::with_size(texture_creator, DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }

    /// Create render target with custom resolution
    pub fn with_size(
        texture_creator: &'a TextureCreator<WindowContext>,
        width: u32,
        height: u32,
    ) -> Result<Self, String> {
        let texture = texture_creator
            .create_texture_streaming(TEXTURE_FORMAT, width, height)
            .map_err(context_unsupported)?;
        Ok(Self {
            texture,
            width,
            height,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_surface_is_fatal_and_named() {
        let err = canvas_not_found("no available video device");
        assert!(err.contains("canvas not found"));
        assert!(err.contains("no available video device"));
    }

    #[test]
    fn test_unsupported_context_is_named() {
        let err = context_unsupported("renderer creation failed");
        assert!(err.contains("2D context not supported"));
    }

    #[test]
    fn test_texture_format_is_four_bytes_per_pixel() {
        assert_eq!(TEXTURE_FORMAT.byte_size_per_pixel(), 4);
    }
}
