// Allow unused code for designed-but-not-yet-used APIs
// Remove these as the codebase matures
#![allow(dead_code)]

mod display;

use display::{
    pack_rgba, Display, InputEvent, PixelBuffer, RenderTarget, DEFAULT_HEIGHT, DEFAULT_WIDTH,
};
use sdl2::keyboard::Keycode;

/// Where the one pixel goes, matching the classic canvas demo
const PIXEL_X: u32 = 100;
const PIXEL_Y: u32 = 100;

/// Plot a single opaque red pixel through the packed u32 view.
///
/// This is the whole point of the exercise: the buffer's bytes reinterpreted
/// as one packed integer per pixel, addressed row-major as y * width + x,
/// with the color built from named channels instead of an endian-dependent
/// literal.
fn plot_first_pixel(buffer: &mut PixelBuffer) {
    let width = buffer.width();
    if PIXEL_X < width && PIXEL_Y < buffer.height() {
        let idx = (PIXEL_Y * width + PIXEL_X) as usize;
        buffer.as_packed_mut()[idx] = pack_rgba(255, 0, 0, 255);
    }
}

/// Parse command line arguments and return (width, height, vsync)
fn parse_args() -> (u32, u32, bool) {
    let args: Vec<String> = std::env::args().collect();
    let mut width = DEFAULT_WIDTH;
    let mut height = DEFAULT_HEIGHT;
    let mut vsync = true;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--no-vsync" => vsync = false,
            "--width" | "-w" => {
                if i + 1 < args.len() {
                    if let Ok(w) = args[i + 1].parse::<u32>() {
                        width = w;
                    }
                    i += 1;
                }
            },
            "--height" | "-h" => {
                if i + 1 < args.len() {
                    if let Ok(h) = args[i + 1].parse::<u32>() {
                        height = h;
                    }
                    i += 1;
                }
            },
            "--resolution" | "-r" => {
                if i + 1 < args.len() {
                    // Parse WxH format (e.g., 1920x1080)
                    let parts: Vec<&str> = args[i + 1].split('x').collect();
                    if parts.len() == 2 {
                        if let (Ok(w), Ok(h)) = (parts[0].parse::<u32>(), parts[1].parse::<u32>()) {
                            width = w;
                            height = h;
                        }
                    }
                    i += 1;
                }
            },
            "--help" => {
                println!("Usage: retro [OPTIONS]");
                println!();
                println!("Options:");
                println!(
                    "  --width W, -w W       Set window width (default: {})",
                    DEFAULT_WIDTH
                );
                println!(
                    "  --height H, -h H      Set window height (default: {})",
                    DEFAULT_HEIGHT
                );
                println!("  --resolution WxH, -r WxH  Set resolution (e.g., 1920x1080)");
                println!("  --no-vsync            Disable VSync");
                println!("  --help                Show this help message");
                std::process::exit(0);
            },
            _ => {},
        }
        i += 1;
    }

    (width, height, vsync)
}

fn main() -> Result<(), String> {
    let (width, height, vsync) = parse_args();

    // Acquire the surface and its 2D rendering capability up front; either
    // failure aborts before any drawing happens.
    let (mut display, texture_creator) = Display::with_options("retro", width, height, vsync)?;
    let mut target = RenderTarget::with_size(&texture_creator, width, height)?;

    // Fresh buffer matching the surface, opaque black background, one pixel
    let mut buffer = PixelBuffer::with_size(width, height);
    buffer.clear(0, 0, 0);
    plot_first_pixel(&mut buffer);

    println!("=== retro ===");
    println!("Resolution: {}x{}", width, height);
    println!(
        "One red pixel at ({}, {}). Escape or close the window to quit.",
        PIXEL_X, PIXEL_Y
    );

    'main: loop {
        for event in display.poll_events() {
            match event {
                InputEvent::Quit | InputEvent::KeyDown(Keycode::Escape) => break 'main,
                InputEvent::KeyDown(_) => {},
            }
        }

        // The buffer never changes after the one write above; re-presenting
        // it each frame just keeps the window contents valid.
        display.present(&mut target, &buffer)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::unpack_rgba;

    #[test]
    fn test_plot_writes_exactly_one_red_pixel() {
        let mut buffer = PixelBuffer::with_size(DEFAULT_WIDTH, DEFAULT_HEIGHT);
        plot_first_pixel(&mut buffer);

        let expected_idx = (PIXEL_Y * DEFAULT_WIDTH + PIXEL_X) as usize;
        for (idx, &packed) in buffer.as_packed().iter().enumerate() {
            if idx == expected_idx {
                assert_eq!(unpack_rgba(packed), (0xFF, 0x00, 0x00, 0xFF));
            } else {
                assert_eq!(packed, 0, "pixel {} was touched", idx);
            }
        }
    }

    #[test]
    fn test_plot_is_skipped_on_a_too_small_surface() {
        // A surface smaller than the target coordinate stays untouched,
        // mirroring how a typed-array store out of range is dropped
        let mut buffer = PixelBuffer::with_size(64, 64);
        plot_first_pixel(&mut buffer);
        assert!(buffer.as_packed().iter().all(|&p| p == 0));
    }
}
