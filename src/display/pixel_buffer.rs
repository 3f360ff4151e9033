use super::{DEFAULT_HEIGHT, DEFAULT_WIDTH};

// ============================================================================
// Channel Packing
// ============================================================================

/// Pack named channel values into a single 4-byte pixel.
///
/// The returned integer's bytes, in memory order, are exactly `[r, g, b, a]`
/// on every platform. On little-endian targets the numeric form therefore
/// reads alpha:blue:green:red from high bits to low: opaque pure red is
/// `0xFF0000FF`. Always pack through this function rather than a hard-coded
/// literal so the memory layout stays R,G,B,A regardless of endianness.
#[inline]
pub fn pack_rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
    u32::from_ne_bytes([r, g, b, a])
}

/// Split a packed pixel back into its (r, g, b, a) channel values.
#[inline]
pub fn unpack_rgba(packed: u32) -> (u8, u8, u8, u8) {
    let [r, g, b, a] = packed.to_ne_bytes();
    (r, g, b, a)
}

// ============================================================================
// PixelBuffer
// ============================================================================

/// RGBA8888 pixel buffer for software rendering.
///
/// Storage is one packed `u32` per pixel, row-major: the pixel at (x, y)
/// lives at linear index `y * width + x`. The same allocation is visible two
/// ways: as packed pixels through `as_packed`, and as raw channel bytes
/// (R, G, B, A per pixel, in that memory order) through `as_bytes`. Both
/// views alias the same memory; switching between them never copies.
pub struct PixelBuffer {
    pixels: Vec<u32>,
    width: u32,
    height: u32,
}

impl PixelBuffer {
    /// Create a new pixel buffer with default resolution (640x480)
    pub fn new() -> Self {
        Self::with_size(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }

    /// Create a new pixel buffer with custom resolution.
    /// All pixels start zeroed (transparent black).
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![0; (width * height) as usize],
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels (not bytes) in the buffer
    #[inline]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Check if coordinates are within bounds
    #[inline]
    fn in_bounds(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    /// Linear index for the pixel at (x, y). Advancing y skips whole rows,
    /// advancing x moves within a row.
    #[inline]
    fn pixel_index(&self, x: u32, y: u32) -> usize {
        (y * self.width + x) as usize
    }

    /// The packed pixel view: one u32 per pixel, row-major
    #[inline]
    pub fn as_packed(&self) -> &[u32] {
        &self.pixels
    }

    #[inline]
    pub fn as_packed_mut(&mut self) -> &mut [u32] {
        &mut self.pixels
    }

    /// The channel-byte view of the same memory: 4 bytes per pixel in
    /// R, G, B, A order, `4 * width * height` bytes total.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        // Safety: u8 has no alignment requirement and the slice covers
        // exactly the pixel allocation (4 bytes per u32). The borrow of
        // self keeps the Vec alive for the slice's lifetime.
        unsafe {
            std::slice::from_raw_parts(self.pixels.as_ptr() as *const u8, self.pixels.len() * 4)
        }
    }

    #[inline]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        // Safety: same as as_bytes(), and the mutable borrow of self
        // guarantees exclusive access.
        unsafe {
            std::slice::from_raw_parts_mut(
                self.pixels.as_mut_ptr() as *mut u8,
                self.pixels.len() * 4,
            )
        }
    }

    /// Write a packed pixel (bounds checked). Writes outside the buffer are
    /// ignored; in particular a write at (width, y) never spills into the
    /// first column of row y + 1.
    #[inline]
    pub fn set_packed(&mut self, x: u32, y: u32, packed: u32) {
        if self.in_bounds(x, y) {
            let idx = self.pixel_index(x, y);
            self.pixels[idx] = packed;
        }
    }

    /// Read a packed pixel (bounds checked)
    /// Returns None if coordinates are out of bounds
    #[inline]
    pub fn get_packed(&self, x: u32, y: u32) -> Option<u32> {
        if self.in_bounds(x, y) {
            Some(self.pixels[self.pixel_index(x, y)])
        } else {
            None
        }
    }

    /// Set a single pixel from named channel values (bounds checked)
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8, a: u8) {
        self.set_packed(x, y, pack_rgba(r, g, b, a));
    }

    /// Read all 4 channels of a pixel (bounds checked)
    /// Returns (r, g, b, a) or None if out of bounds
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<(u8, u8, u8, u8)> {
        self.get_packed(x, y).map(unpack_rgba)
    }

    /// Clear to a solid opaque color in one u32 fill
    pub fn clear(&mut self, r: u8, g: u8, b: u8) {
        self.pixels.fill(pack_rgba(r, g, b, 255));
    }
}

impl Default for PixelBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocation_matches_dimensions() {
        let buffer = PixelBuffer::with_size(17, 9);
        assert_eq!(buffer.len(), 17 * 9);
        assert_eq!(buffer.as_bytes().len(), 17 * 9 * 4);
        // Fresh buffer is transparent black
        assert!(buffer.as_packed().iter().all(|&p| p == 0));
    }

    #[test]
    fn test_pack_is_rgba_in_memory() {
        let red = pack_rgba(0xFF, 0x00, 0x00, 0xFF);
        assert_eq!(red.to_ne_bytes(), [0xFF, 0x00, 0x00, 0xFF]);
        assert_eq!(unpack_rgba(red), (0xFF, 0x00, 0x00, 0xFF));
    }

    #[cfg(target_endian = "little")]
    #[test]
    fn test_opaque_red_literal_on_little_endian() {
        // The canvas-style ABGR literal only holds on little-endian,
        // which is why packing goes through named channels
        assert_eq!(pack_rgba(0xFF, 0x00, 0x00, 0xFF), 0xFF00_00FF);
    }

    #[test]
    fn test_write_touches_only_its_four_bytes() {
        let mut buffer = PixelBuffer::with_size(8, 4);
        buffer.set_pixel(3, 2, 0xFF, 0x00, 0x00, 0xFF);

        let offset = 4 * (2 * 8 + 3);
        for (i, &byte) in buffer.as_bytes().iter().enumerate() {
            if i >= offset && i < offset + 4 {
                continue;
            }
            assert_eq!(byte, 0, "byte {} changed by a write at (3, 2)", i);
        }
        assert_eq!(
            &buffer.as_bytes()[offset..offset + 4],
            &[0xFF, 0x00, 0x00, 0xFF]
        );
    }

    #[test]
    fn test_packed_and_byte_views_alias() {
        let mut buffer = PixelBuffer::with_size(4, 4);

        // Write through the packed view, read through the bytes
        buffer.as_packed_mut()[5] = pack_rgba(1, 2, 3, 4);
        assert_eq!(&buffer.as_bytes()[20..24], &[1, 2, 3, 4]);

        // Write through the bytes, read through the packed view
        buffer.as_bytes_mut()[0..4].copy_from_slice(&[9, 8, 7, 6]);
        assert_eq!(buffer.get_pixel(0, 0), Some((9, 8, 7, 6)));
    }

    #[test]
    fn test_last_pixel_is_addressable() {
        let mut buffer = PixelBuffer::with_size(8, 4);
        buffer.set_packed(7, 3, pack_rgba(0, 0xFF, 0, 0xFF));
        let last = buffer.len() - 1;
        assert_eq!(buffer.as_packed()[last], pack_rgba(0, 0xFF, 0, 0xFF));
        assert_eq!(buffer.get_packed(7, 3), Some(pack_rgba(0, 0xFF, 0, 0xFF)));
    }

    #[test]
    fn test_row_edge_write_does_not_wrap() {
        let mut buffer = PixelBuffer::with_size(8, 4);
        // (8, 0) is out of bounds; its naive linear index 0 * 8 + 8 would
        // alias pixel (0, 1). It must be rejected instead.
        buffer.set_packed(8, 0, 0xDEAD_BEEF);
        assert_eq!(buffer.get_packed(0, 1), Some(0));
        assert!(buffer.as_packed().iter().all(|&p| p == 0));
        assert_eq!(buffer.get_packed(8, 0), None);
    }

    #[test]
    fn test_clear_fills_opaque() {
        let mut buffer = PixelBuffer::with_size(3, 3);
        buffer.clear(10, 20, 30);
        for y in 0..3 {
            for x in 0..3 {
                assert_eq!(buffer.get_pixel(x, y), Some((10, 20, 30, 255)));
            }
        }
    }
}
