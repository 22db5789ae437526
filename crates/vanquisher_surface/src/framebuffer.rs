//! CPU-side pixel storage shared by every surface backend

use crate::color::Rgb;
use crate::error::{SurfaceError, SurfaceResult};
use crate::geometry::{Corner, PixelRect};

/// Packed `0xAARRGGBB` value of opaque black
pub const CLEAR_PIXEL: u32 = 0xFF00_0000;

/// Largest pixel count a buffer may hold (8192 x 8192, 256 MiB)
pub const MAX_PIXELS: u64 = 8192 * 8192;

/// Pixel count of a `width` x `height` buffer, if it is within [`MAX_PIXELS`]
pub fn pixel_count(width: u32, height: u32) -> Option<usize> {
    u64::from(width)
        .checked_mul(u64::from(height))
        .filter(|&count| count <= MAX_PIXELS)
        .and_then(|count| usize::try_from(count).ok())
}

/// Row-major buffer of opaque `0xAARRGGBB` pixels with a top-left origin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl PixelBuffer {
    /// Allocate a black buffer
    ///
    /// Fails with `DisplayInit` when the size exceeds [`MAX_PIXELS`] or the
    /// allocation cannot be satisfied.
    pub fn new(width: u32, height: u32) -> SurfaceResult<Self> {
        let count = pixel_count(width, height).ok_or_else(|| {
            SurfaceError::DisplayInit(format!(
                "{width}x{height} pixel buffer exceeds the {MAX_PIXELS} pixel limit"
            ))
        })?;
        let mut pixels = Vec::new();
        pixels.try_reserve_exact(count).map_err(|e| {
            SurfaceError::DisplayInit(format!("cannot allocate {width}x{height} pixel buffer: {e}"))
        })?;
        pixels.resize(count, CLEAR_PIXEL);
        Ok(Self { width, height, pixels })
    }

    /// Buffer dimensions
    pub const fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Packed pixels, row-major
    pub fn as_slice(&self) -> &[u32] {
        &self.pixels
    }

    /// Packed pixels viewed as native-endian bytes, ready for upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Set one pixel; out-of-range coordinates are rejected
    pub fn plot_pixel(&mut self, x: i32, y: i32, rgb: Rgb) -> SurfaceResult<()> {
        let region = PixelRect::pixel(x, y);
        self.check_bounds(region)?;
        let packed = rgb.to_packed()?;
        let index = self.index(x as u32, y as u32);
        self.pixels[index] = packed;
        Ok(())
    }

    /// Fill the half-open rectangle spanned by two corners in any order
    ///
    /// A zero-area rectangle is a no-op. A rectangle that does not fit the
    /// buffer is rejected and nothing is drawn.
    pub fn plot_rect(&mut self, corner1: Corner, corner2: Corner, rgb: Rgb) -> SurfaceResult<()> {
        let rect = PixelRect::from_corners(corner1, corner2);
        if rect.is_empty() {
            return Ok(());
        }
        self.check_bounds(rect)?;
        let packed = rgb.to_packed()?;
        self.fill(rect, packed);
        Ok(())
    }

    /// Fill the whole buffer with one colour
    pub fn clear(&mut self, rgb: Rgb) -> SurfaceResult<()> {
        let packed = rgb.to_packed()?;
        self.pixels.fill(packed);
        Ok(())
    }

    /// Read a pixel back, `None` when out of range
    pub fn get(&self, x: i32, y: i32) -> Option<Rgb> {
        if !PixelRect::pixel(x, y).fits_within(self.width, self.height) {
            return None;
        }
        Some(Rgb::from_packed(self.pixels[self.index(x as u32, y as u32)]))
    }

    /// Change dimensions, keeping the overlapping top-left region
    ///
    /// Newly exposed pixels are black. On allocation failure the buffer is
    /// left unchanged.
    pub fn resize(&mut self, width: u32, height: u32) -> SurfaceResult<()> {
        if (width, height) == self.size() {
            return Ok(());
        }
        let mut resized = Self::new(width, height)?;
        let copy_width = self.width.min(width) as usize;
        for row in 0..self.height.min(height) {
            let src = self.index(0, row);
            let dst = resized.index(0, row);
            resized.pixels[dst..dst + copy_width]
                .copy_from_slice(&self.pixels[src..src + copy_width]);
        }
        *self = resized;
        Ok(())
    }

    /// Copy another buffer's contents, adopting its dimensions
    pub fn copy_from(&mut self, other: &Self) {
        self.width = other.width;
        self.height = other.height;
        self.pixels.clone_from(&other.pixels);
    }

    fn check_bounds(&self, region: PixelRect) -> SurfaceResult<()> {
        if region.fits_within(self.width, self.height) {
            Ok(())
        } else {
            Err(SurfaceError::OutOfBounds {
                region,
                width: self.width,
                height: self.height,
            })
        }
    }

    fn fill(&mut self, rect: PixelRect, packed: u32) {
        let x0 = rect.x as u32;
        let span = rect.width as usize;
        for row in rect.y as u32..rect.y as u32 + rect.height {
            let start = self.index(x0, row);
            self.pixels[start..start + span].fill(packed);
        }
    }

    const fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}
