//! Pixel-space rectangles
//!
//! Surfaces take rectangles as two arbitrary corners while the pixel buffer
//! fills by origin plus extent. [`PixelRect::from_corners`] owns that
//! conversion: corners are sorted per axis and the result is half-open, so
//! it covers `[min_x, max_x) × [min_y, max_y)`.

use std::fmt;

/// A pixel coordinate pair `(x, y)`
pub type Corner = (i32, i32);

/// Axis-aligned rectangle in pixel space, top-left origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelRect {
    /// Left edge (inclusive)
    pub x: i32,
    /// Top edge (inclusive)
    pub y: i32,
    /// Extent along x
    pub width: u32,
    /// Extent along y
    pub height: u32,
}

impl PixelRect {
    /// Create a rectangle from its origin and extent
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// The 1x1 rectangle covering a single pixel
    pub const fn pixel(x: i32, y: i32) -> Self {
        Self::new(x, y, 1, 1)
    }

    /// Build the half-open rectangle spanned by two corners given in any order
    pub fn from_corners(a: Corner, b: Corner) -> Self {
        let (x0, x1) = (a.0.min(b.0), a.0.max(b.0));
        let (y0, y1) = (a.1.min(b.1), a.1.max(b.1));
        Self::new(x0, y0, x0.abs_diff(x1), y0.abs_diff(y1))
    }

    /// Whether the rectangle covers no pixels
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Exclusive right edge
    pub fn right(&self) -> i64 {
        i64::from(self.x) + i64::from(self.width)
    }

    /// Exclusive bottom edge
    pub fn bottom(&self) -> i64 {
        i64::from(self.y) + i64::from(self.height)
    }

    /// Whether the rectangle lies entirely inside a `width` x `height` surface
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.right() <= i64::from(width)
            && self.bottom() <= i64::from(height)
    }

    /// Whether `(x, y)` lies inside the rectangle
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x
            && y >= self.y
            && i64::from(x) < self.right()
            && i64::from(y) < self.bottom()
    }
}

impl fmt::Display for PixelRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) {}x{}", self.x, self.y, self.width, self.height)
    }
}
