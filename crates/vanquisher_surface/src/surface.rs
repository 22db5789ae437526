//! The framebuffer surface capability
//!
//! This module defines the trait the renderer draws through. Every backend
//! (windowed, headless, or a test double) implements it, and the renderer
//! holds it as `&mut dyn FramebufferSurface` or as a generic parameter.

use crate::color::Rgb;
use crate::error::SurfaceResult;
use crate::geometry::Corner;

/// Lifecycle of a surface
///
/// A surface is `Open` from successful construction until its window is
/// closed (by the user or the windowing system). Dropping the surface
/// disposes of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SurfaceState {
    /// Usable
    #[default]
    Open,
    /// Window closed or handle invalid; every operation fails
    Closed,
}

/// A drawable pixel target with an explicit flush to the display
///
/// # Conventions
/// - Origin is the top-left corner, x grows right, y grows down
/// - Colours use channels in `0.0..=255.0` (see [`Rgb`])
/// - Writes become visible only after [`update`](Self::update)
///
/// # Thread Safety
/// All methods must be invoked from the thread that constructed the surface.
/// Windowing libraries require display calls on a single designated thread;
/// the windowed backend is `!Send` so the compiler enforces this.
pub trait FramebufferSurface {
    /// Current pixel dimensions of the drawable area
    ///
    /// Reflects the live size, so an external resize is visible immediately.
    /// Sizes are in framebuffer pixels, which on HiDPI displays exceed the
    /// window size in screen coordinates. A minimized window reports `(0, 0)`
    /// and rejects every non-empty plot until it is restored.
    /// Fails with `DisplayUpdate` once the surface is closed.
    fn get_size(&self) -> SurfaceResult<(u32, u32)>;

    /// Set the pixel at `(x, y)`
    ///
    /// Coordinates outside `[0, width) × [0, height)` fail with `OutOfBounds`.
    fn plot_pixel(&mut self, x: i32, y: i32, rgb: Rgb) -> SurfaceResult<()>;

    /// Fill the axis-aligned rectangle spanned by two corners
    ///
    /// Corners may come in any order. The rectangle is half-open: it covers
    /// `[min_x, max_x) × [min_y, max_y)`, so equal corners draw nothing.
    /// A non-empty rectangle that does not fit the surface fails with
    /// `OutOfBounds` and draws nothing.
    fn plot_rect(&mut self, corner1: Corner, corner2: Corner, rgb: Rgb) -> SurfaceResult<()>;

    /// Make pending writes visible
    ///
    /// May block briefly when the display waits for vertical sync. Fails
    /// with `DisplayUpdate` when the window was closed or became invalid.
    fn update(&mut self) -> SurfaceResult<()>;

    /// Whether the surface is still open
    fn is_open(&self) -> bool;
}

impl<S: FramebufferSurface + ?Sized> FramebufferSurface for Box<S> {
    fn get_size(&self) -> SurfaceResult<(u32, u32)> {
        (**self).get_size()
    }

    fn plot_pixel(&mut self, x: i32, y: i32, rgb: Rgb) -> SurfaceResult<()> {
        (**self).plot_pixel(x, y, rgb)
    }

    fn plot_rect(&mut self, corner1: Corner, corner2: Corner, rgb: Rgb) -> SurfaceResult<()> {
        (**self).plot_rect(corner1, corner2, rgb)
    }

    fn update(&mut self) -> SurfaceResult<()> {
        (**self).update()
    }

    fn is_open(&self) -> bool {
        (**self).is_open()
    }
}
