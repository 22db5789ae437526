//! Offscreen surface backend
//!
//! Keeps a pending buffer that plots write into and a visible buffer that
//! `update` publishes to. Read-back, resize and close hooks let tests drive
//! the same scenarios a real window goes through.

use std::path::Path;

use super::{reject_while_minimized, validated};
use crate::color::Rgb;
use crate::config::DisplayConfig;
use crate::error::{SurfaceError, SurfaceResult};
use crate::framebuffer::PixelBuffer;
use crate::geometry::{Corner, PixelRect};
use crate::surface::{FramebufferSurface, SurfaceState};

/// Framebuffer surface backed by memory only
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    pending: PixelBuffer,
    visible: PixelBuffer,
    state: SurfaceState,
    minimized: bool,
    frames: u64,
}

impl HeadlessSurface {
    /// Create a surface of the configured size
    ///
    /// Window-only settings (title, fullscreen, vsync) are ignored.
    pub fn new(config: &DisplayConfig) -> SurfaceResult<Self> {
        let config = validated(config)?;
        log::debug!("Creating headless surface {}x{}", config.width, config.height);
        Ok(Self {
            pending: PixelBuffer::new(config.width, config.height)?,
            visible: PixelBuffer::new(config.width, config.height)?,
            state: SurfaceState::Open,
            minimized: false,
            frames: 0,
        })
    }

    /// Read a pixel from the visible buffer
    ///
    /// Returns `None` for out-of-range coordinates. Writes show up here only
    /// after `update`.
    pub fn read_pixel(&self, x: i32, y: i32) -> Option<Rgb> {
        self.visible.get(x, y)
    }

    /// The visible buffer
    pub const fn visible(&self) -> &PixelBuffer {
        &self.visible
    }

    /// Number of frames published by `update`
    pub const fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Simulate an external resize of the drawable area
    ///
    /// Both buffers keep their overlapping region, as a window would. A size
    /// beyond the pixel limit fails with `DisplayInit` and changes nothing.
    pub fn resize(&mut self, width: u32, height: u32) -> SurfaceResult<()> {
        let mut pending = self.pending.clone();
        pending.resize(width, height)?;
        self.visible.resize(width, height)?;
        self.pending = pending;
        log::debug!("Headless surface resized to {width}x{height}");
        Ok(())
    }

    /// Simulate the window being minimized or restored
    ///
    /// While minimized the surface reports a 0x0 size, rejects plots and
    /// skips publishing on `update`; buffer contents survive the restore.
    pub fn set_minimized(&mut self, minimized: bool) {
        log::debug!("Headless surface minimized: {minimized}");
        self.minimized = minimized;
    }

    fn drawable_size(&self) -> (u32, u32) {
        if self.minimized {
            (0, 0)
        } else {
            self.pending.size()
        }
    }

    /// Simulate the window being closed
    pub fn close(&mut self) {
        log::debug!("Headless surface closed after {} frames", self.frames);
        self.state = SurfaceState::Closed;
    }

    /// Current lifecycle state
    pub const fn state(&self) -> SurfaceState {
        self.state
    }

    /// Write the visible buffer to a PNG file
    pub fn save_png(&self, path: impl AsRef<Path>) -> SurfaceResult<()> {
        let (width, height) = self.visible.size();
        let image = image::RgbImage::from_fn(width, height, |x, y| {
            let [_, r, g, b] = self.visible.as_slice()[(y * width + x) as usize].to_be_bytes();
            image::Rgb([r, g, b])
        });
        image.save(path.as_ref())?;
        log::info!("Saved {}x{} snapshot to {}", width, height, path.as_ref().display());
        Ok(())
    }

    fn ensure_open(&self) -> SurfaceResult<()> {
        match self.state {
            SurfaceState::Open => Ok(()),
            SurfaceState::Closed => Err(SurfaceError::closed()),
        }
    }
}

impl FramebufferSurface for HeadlessSurface {
    fn get_size(&self) -> SurfaceResult<(u32, u32)> {
        self.ensure_open()?;
        Ok(self.drawable_size())
    }

    fn plot_pixel(&mut self, x: i32, y: i32, rgb: Rgb) -> SurfaceResult<()> {
        self.ensure_open()?;
        reject_while_minimized(PixelRect::pixel(x, y), self.drawable_size())?;
        self.pending.plot_pixel(x, y, rgb)
    }

    fn plot_rect(&mut self, corner1: Corner, corner2: Corner, rgb: Rgb) -> SurfaceResult<()> {
        self.ensure_open()?;
        reject_while_minimized(PixelRect::from_corners(corner1, corner2), self.drawable_size())?;
        self.pending.plot_rect(corner1, corner2, rgb)
    }

    fn update(&mut self) -> SurfaceResult<()> {
        self.ensure_open()?;
        if self.minimized {
            return Ok(());
        }
        self.visible.copy_from(&self.pending);
        self.frames += 1;
        log::trace!("Headless surface presented frame {}", self.frames);
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.state == SurfaceState::Open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface(width: u32, height: u32) -> HeadlessSurface {
        HeadlessSurface::new(&DisplayConfig::default().with_size(width, height)).unwrap()
    }

    #[test]
    fn test_zero_size_is_init_error() {
        let err = HeadlessSurface::new(&DisplayConfig::default().with_size(0, 10)).unwrap_err();
        assert!(matches!(err, SurfaceError::DisplayInit(_)));
    }

    #[test]
    fn test_frame_count_and_state() {
        let mut surface = surface(4, 4);
        assert_eq!(surface.state(), SurfaceState::Open);
        surface.update().unwrap();
        surface.update().unwrap();
        assert_eq!(surface.frame_count(), 2);

        surface.close();
        assert_eq!(surface.state(), SurfaceState::Closed);
        assert!(surface.update().is_err());
        assert_eq!(surface.frame_count(), 2);
    }

    #[test]
    fn test_resize_keeps_visible_content() {
        let mut surface = surface(4, 4);
        surface.plot_pixel(0, 0, Rgb::RED).unwrap();
        surface.update().unwrap();

        surface.resize(8, 2).unwrap();
        assert_eq!(surface.get_size().unwrap(), (8, 2));
        assert_eq!(surface.read_pixel(0, 0), Some(Rgb::RED));
        assert_eq!(surface.read_pixel(7, 1), Some(Rgb::BLACK));
        assert_eq!(surface.read_pixel(0, 3), None);
    }

    #[test]
    fn test_oversized_config_is_init_error() {
        let config = DisplayConfig::default().with_size(i32::MAX as u32, i32::MAX as u32);
        let err = HeadlessSurface::new(&config).unwrap_err();
        assert!(matches!(err, SurfaceError::DisplayInit(_)));
    }

    #[test]
    fn test_oversized_resize_is_rejected() {
        let mut surface = surface(4, 4);
        let err = surface.resize(i32::MAX as u32, i32::MAX as u32).unwrap_err();
        assert!(matches!(err, SurfaceError::DisplayInit(_)));
        assert_eq!(surface.get_size().unwrap(), (4, 4));
    }

    #[test]
    fn test_minimized_surface_skips_publishing() {
        let mut surface = surface(4, 4);
        surface.plot_pixel(1, 1, Rgb::RED).unwrap();
        surface.set_minimized(true);
        surface.update().unwrap();
        assert_eq!(surface.frame_count(), 0);
        assert_eq!(surface.read_pixel(1, 1), Some(Rgb::BLACK));

        surface.set_minimized(false);
        surface.update().unwrap();
        assert_eq!(surface.read_pixel(1, 1), Some(Rgb::RED));
    }

    #[test]
    fn test_save_png_round_trips_pixels() {
        let mut surface = surface(3, 2);
        surface.plot_pixel(2, 1, Rgb::new(1.0, 2.0, 3.0)).unwrap();
        surface.update().unwrap();

        let path = std::env::temp_dir().join(format!("vanquisher_{}_snapshot.png", std::process::id()));
        surface.save_png(&path).unwrap();
        let image = image::open(&path).unwrap().to_rgb8();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(image.dimensions(), (3, 2));
        assert_eq!(image.get_pixel(2, 1).0, [1, 2, 3]);
        assert_eq!(image.get_pixel(0, 0).0, [0, 0, 0]);
    }
}
