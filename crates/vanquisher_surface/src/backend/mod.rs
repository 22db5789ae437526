//! Surface backends
//!
//! ```text
//! ┌─────────────────────────────────┐
//! │     Renderer                    │
//! └─────────────┬───────────────────┘
//!               │ draws through
//!      ┌────────▼───────────┐
//!      │ FramebufferSurface │ ← trait (surface.rs)
//!      └────────┬───────────┘
//!               │ implemented by
//!   ┌───────────▼───────────┐
//!   │ WindowedSurface       │ ← GLFW window + GL blit (windowed.rs)
//!   │ HeadlessSurface       │ ← offscreen buffers (headless.rs)
//!   └───────────────────────┘
//! ```
//!
//! [`open_surface`] picks the backend named by [`DisplayConfig::backend`].

mod headless;
#[cfg(feature = "windowed")]
mod windowed;

pub use headless::HeadlessSurface;
#[cfg(feature = "windowed")]
pub use windowed::WindowedSurface;

use serde::{Deserialize, Serialize};

use crate::config::DisplayConfig;
use crate::error::{SurfaceError, SurfaceResult};
use crate::geometry::PixelRect;
use crate::surface::FramebufferSurface;

/// Which backend [`open_surface`] creates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// A GLFW window (requires the `windowed` feature)
    #[default]
    Windowed,
    /// An offscreen buffer pair
    Headless,
}

/// Open the backend selected by `config`
pub fn open_surface(config: &DisplayConfig) -> SurfaceResult<Box<dyn FramebufferSurface>> {
    log::debug!("Opening {:?} surface {}x{}", config.backend, config.width, config.height);
    match config.backend {
        BackendKind::Headless => Ok(Box::new(HeadlessSurface::new(config)?)),
        BackendKind::Windowed => open_windowed(config),
    }
}

#[cfg(feature = "windowed")]
fn open_windowed(config: &DisplayConfig) -> SurfaceResult<Box<dyn FramebufferSurface>> {
    Ok(Box::new(WindowedSurface::new(config)?))
}

#[cfg(not(feature = "windowed"))]
fn open_windowed(_config: &DisplayConfig) -> SurfaceResult<Box<dyn FramebufferSurface>> {
    Err(SurfaceError::DisplayInit(
        "windowed backend not available: built without the `windowed` feature".to_string(),
    ))
}

/// Shared guard: reject configurations before touching any library
fn validated(config: &DisplayConfig) -> SurfaceResult<&DisplayConfig> {
    config.validate().map_err(SurfaceError::DisplayInit)?;
    Ok(config)
}

/// Shared guard: plots against a zero-sized drawable area (minimized window)
///
/// Bounds follow what `get_size` reports, so no pixel fits a 0x0 surface
/// while empty rectangles stay no-ops. Pending content is kept for restore.
fn reject_while_minimized(region: PixelRect, (width, height): (u32, u32)) -> SurfaceResult<()> {
    if (width == 0 || height == 0) && !region.is_empty() {
        return Err(SurfaceError::OutOfBounds { region, width, height });
    }
    Ok(())
}
