//! # Vanquisher Surface
//!
//! Framebuffer surfaces for the Vanquisher renderer.
//!
//! The renderer draws through the [`FramebufferSurface`] trait: a size query,
//! per-pixel plots, rectangle fills and an explicit `update` that makes the
//! pending writes visible. Two backends implement it:
//!
//! - **Windowed** (`windowed` feature): a GLFW window whose pixel buffer is
//!   presented through OpenGL
//! - **Headless**: an offscreen buffer pair with read-back, used by tests and
//!   for PNG snapshots
//!
//! ## Conventions
//!
//! - Origin is the top-left corner, x grows right and y grows down
//! - Colour channels are `f32` in `0.0..=255.0`, rounded to 8 bits on write
//! - Rectangles are half-open: `plot_rect((0, 0), (2, 2), ..)` fills 4 pixels
//! - Out-of-range coordinates are rejected, never clamped
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vanquisher_surface::prelude::*;
//!
//! fn main() -> Result<(), SurfaceError> {
//!     let config = DisplayConfig::default().with_size(320, 240);
//!     let mut surface = open_surface(&config)?;
//!
//!     surface.plot_rect((10, 10), (60, 40), Rgb::BLUE)?;
//!     surface.plot_pixel(0, 0, Rgb::RED)?;
//!     surface.update()?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod backend;
pub mod color;
pub mod config;
pub mod error;
pub mod framebuffer;
pub mod geometry;
pub mod logging;
pub mod surface;

#[cfg(test)]
mod tests;

pub use backend::{open_surface, BackendKind, HeadlessSurface};
#[cfg(feature = "windowed")]
pub use backend::WindowedSurface;
pub use color::Rgb;
pub use config::{Config, ConfigError, DisplayConfig};
pub use error::{SurfaceError, SurfaceResult};
pub use framebuffer::PixelBuffer;
pub use geometry::PixelRect;
pub use surface::{FramebufferSurface, SurfaceState};

/// Common imports for surface users
pub mod prelude {
    pub use crate::{
        backend::{open_surface, BackendKind, HeadlessSurface},
        color::Rgb,
        config::{Config, DisplayConfig},
        error::{SurfaceError, SurfaceResult},
        surface::FramebufferSurface,
    };
    #[cfg(feature = "windowed")]
    pub use crate::backend::WindowedSurface;
}
