//! Surface error types

use thiserror::Error;

use crate::geometry::PixelRect;

/// Errors reported by framebuffer surfaces
#[derive(Error, Debug)]
pub enum SurfaceError {
    /// The window or offscreen surface could not be created
    #[error("Display initialization failed: {0}")]
    DisplayInit(String),

    /// A pixel or rectangle lies outside the current surface bounds
    #[error("Region {region} lies outside the {width}x{height} surface")]
    OutOfBounds {
        /// Offending region; a single pixel is reported as a 1x1 region
        region: PixelRect,
        /// Surface width at the time of the call
        width: u32,
        /// Surface height at the time of the call
        height: u32,
    },

    /// The window was closed or its handle became invalid
    #[error("Display update failed: {0}")]
    DisplayUpdate(String),

    /// A colour channel is not a finite value in `0.0..=255.0`
    #[error("Colour channel {channel} has invalid value {value} (expected 0.0..=255.0)")]
    InvalidColor {
        /// Channel name (`r`, `g` or `b`)
        channel: char,
        /// Rejected value
        value: f32,
    },

    /// Writing a snapshot image failed
    #[error("Snapshot failed: {0}")]
    Snapshot(#[from] image::ImageError),
}

impl SurfaceError {
    /// Error returned by every operation on a closed surface
    pub(crate) fn closed() -> Self {
        Self::DisplayUpdate("surface has been closed".to_string())
    }
}

/// Result type for surface operations
pub type SurfaceResult<T> = Result<T, SurfaceError>;
