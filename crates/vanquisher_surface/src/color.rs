//! RGB colours as accepted by framebuffer surfaces
//!
//! Channels are `f32` values in `0.0..=255.0`. Surfaces store 8 bits per
//! channel, so every write is rounded to the nearest integer; a colour with
//! integral channels reads back unchanged. Values outside the range (or NaN)
//! are rejected with [`SurfaceError::InvalidColor`] rather than clamped.

use crate::error::{SurfaceError, SurfaceResult};

/// Upper bound of a colour channel
pub const CHANNEL_MAX: f32 = 255.0;

const OPAQUE: u32 = 0xFF00_0000;

/// RGB colour with channels in `0.0..=255.0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
}

impl Rgb {
    /// Black
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    /// White
    pub const WHITE: Self = Self::new(255.0, 255.0, 255.0);
    /// Pure red
    pub const RED: Self = Self::new(255.0, 0.0, 0.0);
    /// Pure green
    pub const GREEN: Self = Self::new(0.0, 255.0, 0.0);
    /// Pure blue
    pub const BLUE: Self = Self::new(0.0, 0.0, 255.0);

    /// Create a colour from channels in `0.0..=255.0`
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create a colour from normalized channels in `0.0..=1.0`
    pub fn from_unit(r: f32, g: f32, b: f32) -> Self {
        Self::new(r * CHANNEL_MAX, g * CHANNEL_MAX, b * CHANNEL_MAX)
    }

    /// Normalized channels in `0.0..=1.0`
    pub fn to_unit(self) -> (f32, f32, f32) {
        (self.r / CHANNEL_MAX, self.g / CHANNEL_MAX, self.b / CHANNEL_MAX)
    }

    /// Check that every channel is finite and within `0.0..=255.0`
    pub fn validate(self) -> SurfaceResult<()> {
        for (channel, value) in [('r', self.r), ('g', self.g), ('b', self.b)] {
            if !value.is_finite() || !(0.0..=CHANNEL_MAX).contains(&value) {
                return Err(SurfaceError::InvalidColor { channel, value });
            }
        }
        Ok(())
    }

    /// Quantize to 8-bit channels
    pub fn to_rgb8(self) -> SurfaceResult<[u8; 3]> {
        self.validate()?;
        Ok([quantize(self.r), quantize(self.g), quantize(self.b)])
    }

    /// Quantize and pack as opaque `0xAARRGGBB`
    pub fn to_packed(self) -> SurfaceResult<u32> {
        let [r, g, b] = self.to_rgb8()?;
        Ok(OPAQUE | (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b))
    }

    /// Unpack a `0xAARRGGBB` pixel, ignoring alpha
    pub fn from_packed(pixel: u32) -> Self {
        let [_, r, g, b] = pixel.to_be_bytes();
        Self::new(f32::from(r), f32::from(g), f32::from(b))
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<(f32, f32, f32)> for Rgb {
    fn from((r, g, b): (f32, f32, f32)) -> Self {
        Self::new(r, g, b)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(f32::from(r), f32::from(g), f32::from(b))
    }
}

fn quantize(value: f32) -> u8 {
    value.round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_packed_layout() {
        let packed = Rgb::new(0x12 as f32, 0x34 as f32, 0x56 as f32).to_packed().unwrap();
        assert_eq!(packed, 0xFF12_3456);
        assert_eq!(Rgb::from_packed(packed), Rgb::new(18.0, 52.0, 86.0));
    }

    #[test]
    fn test_quantization_rounds_to_nearest() {
        assert_eq!(Rgb::new(10.4, 10.5, 254.6).to_rgb8().unwrap(), [10, 11, 255]);
    }

    #[test]
    fn test_out_of_range_channels_rejected() {
        let err = Rgb::new(0.0, 256.0, 0.0).validate().unwrap_err();
        assert!(matches!(err, SurfaceError::InvalidColor { channel: 'g', .. }));

        let err = Rgb::new(-1.0, 0.0, 0.0).to_packed().unwrap_err();
        assert!(matches!(err, SurfaceError::InvalidColor { channel: 'r', .. }));

        assert!(Rgb::new(0.0, 0.0, f32::NAN).validate().is_err());
        assert!(Rgb::new(f32::INFINITY, 0.0, 0.0).validate().is_err());
    }

    #[test]
    fn test_range_edges_accepted() {
        assert!(Rgb::BLACK.validate().is_ok());
        assert!(Rgb::WHITE.validate().is_ok());
    }

    #[test]
    fn test_unit_conversion() {
        let color = Rgb::from_unit(1.0, 0.5, 0.0);
        assert_relative_eq!(color.r, 255.0);
        assert_relative_eq!(color.g, 127.5);
        assert_relative_eq!(color.b, 0.0);

        let (r, g, b) = color.to_unit();
        assert_relative_eq!(r, 1.0);
        assert_relative_eq!(g, 0.5);
        assert_relative_eq!(b, 0.0);
    }
}
