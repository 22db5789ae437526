//! Surface demo application
//!
//! Opens a framebuffer surface and draws a colour-band test pattern with a
//! red top-left and green bottom-right marker pixel.
//!
//! ```text
//! surface_demo [CONFIG] [--headless <OUT.png>]
//! ```
//!
//! With `--headless` a single frame is rendered offscreen and written to
//! `OUT.png`; otherwise a window is opened and redrawn until it is closed.

use std::path::{Path, PathBuf};

use clap::Parser;
use thiserror::Error;
use vanquisher_surface::prelude::*;
use vanquisher_surface::ConfigError;

#[derive(Error, Debug)]
enum DemoError {
    #[error(transparent)]
    Surface(#[from] SurfaceError),

    #[error("Failed to load display config: {0}")]
    Config(#[from] ConfigError),
}

/// Draw a test pattern on a framebuffer surface
#[derive(Parser, Debug)]
#[command(name = "surface_demo", version)]
struct Args {
    /// Display config file (.toml or .ron)
    config: Option<PathBuf>,

    /// Render one frame offscreen and save it as a PNG
    #[arg(long, value_name = "OUT.png")]
    headless: Option<PathBuf>,
}

const BANDS: [Rgb; 6] = [
    Rgb::new(255.0, 255.0, 255.0),
    Rgb::new(255.0, 255.0, 0.0),
    Rgb::new(0.0, 255.0, 255.0),
    Rgb::new(0.0, 255.0, 0.0),
    Rgb::new(255.0, 0.0, 255.0),
    Rgb::new(0.0, 0.0, 255.0),
];

/// Draw one frame sized to the surface's current dimensions
///
/// A minimized window reports a zero size; the frame is skipped.
fn draw_pattern(surface: &mut dyn FramebufferSurface) -> SurfaceResult<()> {
    let (width, height) = surface.get_size()?;
    if width == 0 || height == 0 {
        log::trace!("Surface minimized, skipping frame");
        return Ok(());
    }
    let (width, height) = (width as i32, height as i32);

    let band_count = BANDS.len() as i32;
    for (i, color) in (0..).zip(BANDS) {
        let left = width * i / band_count;
        let right = width * (i + 1) / band_count;
        surface.plot_rect((right, height * 2 / 3), (left, 0), color)?;
    }

    // Grey ramp along the bottom third
    for x in 0..width {
        let level = if width > 1 { 255.0 * x as f32 / (width - 1) as f32 } else { 0.0 };
        surface.plot_rect((x, height * 2 / 3), (x + 1, height), Rgb::new(level, level, level))?;
    }

    surface.plot_pixel(0, 0, Rgb::RED)?;
    surface.plot_pixel(width - 1, height - 1, Rgb::GREEN)?;
    Ok(())
}

fn run_headless(config: &DisplayConfig, output: &Path) -> Result<(), DemoError> {
    let mut surface = HeadlessSurface::new(config)?;
    draw_pattern(&mut surface)?;
    surface.update()?;
    surface.save_png(output)?;
    Ok(())
}

fn run_windowed(config: &DisplayConfig) -> Result<(), DemoError> {
    let mut surface = open_surface(config)?;
    let mut frames = 0u64;

    while surface.is_open() {
        let frame = draw_pattern(&mut surface).and_then(|()| surface.update());
        match frame {
            Ok(()) => frames += 1,
            Err(SurfaceError::DisplayUpdate(reason)) => {
                log::info!("Surface closed: {}", reason);
                break;
            }
            Err(e) => return Err(e.into()),
        }
    }

    log::info!("Presented {} frames", frames);
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    vanquisher_surface::logging::init_with_level(log::LevelFilter::Info);

    log::info!("Starting Vanquisher surface demo");

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => {
            log::info!("Loading display config from {}", path.display());
            DisplayConfig::load_from_file(path).map_err(DemoError::from)?
        }
        None => DisplayConfig::default().with_title("Vanquisher - Surface Demo"),
    };

    let result = if let Some(output) = &args.headless {
        run_headless(&config, output)
    } else {
        run_windowed(&config)
    };

    match result {
        Ok(()) => {
            log::info!("Surface demo completed successfully");
            Ok(())
        }
        Err(e) => {
            log::error!("Surface demo failed: {}", e);
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        let args =
            Args::try_parse_from(["surface_demo", "display.toml", "--headless", "out.png"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("display.toml")));
        assert_eq!(args.headless, Some(PathBuf::from("out.png")));

        let args = Args::try_parse_from(["surface_demo"]).unwrap();
        assert!(args.config.is_none());
        assert!(args.headless.is_none());

        assert!(Args::try_parse_from(["surface_demo", "--headless"]).is_err());
        assert!(Args::try_parse_from(["surface_demo", "--fast"]).is_err());
        assert!(Args::try_parse_from(["surface_demo", "a.toml", "b.toml"]).is_err());
    }

    #[test]
    fn test_args_definition() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[test]
    fn test_pattern_markers() {
        let config = DisplayConfig::default().with_size(64, 48);
        let mut surface = HeadlessSurface::new(&config).unwrap();
        draw_pattern(&mut surface).unwrap();
        surface.update().unwrap();

        assert_eq!(surface.read_pixel(0, 0), Some(Rgb::RED));
        assert_eq!(surface.read_pixel(63, 47), Some(Rgb::GREEN));
        assert_eq!(surface.read_pixel(63, 0), Some(BANDS[5]));
        assert_eq!(surface.read_pixel(12, 10), Some(BANDS[1]));
    }

    #[test]
    fn test_minimized_surface_skips_frame() {
        let config = DisplayConfig::default().with_size(64, 48);
        let mut surface = HeadlessSurface::new(&config).unwrap();
        surface.set_minimized(true);

        draw_pattern(&mut surface).unwrap();
        surface.update().unwrap();
        assert_eq!(surface.frame_count(), 0);

        surface.set_minimized(false);
        surface.update().unwrap();
        assert_eq!(surface.frame_count(), 1);
        assert_eq!(surface.read_pixel(0, 0), Some(Rgb::BLACK));
    }
}
