//! Windowed surface using GLFW
//!
//! Plots land in a CPU [`PixelBuffer`]. `update` pumps GLFW events, uploads
//! the buffer into a texture and blits it to the window's default
//! framebuffer, flipping vertically so the surface keeps a top-left origin
//! while GL's is bottom-left.

#![allow(unsafe_code)]

use glfw::Context as _;
use glow::HasContext;

use super::{reject_while_minimized, validated};
use crate::color::Rgb;
use crate::config::DisplayConfig;
use crate::error::{SurfaceError, SurfaceResult};
use crate::framebuffer::PixelBuffer;
use crate::geometry::{Corner, PixelRect};
use crate::surface::{FramebufferSurface, SurfaceState};

/// Texture plus read framebuffer used to present the pixel buffer
struct Presenter {
    texture: glow::Texture,
    framebuffer: glow::Framebuffer,
}

impl Presenter {
    fn new(gl: &glow::Context, pixels: &PixelBuffer) -> Result<Self, String> {
        unsafe {
            let texture = gl.create_texture()?;
            gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, glow::NEAREST as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::NEAREST as i32);
            upload(gl, pixels);

            let framebuffer = gl.create_framebuffer()?;
            gl.bind_framebuffer(glow::READ_FRAMEBUFFER, Some(framebuffer));
            gl.framebuffer_texture_2d(
                glow::READ_FRAMEBUFFER,
                glow::COLOR_ATTACHMENT0,
                glow::TEXTURE_2D,
                Some(texture),
                0,
            );
            let status = gl.check_framebuffer_status(glow::READ_FRAMEBUFFER);
            gl.bind_framebuffer(glow::READ_FRAMEBUFFER, None);
            gl.bind_texture(glow::TEXTURE_2D, None);

            if status != glow::FRAMEBUFFER_COMPLETE {
                gl.delete_framebuffer(framebuffer);
                gl.delete_texture(texture);
                return Err(format!("staging framebuffer incomplete (status {status:#x})"));
            }

            Ok(Self { texture, framebuffer })
        }
    }

    fn present(&self, gl: &glow::Context, pixels: &PixelBuffer) -> Result<(), String> {
        let (width, height) = pixels.size();
        let (width, height) = (width as i32, height as i32);
        unsafe {
            gl.bind_texture(glow::TEXTURE_2D, Some(self.texture));
            upload(gl, pixels);
            gl.bind_texture(glow::TEXTURE_2D, None);

            gl.bind_framebuffer(glow::READ_FRAMEBUFFER, Some(self.framebuffer));
            gl.bind_framebuffer(glow::DRAW_FRAMEBUFFER, None);
            gl.blit_framebuffer(
                0,
                0,
                width,
                height,
                0,
                height,
                width,
                0,
                glow::COLOR_BUFFER_BIT,
                glow::NEAREST,
            );
            gl.bind_framebuffer(glow::READ_FRAMEBUFFER, None);

            match gl.get_error() {
                glow::NO_ERROR => Ok(()),
                code => Err(format!("GL error {code:#x} while presenting")),
            }
        }
    }

    fn destroy(&self, gl: &glow::Context) {
        unsafe {
            gl.delete_framebuffer(self.framebuffer);
            gl.delete_texture(self.texture);
        }
    }
}

/// Upload the buffer into the bound `TEXTURE_2D`
///
/// `BGRA` with `UNSIGNED_INT_8_8_8_8_REV` reads each `0xAARRGGBB` word
/// regardless of host endianness.
unsafe fn upload(gl: &glow::Context, pixels: &PixelBuffer) {
    let (width, height) = pixels.size();
    gl.tex_image_2d(
        glow::TEXTURE_2D,
        0,
        glow::RGBA8 as i32,
        width as i32,
        height as i32,
        0,
        glow::BGRA,
        glow::UNSIGNED_INT_8_8_8_8_REV,
        Some(pixels.as_bytes()),
    );
}

/// Framebuffer surface drawing into a GLFW window
///
/// Owns the window, its GL context and the pending pixel buffer from
/// construction until drop. The type is `!Send`: every call must come from
/// the thread that created it.
pub struct WindowedSurface {
    glfw: glfw::Glfw,
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
    gl: glow::Context,
    presenter: Presenter,
    pixels: PixelBuffer,
    state: SurfaceState,
}

impl WindowedSurface {
    /// Open a window as described by `config`
    ///
    /// Fails with `DisplayInit` when the configuration is unusable, GLFW
    /// cannot initialize (no display server), the window cannot be created,
    /// or the GL presentation objects cannot be allocated.
    pub fn new(config: &DisplayConfig) -> SurfaceResult<Self> {
        let config = validated(config)?;
        log::info!(
            "Creating {}x{} window \"{}\" (fullscreen: {}, vsync: {})",
            config.width,
            config.height,
            config.title,
            config.fullscreen,
            config.vsync
        );

        // Errors are logged rather than panicking inside the C callback, so
        // init and create_window report failure through their return values.
        let mut glfw = glfw::init(glfw::log_errors)
            .map_err(|e| SurfaceError::DisplayInit(format!("GLFW initialization failed: {e:?}")))?;

        glfw.window_hint(glfw::WindowHint::ContextVersion(3, 3));
        glfw.window_hint(glfw::WindowHint::OpenGlProfile(glfw::OpenGlProfileHint::Core));
        glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true));
        glfw.window_hint(glfw::WindowHint::Resizable(config.resizable));
        glfw.window_hint(glfw::WindowHint::Decorated(config.decorated));

        let created = if config.fullscreen {
            glfw.with_primary_monitor(|glfw, monitor| {
                let mode = monitor.map_or(glfw::WindowMode::Windowed, |m| glfw::WindowMode::FullScreen(m));
                glfw.create_window(config.width, config.height, &config.title, mode)
            })
        } else {
            glfw.create_window(config.width, config.height, &config.title, glfw::WindowMode::Windowed)
        };
        let (mut window, events) = created
            .ok_or_else(|| SurfaceError::DisplayInit("window creation failed".to_string()))?;

        window.make_current();
        window.set_close_polling(true);
        window.set_framebuffer_size_polling(true);
        glfw.set_swap_interval(if config.vsync {
            glfw::SwapInterval::Sync(1)
        } else {
            glfw::SwapInterval::None
        });

        let gl = unsafe {
            glow::Context::from_loader_function(|name| window.get_proc_address(name) as *const _)
        };

        let (width, height) = window.get_framebuffer_size();
        let pixels = PixelBuffer::new(width.max(1) as u32, height.max(1) as u32)?;
        let presenter = Presenter::new(&gl, &pixels)
            .map_err(|e| SurfaceError::DisplayInit(format!("GL setup failed: {e}")))?;
        log::debug!("Window framebuffer is {}x{}", width, height);

        Ok(Self {
            glfw,
            window,
            events,
            gl,
            presenter,
            pixels,
            state: SurfaceState::Open,
        })
    }

    /// Drawable size in framebuffer pixels
    ///
    /// On HiDPI displays this exceeds the window size in screen coordinates
    /// (a 320x240 window may report 640x480); plots address these pixels.
    fn live_size(&self) -> (u32, u32) {
        let (width, height) = self.window.get_framebuffer_size();
        (width.max(0) as u32, height.max(0) as u32)
    }

    fn check_open(&self) -> SurfaceResult<()> {
        if self.state == SurfaceState::Closed || self.window.should_close() {
            return Err(SurfaceError::closed());
        }
        Ok(())
    }

    /// Fail on a closed window, recording the transition, then follow any resize
    ///
    /// Returns the live size. A minimized window reports a zero size; the
    /// buffer keeps its last dimensions until the window is restored.
    fn prepare(&mut self) -> SurfaceResult<(u32, u32)> {
        if let Err(err) = self.check_open() {
            self.mark_closed();
            return Err(err);
        }
        let (width, height) = self.live_size();
        if width > 0 && height > 0 && (width, height) != self.pixels.size() {
            log::debug!(
                "Framebuffer resized from {:?} to {}x{}",
                self.pixels.size(),
                width,
                height
            );
            self.pixels
                .resize(width, height)
                .map_err(|e| SurfaceError::DisplayUpdate(e.to_string()))?;
        }
        Ok((width, height))
    }

    fn mark_closed(&mut self) {
        if self.state == SurfaceState::Open {
            log::info!("Window closed");
            self.state = SurfaceState::Closed;
        }
    }

    fn pump_events(&mut self) {
        self.glfw.poll_events();
        for (_, event) in glfw::flush_messages(&self.events) {
            match event {
                glfw::WindowEvent::Close => self.window.set_should_close(true),
                glfw::WindowEvent::FramebufferSize(width, height) => {
                    log::trace!("Framebuffer size event {}x{}", width, height);
                }
                _ => {}
            }
        }
    }
}

impl FramebufferSurface for WindowedSurface {
    /// Live size in framebuffer pixels, `(0, 0)` while minimized
    fn get_size(&self) -> SurfaceResult<(u32, u32)> {
        self.check_open()?;
        Ok(self.live_size())
    }

    fn plot_pixel(&mut self, x: i32, y: i32, rgb: Rgb) -> SurfaceResult<()> {
        let live = self.prepare()?;
        reject_while_minimized(PixelRect::pixel(x, y), live)?;
        self.pixels.plot_pixel(x, y, rgb)
    }

    fn plot_rect(&mut self, corner1: Corner, corner2: Corner, rgb: Rgb) -> SurfaceResult<()> {
        let live = self.prepare()?;
        reject_while_minimized(PixelRect::from_corners(corner1, corner2), live)?;
        self.pixels.plot_rect(corner1, corner2, rgb)
    }

    fn update(&mut self) -> SurfaceResult<()> {
        self.check_open().map_err(|err| {
            self.mark_closed();
            err
        })?;
        self.pump_events();
        let (width, height) = self.prepare()?;
        if width == 0 || height == 0 {
            return Ok(());
        }

        self.presenter
            .present(&self.gl, &self.pixels)
            .map_err(SurfaceError::DisplayUpdate)?;
        self.window.swap_buffers();
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.check_open().is_ok()
    }
}

impl Drop for WindowedSurface {
    fn drop(&mut self) {
        log::debug!("Destroying window surface");
        self.window.make_current();
        self.presenter.destroy(&self.gl);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn display_available() -> bool {
        std::env::var_os("DISPLAY").is_some() || std::env::var_os("WAYLAND_DISPLAY").is_some()
    }

    #[test]
    fn test_missing_display_is_init_error() {
        if display_available() {
            return;
        }
        let result = WindowedSurface::new(&DisplayConfig::default());
        assert!(matches!(result, Err(SurfaceError::DisplayInit(_))));
    }

    #[test]
    fn test_oversized_config_rejected_before_glfw() {
        let config = DisplayConfig::default().with_size(i32::MAX as u32, i32::MAX as u32);
        assert!(matches!(WindowedSurface::new(&config), Err(SurfaceError::DisplayInit(_))));
    }
}
