use crate::error::{BackendError, BackendResult};
use crate::glutils::{check_gl_err, print_opengl_info, warn_gl_err};
use crate::render_loop::{Surface, ViewportSize};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::video::{GLProfile, SwapInterval};

pub const WINDOW_WIDTH: u32 = 800;
pub const WINDOW_HEIGHT: u32 = 600;
pub const WINDOW_TITLE: &str = "Terrain Generation";

/// Window and context parameters. The window is never resizable.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    /// Requested core-profile version (major, minor).
    pub gl_version: (u8, u8),
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
            title: WINDOW_TITLE.to_string(),
            gl_version: (4, 1),
            vsync: true,
        }
    }
}

/// Owns the SDL window and the OpenGL context made current on the creating
/// thread. Everything that issues GL calls borrows a `System` first.
pub struct System {
    event_pump: sdl2::EventPump,
    _gl_ctx: sdl2::video::GLContext,
    window: sdl2::video::Window,
    _video_subsystem: sdl2::VideoSubsystem,
    _sdl_context: sdl2::Sdl,
    close_requested: bool,
}

impl System {
    pub fn new(config: &WindowConfig) -> BackendResult<System> {
        let sdl_context = sdl2::init().map_err(BackendError::Sdl)?;
        let video_subsystem = sdl_context.video().map_err(BackendError::Sdl)?;

        let (major, minor) = config.gl_version;
        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(GLProfile::Core);
        gl_attr.set_context_version(major, minor);
        gl_attr.set_double_buffer(true);
        gl_attr.set_depth_size(24);

        let window = video_subsystem
            .window(&config.title, config.width, config.height)
            .opengl()
            .position_centered()
            .build()
            .map_err(|e| BackendError::WindowBuild(e.to_string()))?;

        let gl_ctx = window
            .gl_create_context()
            .map_err(BackendError::ContextCreation)?;
        window
            .gl_make_current(&gl_ctx)
            .map_err(BackendError::ContextCreation)?;
        gl::load_with(|name| video_subsystem.gl_get_proc_address(name) as *const _);

        debug_assert_eq!(gl_attr.context_profile(), GLProfile::Core);
        debug_assert_eq!(gl_attr.context_version(), (major, minor));

        let interval = if config.vsync {
            SwapInterval::VSync
        } else {
            SwapInterval::Immediate
        };
        if let Err(e) = video_subsystem.gl_set_swap_interval(interval) {
            log::warn!("cannot set swap interval (vsync={}): {e}", config.vsync);
        }

        print_opengl_info();

        let (fb_w, fb_h) = window.drawable_size();
        unsafe {
            gl::Viewport(0, 0, fb_w as i32, fb_h as i32);
            gl::ClearColor(0.0, 0.0, 0.0, 1.0);
        }
        check_gl_err()?;

        let event_pump = sdl_context.event_pump().map_err(BackendError::Sdl)?;

        log::info!(
            "window '{}' {}x{} (framebuffer {}x{}), OpenGL {}.{} core",
            config.title,
            config.width,
            config.height,
            fb_w,
            fb_h,
            major,
            minor
        );

        Ok(System {
            event_pump,
            _gl_ctx: gl_ctx,
            window,
            _video_subsystem: video_subsystem,
            _sdl_context: sdl_context,
            close_requested: false,
        })
    }

    /// Drains pending events without blocking. Returns `false` once the
    /// window was asked to close.
    pub fn process_io_events(&mut self) -> bool {
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => {
                    log::debug!("close requested");
                    self.close_requested = true;
                }
                _ => {}
            }
        }
        !self.close_requested
    }

    pub fn draw_to_screen(&mut self) {
        self.window.gl_swap_window();
    }

    pub fn clear_screen(&mut self) {
        unsafe { gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT) };
    }
}

impl Surface for System {
    fn should_close(&self) -> bool {
        self.close_requested
    }

    fn clear(&mut self) {
        self.clear_screen();
    }

    fn swap_buffers(&mut self) {
        self.draw_to_screen();
        warn_gl_err("present");
    }

    fn poll_events(&mut self) {
        self.process_io_events();
    }

    fn viewport(&self) -> ViewportSize {
        let (width, height) = self.window.drawable_size();
        ViewportSize { width, height }
    }
}

impl Drop for System {
    fn drop(&mut self) {
        log::info!("releasing window and OpenGL context");
    }
}
