//! The per-frame contract between the host and the terrain program.
//!
//! A [`RenderLoop`] only exists once a surface, a linked program and the quad
//! geometry have all been acquired, so there is no partially initialized
//! state to guard against. Each frame runs the fixed sequence
//! clear, activate, push uniforms, bind, draw, present, poll. When the
//! surface reports it should close the loop releases the geometry, the
//! program and the surface, in that order.

use crate::clock::{FrameClock, FrameTime};
use crate::math::Vec2;
use crate::shaders::UniformLocation;

pub const RESOLUTION_UNIFORM: &str = "iResolution";
pub const TIME_UNIFORM: &str = "iTime";

/// Framebuffer size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
}

impl ViewportSize {
    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

/// Window + context capability consumed by the loop.
pub trait Surface {
    fn should_close(&self) -> bool;
    /// Clears color and depth.
    fn clear(&mut self);
    fn swap_buffers(&mut self);
    /// Must not block waiting for input.
    fn poll_events(&mut self);
    fn viewport(&self) -> ViewportSize;
}

pub trait Program {
    fn activate(&self);
    /// Returns [`UniformLocation::INVALID`] for names the program lacks.
    fn uniform_location(&self, name: &str) -> UniformLocation;
    fn set_vec2(&self, location: UniformLocation, x: f32, y: f32);
    fn set_f32(&self, location: UniformLocation, value: f32);
}

pub trait Mesh {
    fn bind(&self);
    fn index_count(&self) -> usize;
    fn draw_indexed(&self, index_count: usize);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Terminated,
}

/// Values pushed to the program during one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUniforms {
    pub resolution: Vec2,
    pub time: FrameTime,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    /// `iTime` of the last rendered frame.
    pub elapsed: f32,
}

#[derive(Debug, Clone, Copy)]
struct UniformSlots {
    resolution: UniformLocation,
    time: UniformLocation,
}

pub struct RenderLoop<S: Surface, P: Program, M: Mesh> {
    surface: Option<S>,
    program: Option<P>,
    mesh: Option<M>,
    slots: UniformSlots,
    clock: FrameClock,
    max_frames: Option<u64>,
    frames: u64,
    state: LoopState,
}

impl<S: Surface, P: Program, M: Mesh> RenderLoop<S, P, M> {
    /// Takes ownership of the acquired resources and starts the clock.
    pub fn new(surface: S, program: P, mesh: M) -> Self {
        let slots = UniformSlots {
            resolution: program.uniform_location(RESOLUTION_UNIFORM),
            time: program.uniform_location(TIME_UNIFORM),
        };
        let declared = [
            (RESOLUTION_UNIFORM, slots.resolution),
            (TIME_UNIFORM, slots.time),
        ];
        for (name, location) in declared {
            if !location.is_valid() {
                log::info!("program does not declare '{name}'");
            }
        }

        RenderLoop {
            surface: Some(surface),
            program: Some(program),
            mesh: Some(mesh),
            slots,
            clock: FrameClock::start(),
            max_frames: None,
            frames: 0,
            state: LoopState::Running,
        }
    }

    /// Stop after `max_frames` frames even if the surface stays open.
    pub fn with_max_frames(mut self, max_frames: Option<u64>) -> Self {
        self.max_frames = max_frames;
        self
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Runs one full frame cycle. Returns `None` once the loop has terminated.
    pub fn frame(&mut self) -> Option<FrameUniforms> {
        let (Some(surface), Some(program), Some(mesh)) =
            (self.surface.as_mut(), self.program.as_ref(), self.mesh.as_ref())
        else {
            return None;
        };

        surface.clear();
        program.activate();

        let time = self.clock.tick();
        let resolution = surface.viewport().as_vec2();
        program.set_vec2(self.slots.resolution, resolution.x, resolution.y);
        program.set_f32(self.slots.time, time.elapsed);

        mesh.bind();
        mesh.draw_indexed(mesh.index_count());

        surface.swap_buffers();
        surface.poll_events();

        self.frames += 1;
        log::trace!(
            "frame {} iTime={:.4} dt={:.4} iResolution={}x{}",
            time.frame_index,
            time.elapsed,
            time.delta,
            resolution.x,
            resolution.y
        );
        Some(FrameUniforms { resolution, time })
    }

    fn should_stop(&self) -> bool {
        let closed = self.surface.as_ref().map_or(true, |s| s.should_close());
        let limited = self.max_frames.is_some_and(|max| self.frames >= max);
        if limited && !closed {
            log::info!("frame limit of {} reached", self.frames);
        }
        closed || limited
    }

    /// Renders until the surface asks to close, then tears everything down.
    pub fn run(&mut self) -> RunSummary {
        log::info!("entering render loop");
        while self.state == LoopState::Running && !self.should_stop() {
            self.frame();
        }

        let summary = RunSummary {
            frames: self.frames,
            elapsed: self.clock.last_elapsed(),
        };
        self.teardown();
        summary
    }

    /// Releases geometry, program and surface, in that order. Idempotent.
    pub fn teardown(&mut self) {
        if self.state == LoopState::Terminated {
            return;
        }
        drop(self.mesh.take());
        drop(self.program.take());
        drop(self.surface.take());
        self.state = LoopState::Terminated;
        log::info!("render loop terminated after {} frames", self.frames);
    }
}

impl<S: Surface, P: Program, M: Mesh> Drop for RenderLoop<S, P, M> {
    fn drop(&mut self) {
        self.teardown();
    }
}
