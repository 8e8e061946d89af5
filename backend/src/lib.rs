//! OpenGL backend for the terrain viewer: an SDL2 window with a GL 4.1 core
//! context, shader program and quad geometry wrappers, and the render loop
//! that drives them.

pub mod clock;
pub mod error;
pub mod geometry;
pub mod glutils;
pub mod logging;
pub mod math;
pub mod render_loop;
pub mod shaders;
pub mod system;

pub use error::{BackendError, BackendResult};
pub use geometry::GeometryBuffer;
pub use render_loop::{LoopState, RenderLoop, RunSummary};
pub use shaders::{Shaders, UniformLocation};
pub use system::{System, WindowConfig};
