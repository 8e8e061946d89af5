use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn gl_enum(self) -> gl::types::GLenum {
        match self {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Fatal setup failures. Nothing in the frame loop produces one of these.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("SDL initialization failed: {0}")]
    Sdl(String),
    #[error("error while building OpenGL window: {0}")]
    WindowBuild(String),
    #[error("OpenGL context creation failed: {0}")]
    ContextCreation(String),
    #[error("error reading {}: {source}", path.display())]
    ShaderSource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("gl::CreateShader({0}) failed")]
    ShaderObject(ShaderStage),
    #[error("{stage} shader compilation error: {log}")]
    ShaderCompile { stage: ShaderStage, log: String },
    #[error("program link error: {0}")]
    ProgramLink(String),
    #[error("OpenGL error 0x{0:04x}")]
    Gl(u32),
}

pub type BackendResult<T> = Result<T, BackendError>;
