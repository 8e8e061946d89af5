use super::error::{BackendError, BackendResult, ShaderStage};
use super::glutils::*;
use super::render_loop::Program;
use super::system::System;
use gl::{types::*, *};
use std::ffi::CString;
use std::fs;
use std::marker::PhantomData;
use std::path::Path;

/// Location of a uniform in a linked program. `INVALID` stands for a name
/// the program does not declare; writes through it are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformLocation(i32);

impl UniformLocation {
    pub const INVALID: UniformLocation = UniformLocation(-1);

    pub fn from_raw(location: i32) -> Self {
        if location < 0 {
            Self::INVALID
        } else {
            UniformLocation(location)
        }
    }

    pub fn is_valid(self) -> bool {
        self.0 >= 0
    }

    pub fn raw(self) -> i32 {
        self.0
    }
}

fn uniform_name(name: &str) -> Option<CString> {
    CString::new(name).ok()
}

fn read_source(path: &Path) -> BackendResult<String> {
    fs::read_to_string(path).map_err(|source| BackendError::ShaderSource {
        path: path.to_path_buf(),
        source,
    })
}

/// A linked vertex + fragment program. Deleted on drop, so it must not
/// outlive the `System` it was created with, nor leave its thread.
pub struct Shaders {
    program_id: u32,
    _not_send: PhantomData<*const ()>,
}

impl Shaders {
    pub fn from_files(
        system: &System,
        vertex_file: &Path,
        fragment_file: &Path,
    ) -> BackendResult<Shaders> {
        let vertex_code = read_source(vertex_file)?;
        let fragment_code = read_source(fragment_file)?;
        log::info!(
            "compiling shaders {} + {}",
            vertex_file.display(),
            fragment_file.display()
        );
        Shaders::from_str(system, &vertex_code, &fragment_code)
    }

    pub fn from_str(
        _system: &System,
        vertex_code: &str,
        fragment_code: &str,
    ) -> BackendResult<Shaders> {
        let vertex_shader = Self::compile(ShaderStage::Vertex, vertex_code)?;
        let fragment_shader = match Self::compile(ShaderStage::Fragment, fragment_code) {
            Ok(id) => id,
            Err(e) => {
                unsafe { gl::DeleteShader(vertex_shader) };
                return Err(e);
            }
        };

        // create program and link shaders
        let shader_program = unsafe { gl::CreateProgram() };
        unsafe { gl::AttachShader(shader_program, vertex_shader) };
        unsafe { gl::AttachShader(shader_program, fragment_shader) };
        unsafe { gl::LinkProgram(shader_program) };

        // not needed anymore, the program keeps the binaries
        unsafe { gl::DeleteShader(vertex_shader) };
        unsafe { gl::DeleteShader(fragment_shader) };

        let mut success = 0;
        unsafe {
            gl::GetProgramiv(shader_program, LINK_STATUS, &mut success);
        }
        if success == 0 {
            let log = Self::info_log(shader_program, gl::GetProgramiv, gl::GetProgramInfoLog);
            unsafe { gl::DeleteProgram(shader_program) };
            return Err(BackendError::ProgramLink(log));
        }
        // from here on drop deletes the program, including on the error path
        let shaders = Shaders {
            program_id: shader_program,
            _not_send: PhantomData,
        };
        check_gl_err()?;

        log::debug!("program({}) linked", shader_program);
        Ok(shaders)
    }

    fn compile(stage: ShaderStage, shader_code: &str) -> BackendResult<u32> {
        let shader_id = unsafe { gl::CreateShader(stage.gl_enum()) };
        if shader_id == 0 {
            return Err(BackendError::ShaderObject(stage));
        }

        unsafe {
            gl::ShaderSource(
                shader_id,
                1,
                &(shader_code.as_bytes().as_ptr().cast()),
                &(shader_code.len() as i32),
            );
        }

        unsafe { gl::CompileShader(shader_id) };

        // check if there are compilation errors
        let mut success = 0;
        unsafe {
            gl::GetShaderiv(shader_id, COMPILE_STATUS, &mut success);
        }

        if success == 0 {
            let log = Self::info_log(shader_id, gl::GetShaderiv, gl::GetShaderInfoLog);
            unsafe { gl::DeleteShader(shader_id) };
            return Err(BackendError::ShaderCompile { stage, log });
        }
        Ok(shader_id)
    }

    fn info_log(
        object: u32,
        get_iv: unsafe fn(u32, GLenum, *mut i32),
        get_log: unsafe fn(u32, i32, *mut i32, *mut GLchar),
    ) -> String {
        let mut capacity = 0_i32;
        unsafe { get_iv(object, INFO_LOG_LENGTH, &mut capacity) };
        let capacity = capacity.max(1);

        let mut v: Vec<u8> = Vec::with_capacity(capacity as usize);
        let mut log_len = 0_i32;
        unsafe {
            get_log(object, capacity, &mut log_len, v.as_mut_ptr().cast());
            v.set_len(log_len.clamp(0, capacity) as usize);
        }
        String::from_utf8_lossy(&v).trim_end().to_string()
    }

    pub fn get_uniform_location(&self, name: &str) -> UniformLocation {
        let Some(c_name) = uniform_name(name) else {
            log::warn!("program({}): uniform name {:?} contains NUL", self.program_id, name);
            return UniformLocation::INVALID;
        };

        let location = unsafe { gl::GetUniformLocation(self.program_id, c_name.as_ptr().cast()) };
        warn_gl_err("glGetUniformLocation");
        let location = UniformLocation::from_raw(location);
        if !location.is_valid() {
            log::debug!(
                "program({}): '{}' is not an active uniform, writes will be skipped",
                self.program_id,
                name
            );
        }
        location
    }

    pub fn use_program(&self) {
        unsafe { gl::UseProgram(self.program_id) };
    }

    pub fn set_f32(&self, location: UniformLocation, value: f32) {
        if !location.is_valid() {
            return;
        }
        unsafe { gl::Uniform1f(location.raw(), value) };
    }

    pub fn set_vec2(&self, location: UniformLocation, v0: f32, v1: f32) {
        if !location.is_valid() {
            return;
        }
        unsafe { gl::Uniform2f(location.raw(), v0, v1) };
    }
}

impl Program for Shaders {
    fn activate(&self) {
        self.use_program();
    }

    fn uniform_location(&self, name: &str) -> UniformLocation {
        self.get_uniform_location(name)
    }

    fn set_vec2(&self, location: UniformLocation, x: f32, y: f32) {
        Shaders::set_vec2(self, location, x, y);
    }

    fn set_f32(&self, location: UniformLocation, value: f32) {
        Shaders::set_f32(self, location, value);
    }
}

impl Drop for Shaders {
    fn drop(&mut self) {
        log::debug!("deleting program({})", self.program_id);
        unsafe { gl::DeleteProgram(self.program_id) };
    }
}
