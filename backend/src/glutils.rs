use crate::error::{BackendError, BackendResult};
use gl::{types::*, *};
use std::ffi::CStr;

const MAX_QUEUED_ERRORS: usize = 16;

/// Drains the GL error queue and returns the first recorded error, if any.
pub fn gl_error() -> Option<GLenum> {
    let first = unsafe { gl::GetError() };
    if first == gl::NO_ERROR {
        return None;
    }
    // the queue may hold more than one flag; leave it empty for the next check
    for _ in 0..MAX_QUEUED_ERRORS {
        if unsafe { gl::GetError() } == gl::NO_ERROR {
            break;
        }
    }
    Some(first)
}

/// Setup-time check: any pending GL error is fatal.
pub fn check_gl_err() -> BackendResult<()> {
    match gl_error() {
        None => Ok(()),
        Some(err) => Err(BackendError::Gl(err)),
    }
}

/// Frame-time check: errors are reported, the frame carries on.
pub fn warn_gl_err(what: &str) {
    if let Some(err) = gl_error() {
        log::warn!("{what}: OpenGL error 0x{err:04x}");
    }
}

fn gl_string(name: GLenum) -> String {
    let ptr = unsafe { gl::GetString(name) };
    if ptr.is_null() {
        return "<unavailable>".to_string();
    }
    unsafe { CStr::from_ptr(ptr.cast()) }
        .to_string_lossy()
        .into_owned()
}

pub fn print_opengl_info() {
    log::info!("GL_VENDOR = {}", gl_string(VENDOR));
    log::info!("GL_RENDERER = {}", gl_string(RENDERER));
    log::info!("GL_VERSION = {}", gl_string(VERSION));
    log::info!("GL_SHADING_LANGUAGE_VERSION = {}", gl_string(SHADING_LANGUAGE_VERSION));
}

pub fn gl_buffer_data_arr_stat<T: Sized>(buffer: &[T]) {
    unsafe {
        gl::BufferData(
            ARRAY_BUFFER,
            std::mem::size_of_val(buffer) as isize,
            buffer.as_ptr().cast(),
            STATIC_DRAW,
        )
    };
}

pub fn gl_buffer_data_element_stat<T: Sized>(buffer: &[T]) {
    unsafe {
        gl::BufferData(
            ELEMENT_ARRAY_BUFFER,
            std::mem::size_of_val(buffer) as isize,
            buffer.as_ptr().cast(),
            STATIC_DRAW,
        )
    };
}

/// Float attribute at `index`; `stride` and `pointer` are counted in floats.
pub fn gl_vertex_attrib_ptr_enab(index: u32, size: u32, stride: u32, pointer: usize) {
    unsafe {
        gl::VertexAttribPointer(
            index,
            size as i32,
            FLOAT,
            FALSE,
            (stride as usize * std::mem::size_of::<f32>()) as i32,
            (pointer * std::mem::size_of::<f32>()) as *const _,
        )
    };
    unsafe { gl::EnableVertexAttribArray(index) };
}
