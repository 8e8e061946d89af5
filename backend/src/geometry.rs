use crate::error::BackendResult;
use crate::glutils::*;
use crate::math::{Vec3, POSITION_COMPONENTS, QUAD_INDICES, QUAD_VERTICES};
use crate::render_loop::Mesh;
use crate::system::System;
use std::marker::PhantomData;

/// Static vertex + index storage with a single position attribute at slot 0.
///
/// The data is copied to the GPU once in [`GeometryBuffer::upload`] and never
/// touched again; the GL names are released on drop.
pub struct GeometryBuffer {
    vao: u32,
    vbo: u32,
    ebo: u32,
    index_count: usize,
    _not_send: PhantomData<*const ()>,
}

impl GeometryBuffer {
    pub fn upload(_system: &System, vertices: &[Vec3], indices: &[u32]) -> BackendResult<Self> {
        let (mut vao, mut vbo, mut ebo) = (0, 0, 0);

        unsafe { gl::GenVertexArrays(1, &mut vao) };
        unsafe { gl::BindVertexArray(vao) };

        unsafe { gl::GenBuffers(1, &mut vbo) };
        unsafe { gl::BindBuffer(gl::ARRAY_BUFFER, vbo) };
        gl_buffer_data_arr_stat(vertices);

        unsafe { gl::GenBuffers(1, &mut ebo) };
        unsafe { gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, ebo) };
        gl_buffer_data_element_stat(indices);

        // position: 3 floats, no padding, no interleaving
        gl_vertex_attrib_ptr_enab(0, POSITION_COMPONENTS, POSITION_COMPONENTS, 0);

        // the element buffer binding is VAO state, only the array buffer is unbound
        unsafe { gl::BindVertexArray(0) };
        unsafe { gl::BindBuffer(gl::ARRAY_BUFFER, 0) };

        let buffer = GeometryBuffer {
            vao,
            vbo,
            ebo,
            index_count: indices.len(),
            _not_send: PhantomData,
        };
        check_gl_err()?;

        log::debug!(
            "uploaded {} vertices / {} indices (vao={}, vbo={}, ebo={})",
            vertices.len(),
            indices.len(),
            vao,
            vbo,
            ebo
        );
        Ok(buffer)
    }

    /// The two-triangle quad covering the whole viewport.
    pub fn fullscreen_quad(system: &System) -> BackendResult<Self> {
        Self::upload(system, &QUAD_VERTICES, &QUAD_INDICES)
    }

    pub fn bind(&self) {
        unsafe { gl::BindVertexArray(self.vao) };
    }

    pub fn draw_indexed(&self, index_count: usize) {
        debug_assert!(index_count <= self.index_count);
        unsafe {
            gl::DrawElements(
                gl::TRIANGLES,
                index_count as i32,
                gl::UNSIGNED_INT,
                std::ptr::null(),
            )
        };
    }
}

impl Mesh for GeometryBuffer {
    fn bind(&self) {
        GeometryBuffer::bind(self);
    }

    fn index_count(&self) -> usize {
        self.index_count
    }

    fn draw_indexed(&self, index_count: usize) {
        GeometryBuffer::draw_indexed(self, index_count);
        warn_gl_err("glDrawElements");
    }
}

impl Drop for GeometryBuffer {
    fn drop(&mut self) {
        log::debug!("deleting vao={} vbo={} ebo={}", self.vao, self.vbo, self.ebo);
        unsafe {
            gl::DeleteVertexArrays(1, &self.vao);
            gl::DeleteBuffers(1, &self.vbo);
            gl::DeleteBuffers(1, &self.ebo);
        }
    }
}
