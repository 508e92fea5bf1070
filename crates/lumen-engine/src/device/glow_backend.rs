//! `GlContext` over a real `glow::Context` (desktop GL, GLES or WebGL).

use glow::HasContext as Gl;

use crate::shader::ShaderStage;

use super::context::{BufferUsage, ClearColor, GlContext, Topology};

// All handles passed back into glow originate from the same context, which is
// the only requirement the unsafe calls below carry.
impl GlContext for glow::Context {
    type Shader = <glow::Context as Gl>::Shader;
    type Program = <glow::Context as Gl>::Program;
    type Buffer = <glow::Context as Gl>::Buffer;
    type UniformLocation = <glow::Context as Gl>::UniformLocation;

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { Gl::viewport(self, x, y, width, height) }
    }

    fn clear_color(&self, color: ClearColor) {
        unsafe { Gl::clear_color(self, color.r, color.g, color.b, color.a) }
    }

    fn clear_color_buffer(&self) {
        unsafe { Gl::clear(self, glow::COLOR_BUFFER_BIT) }
    }

    fn create_buffer(&self) -> Result<Self::Buffer, String> {
        unsafe { Gl::create_buffer(self) }
    }

    fn bind_array_buffer(&self, buffer: Option<Self::Buffer>) {
        unsafe { Gl::bind_buffer(self, glow::ARRAY_BUFFER, buffer) }
    }

    fn array_buffer_data(&self, data: &[u8], usage: BufferUsage) {
        unsafe { Gl::buffer_data_u8_slice(self, glow::ARRAY_BUFFER, data, usage.gl_enum()) }
    }

    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String> {
        unsafe { Gl::create_shader(self, stage.gl_enum()) }
    }

    fn shader_source(&self, shader: Self::Shader, source: &str) {
        unsafe { Gl::shader_source(self, shader, source) }
    }

    fn compile_shader(&self, shader: Self::Shader) {
        unsafe { Gl::compile_shader(self, shader) }
    }

    fn shader_compile_status(&self, shader: Self::Shader) -> bool {
        unsafe { Gl::get_shader_compile_status(self, shader) }
    }

    fn shader_info_log(&self, shader: Self::Shader) -> String {
        unsafe { Gl::get_shader_info_log(self, shader) }
    }

    fn delete_shader(&self, shader: Self::Shader) {
        unsafe { Gl::delete_shader(self, shader) }
    }

    fn create_program(&self) -> Result<Self::Program, String> {
        unsafe { Gl::create_program(self) }
    }

    fn attach_shader(&self, program: Self::Program, shader: Self::Shader) {
        unsafe { Gl::attach_shader(self, program, shader) }
    }

    fn link_program(&self, program: Self::Program) {
        unsafe { Gl::link_program(self, program) }
    }

    fn program_link_status(&self, program: Self::Program) -> bool {
        unsafe { Gl::get_program_link_status(self, program) }
    }

    fn program_info_log(&self, program: Self::Program) -> String {
        unsafe { Gl::get_program_info_log(self, program) }
    }

    fn delete_program(&self, program: Self::Program) {
        unsafe { Gl::delete_program(self, program) }
    }

    fn use_program(&self, program: Option<Self::Program>) {
        unsafe { Gl::use_program(self, program) }
    }

    fn attrib_location(&self, program: Self::Program, name: &str) -> Option<u32> {
        unsafe { Gl::get_attrib_location(self, program, name) }
    }

    fn uniform_location(
        &self,
        program: Self::Program,
        name: &str,
    ) -> Option<Self::UniformLocation> {
        unsafe { Gl::get_uniform_location(self, program, name) }
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        unsafe { Gl::enable_vertex_attrib_array(self, index) }
    }

    fn vertex_attrib_pointer_f32(
        &self,
        index: u32,
        components: i32,
        normalized: bool,
        stride: i32,
        offset: i32,
    ) {
        unsafe {
            Gl::vertex_attrib_pointer_f32(
                self,
                index,
                components,
                glow::FLOAT,
                normalized,
                stride,
                offset,
            )
        }
    }

    fn uniform_matrix4(
        &self,
        location: Option<&Self::UniformLocation>,
        transpose: bool,
        value: &[f32; 16],
    ) {
        unsafe { Gl::uniform_matrix_4_f32_slice(self, location, transpose, value) }
    }

    fn draw_arrays(&self, topology: Topology, first: i32, count: i32) {
        unsafe { Gl::draw_arrays(self, topology.gl_enum(), first, count) }
    }
}
