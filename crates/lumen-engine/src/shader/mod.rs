//! Shader compilation and program linking.
//!
//! Build sequence: `compile_shader` per stage, then `link_program`, or
//! `build_program` for both in one call. Every step returns a typed handle on
//! success and a [`ShaderError`] carrying the driver diagnostic on failure.

mod compile;
mod error;
mod program;
mod stage;

use std::borrow::Cow;

pub use compile::{CompiledShader, compile_shader, compile_shader_tagged};
pub use error::ShaderError;
pub use program::{LinkedProgram, build_program, link_program};
pub use stage::ShaderStage;

/// Pass-through vertex shader: `projection * modelView * vertexPos`.
pub const VERTEX_SOURCE: &str = include_str!("shaders/square.vert");

/// Solid white fragment shader.
pub const FRAGMENT_SOURCE: &str = include_str!("shaders/square.frag");

/// GLSL for the two stages of a program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSources {
    pub vertex: Cow<'static, str>,
    pub fragment: Cow<'static, str>,
}

impl ShaderSources {
    pub fn new(vertex: impl Into<Cow<'static, str>>, fragment: impl Into<Cow<'static, str>>) -> Self {
        Self { vertex: vertex.into(), fragment: fragment.into() }
    }
}

impl Default for ShaderSources {
    fn default() -> Self {
        Self::new(VERTEX_SOURCE, FRAGMENT_SOURCE)
    }
}
