//! Lumen engine crate.
//!
//! Builds a GLSL program, uploads a unit square and draws it once through an
//! explicitly passed [`device::GlContext`].

pub mod coords;
pub mod device;
pub mod geometry;
pub mod logging;
pub mod render;
pub mod shader;
pub mod transform;

pub use render::{DrawCall, RenderConfig, RenderError, render_square};
