//! Single-shot render driver.
//!
//! `render_square` runs the whole sequence once: clear, build geometry and
//! program, resolve locations, bind, upload transforms, draw. There is no frame
//! loop and no teardown; resources live as long as the context.

mod bindings;
mod config;
mod driver;
mod error;

pub use bindings::{MODEL_VIEW_UNIFORM, PROJECTION_UNIFORM, ProgramBindings, VERTEX_POS_ATTRIBUTE};
pub use config::RenderConfig;
pub use driver::{DrawCall, render_square};
pub use error::RenderError;
