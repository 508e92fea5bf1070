//! Graphics-context capability.
//!
//! This module is responsible for:
//! - the `GlContext` trait every pipeline step is written against
//! - the `glow::Context` implementation used by real hosts
//! - `RecordingContext`, a headless implementation that records commands

mod context;
mod glow_backend;
mod recording;

pub use context::{BufferUsage, ClearColor, GlContext, Topology};
pub use recording::{GlCall, RecordingContext};
