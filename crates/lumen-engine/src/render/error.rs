use crate::shader::ShaderError;

/// Why `render_square` aborted before issuing its draw call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("invalid viewport {width}x{height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("failed to allocate {what}: {message}")]
    Allocation { what: &'static str, message: String },

    #[error(transparent)]
    Shader(#[from] ShaderError),
}
