use crate::coords::Viewport;
use crate::device::ClearColor;
use crate::shader::ShaderSources;

/// Everything the render driver needs besides the context.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub viewport: Viewport,
    pub clear_color: ClearColor,
    pub shaders: ShaderSources,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            clear_color: ClearColor::BLACK,
            shaders: ShaderSources::default(),
        }
    }
}

impl RenderConfig {
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }
}
