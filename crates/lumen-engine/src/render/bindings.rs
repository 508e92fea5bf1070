use crate::device::GlContext;
use crate::shader::LinkedProgram;

pub const VERTEX_POS_ATTRIBUTE: &str = "vertexPos";
pub const MODEL_VIEW_UNIFORM: &str = "modelViewMatrix";
pub const PROJECTION_UNIFORM: &str = "projectionMatrix";

/// Locations of the square program's inputs, resolved once after linking.
///
/// A `None` entry means the program does not expose that name (declared but
/// optimized out, or misspelled). Rendering continues without it.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramBindings<U> {
    pub vertex_pos: Option<u32>,
    pub model_view: Option<U>,
    pub projection: Option<U>,
}

impl<U> ProgramBindings<U> {
    pub fn resolve<C>(ctx: &C, program: &LinkedProgram<C::Program>) -> Self
    where
        C: GlContext<UniformLocation = U>,
    {
        let vertex_pos = program.attrib_location(ctx, VERTEX_POS_ATTRIBUTE);
        let model_view = program.uniform_location(ctx, MODEL_VIEW_UNIFORM);
        let projection = program.uniform_location(ctx, PROJECTION_UNIFORM);

        if vertex_pos.is_none() {
            log::warn!("attribute `{VERTEX_POS_ATTRIBUTE}` not found in program");
        }
        if model_view.is_none() {
            log::warn!("uniform `{MODEL_VIEW_UNIFORM}` not found in program");
        }
        if projection.is_none() {
            log::warn!("uniform `{PROJECTION_UNIFORM}` not found in program");
        }

        Self { vertex_pos, model_view, projection }
    }

    pub fn is_complete(&self) -> bool {
        self.vertex_pos.is_some() && self.model_view.is_some() && self.projection.is_some()
    }
}
