use crate::device::GlContext;

use super::compile::{CompiledShader, compile_shader};
use super::error::diagnostic;
use super::{ShaderError, ShaderSources, ShaderStage};

/// A program object whose link step succeeded.
///
/// Only a `LinkedProgram` can be bound or queried for locations, so an
/// unlinked program never reaches a draw call.
#[derive(Debug)]
pub struct LinkedProgram<P> {
    handle: P,
}

impl<P: Copy> LinkedProgram<P> {
    #[inline]
    pub fn handle(&self) -> P {
        self.handle
    }

    /// Makes this the active program.
    pub fn bind<C>(&self, ctx: &C)
    where
        C: GlContext<Program = P>,
    {
        ctx.use_program(Some(self.handle));
    }

    pub fn attrib_location<C>(&self, ctx: &C, name: &str) -> Option<u32>
    where
        C: GlContext<Program = P>,
    {
        ctx.attrib_location(self.handle, name)
    }

    pub fn uniform_location<C>(&self, ctx: &C, name: &str) -> Option<C::UniformLocation>
    where
        C: GlContext<Program = P>,
    {
        ctx.uniform_location(self.handle, name)
    }

    pub fn delete<C>(self, ctx: &C)
    where
        C: GlContext<Program = P>,
    {
        ctx.delete_program(self.handle);
    }
}

/// Links one vertex and one fragment shader into a program.
///
/// Both shaders are consumed: after a successful link the program holds the
/// code and the shader objects are deleted; on any failure they are deleted too.
pub fn link_program<C: GlContext>(
    ctx: &C,
    vertex: CompiledShader<C::Shader>,
    fragment: CompiledShader<C::Shader>,
) -> Result<LinkedProgram<C::Program>, ShaderError> {
    let mismatch = if vertex.stage() != ShaderStage::Vertex {
        Some(ShaderError::StageMismatch { expected: ShaderStage::Vertex, found: vertex.stage() })
    } else if fragment.stage() != ShaderStage::Fragment {
        Some(ShaderError::StageMismatch {
            expected: ShaderStage::Fragment,
            found: fragment.stage(),
        })
    } else {
        None
    };
    if let Some(err) = mismatch {
        log::error!("refusing to link: {err}");
        vertex.delete(ctx);
        fragment.delete(ctx);
        return Err(err);
    }

    let program = match ctx.create_program() {
        Ok(p) => p,
        Err(message) => {
            vertex.delete(ctx);
            fragment.delete(ctx);
            return Err(ShaderError::Create { what: "program", message });
        }
    };

    ctx.attach_shader(program, vertex.handle());
    ctx.attach_shader(program, fragment.handle());
    ctx.link_program(program);

    let linked = ctx.program_link_status(program);
    vertex.delete(ctx);
    fragment.delete(ctx);

    if !linked {
        let log = diagnostic(ctx.program_info_log(program), "link failed (driver gave no log)");
        ctx.delete_program(program);
        log::error!("program link error: {log}");
        return Err(ShaderError::Link { log });
    }

    log::debug!("linked shader program");
    Ok(LinkedProgram { handle: program })
}

/// Compiles both stages from `sources` and links them.
///
/// The first failure short-circuits: no link is attempted with a missing shader.
pub fn build_program<C: GlContext>(
    ctx: &C,
    sources: &ShaderSources,
) -> Result<LinkedProgram<C::Program>, ShaderError> {
    let vertex = compile_shader(ctx, ShaderStage::Vertex, &sources.vertex)?;
    let fragment = match compile_shader(ctx, ShaderStage::Fragment, &sources.fragment) {
        Ok(f) => f,
        Err(err) => {
            vertex.delete(ctx);
            return Err(err);
        }
    };
    link_program(ctx, vertex, fragment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{GlCall, RecordingContext};
    use crate::shader::{FRAGMENT_SOURCE, VERTEX_SOURCE};

    fn compile_pair(ctx: &RecordingContext) -> (CompiledShader<u32>, CompiledShader<u32>) {
        (
            compile_shader(ctx, ShaderStage::Vertex, VERTEX_SOURCE).unwrap(),
            compile_shader(ctx, ShaderStage::Fragment, FRAGMENT_SOURCE).unwrap(),
        )
    }

    #[test]
    fn well_formed_pair_links_and_resolves() {
        let ctx = RecordingContext::new();
        let (vs, fs) = compile_pair(&ctx);
        let program = link_program(&ctx, vs, fs).unwrap();

        assert_eq!(program.attrib_location(&ctx, "vertexPos"), Some(0));
        assert!(program.uniform_location(&ctx, "modelViewMatrix").is_some());
        assert!(program.uniform_location(&ctx, "projectionMatrix").is_some());
        assert_eq!(program.uniform_location(&ctx, "missing"), None);
    }

    #[test]
    fn shaders_are_released_after_link() {
        let ctx = RecordingContext::new();
        let (vs, fs) = compile_pair(&ctx);
        let program = link_program(&ctx, vs, fs).unwrap();

        assert_eq!(ctx.live_shaders(), 0);
        assert_eq!(ctx.live_programs(), 1);
        program.delete(&ctx);
        assert_eq!(ctx.live_programs(), 0);
    }

    #[test]
    fn swapped_stages_are_rejected_before_linking() {
        let ctx = RecordingContext::new();
        let (vs, fs) = compile_pair(&ctx);
        let (vs_handle, fs_handle) = (vs.handle(), fs.handle());
        let before = ctx.calls().len();
        let err = link_program(&ctx, fs, vs).unwrap_err();

        assert_eq!(
            err,
            ShaderError::StageMismatch { expected: ShaderStage::Vertex, found: ShaderStage::Fragment }
        );
        // Only the two consumed shaders are released; no program is created.
        assert_eq!(
            ctx.calls()[before..],
            [GlCall::DeleteShader(fs_handle), GlCall::DeleteShader(vs_handle)]
        );
        assert_eq!(ctx.live_shaders(), 0);
    }

    #[test]
    fn link_failure_returns_no_program() {
        let ctx = RecordingContext::new().failing_link();
        let (vs, fs) = compile_pair(&ctx);
        let err = link_program(&ctx, vs, fs).unwrap_err();

        let ShaderError::Link { log } = err else { panic!("expected link error") };
        assert!(!log.is_empty());
        assert_eq!(ctx.live_programs(), 0);
        assert_eq!(ctx.current_program(), None);
    }

    #[test]
    fn build_stops_at_vertex_failure() {
        let ctx = RecordingContext::new().failing_compile(ShaderStage::Vertex);
        let err = build_program(&ctx, &ShaderSources::default()).unwrap_err();

        assert!(matches!(err, ShaderError::Compile { stage: ShaderStage::Vertex, .. }));
        let calls = ctx.calls();
        assert!(!calls.iter().any(|c| matches!(c, GlCall::LinkProgram(_))));
        assert!(!calls.iter().any(|c| matches!(c, GlCall::CreateShader { stage: ShaderStage::Fragment, .. })));
    }

    #[test]
    fn build_releases_vertex_when_fragment_fails() {
        let ctx = RecordingContext::new().failing_compile(ShaderStage::Fragment);
        let err = build_program(&ctx, &ShaderSources::default()).unwrap_err();

        assert!(matches!(err, ShaderError::Compile { stage: ShaderStage::Fragment, .. }));
        assert_eq!(ctx.live_shaders(), 0);
        assert_eq!(ctx.live_programs(), 0);
    }

    #[test]
    fn build_with_default_sources() {
        let ctx = RecordingContext::new();
        let program = build_program(&ctx, &ShaderSources::default()).unwrap();

        program.bind(&ctx);
        assert_eq!(ctx.current_program(), Some(program.handle()));
    }
}
