use crate::device::GlContext;

use super::error::diagnostic;
use super::{ShaderError, ShaderStage};

/// A shader object whose compile step succeeded.
///
/// Move-only: it is consumed by [`link_program`](super::link_program) or
/// released with [`CompiledShader::delete`].
#[derive(Debug)]
pub struct CompiledShader<S> {
    handle: S,
    stage: ShaderStage,
}

impl<S: Copy> CompiledShader<S> {
    #[inline]
    pub fn handle(&self) -> S {
        self.handle
    }

    #[inline]
    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    /// Deletes the underlying shader object.
    pub fn delete<C>(self, ctx: &C)
    where
        C: GlContext<Shader = S>,
    {
        ctx.delete_shader(self.handle);
    }
}

/// Creates, sources and compiles a shader of `stage`.
///
/// On failure the shader object is deleted, the info log is logged at error
/// level and returned in [`ShaderError::Compile`].
pub fn compile_shader<C: GlContext>(
    ctx: &C,
    stage: ShaderStage,
    source: &str,
) -> Result<CompiledShader<C::Shader>, ShaderError> {
    let shader = ctx
        .create_shader(stage)
        .map_err(|message| ShaderError::Create { what: "shader", message })?;

    ctx.shader_source(shader, source);
    ctx.compile_shader(shader);

    if !ctx.shader_compile_status(shader) {
        let log = diagnostic(ctx.shader_info_log(shader), "compilation failed (driver gave no log)");
        ctx.delete_shader(shader);
        log::error!("{stage} shader compile error: {log}");
        return Err(ShaderError::Compile { stage, log });
    }

    log::debug!("compiled {stage} shader ({} bytes of GLSL)", source.len());
    Ok(CompiledShader { handle: shader, stage })
}

/// Like [`compile_shader`], with the stage given as a textual tag (`"vert"`, `"frag"`, ...).
///
/// An unrecognized tag fails with [`ShaderError::InvalidStage`] before the
/// context is touched.
pub fn compile_shader_tagged<C: GlContext>(
    ctx: &C,
    tag: &str,
    source: &str,
) -> Result<CompiledShader<C::Shader>, ShaderError> {
    let stage: ShaderStage = tag.parse()?;
    compile_shader(ctx, stage, source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{GlCall, RecordingContext};
    use crate::shader::{FRAGMENT_SOURCE, VERTEX_SOURCE};

    #[test]
    fn embedded_sources_compile() {
        let ctx = RecordingContext::new();
        let vs = compile_shader(&ctx, ShaderStage::Vertex, VERTEX_SOURCE).unwrap();
        let fs = compile_shader(&ctx, ShaderStage::Fragment, FRAGMENT_SOURCE).unwrap();

        assert_eq!(vs.stage(), ShaderStage::Vertex);
        assert_eq!(fs.stage(), ShaderStage::Fragment);
        assert_ne!(vs.handle(), fs.handle());
        assert_eq!(ctx.live_shaders(), 2);
    }

    #[test]
    fn syntax_error_yields_diagnostic_and_no_handle() {
        let ctx = RecordingContext::new();
        let err = compile_shader(&ctx, ShaderStage::Fragment, "void main() {\n gl_FragColor = vec4(1.0;\n}")
            .unwrap_err();

        match err {
            ShaderError::Compile { stage, log } => {
                assert_eq!(stage, ShaderStage::Fragment);
                assert!(!log.is_empty());
                assert!(log.starts_with("ERROR: 0:"), "{log}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(ctx.live_shaders(), 0);
    }

    #[test]
    fn empty_driver_log_is_replaced() {
        let ctx = RecordingContext::new().with_empty_info_logs();
        let err = compile_shader(&ctx, ShaderStage::Vertex, "not glsl").unwrap_err();

        let ShaderError::Compile { log, .. } = err else { panic!("expected compile error") };
        assert!(!log.trim().is_empty());
    }

    #[test]
    fn invalid_tag_never_touches_context() {
        let ctx = RecordingContext::new();
        let err = compile_shader_tagged(&ctx, "geometry", VERTEX_SOURCE).unwrap_err();

        assert_eq!(err, ShaderError::InvalidStage("geometry".to_string()));
        assert!(ctx.calls().is_empty());
    }

    #[test]
    fn tagged_compile_selects_stage() {
        let ctx = RecordingContext::new();
        let fs = compile_shader_tagged(&ctx, "frag", FRAGMENT_SOURCE).unwrap();

        assert_eq!(fs.stage(), ShaderStage::Fragment);
        assert_eq!(
            ctx.calls()[0],
            GlCall::CreateShader { shader: fs.handle(), stage: ShaderStage::Fragment }
        );
    }
}
