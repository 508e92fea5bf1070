use crate::device::{GlContext, Topology};
use crate::geometry::create_square;
use crate::shader::build_program;
use crate::transform::Transforms;

use super::{ProgramBindings, RenderConfig, RenderError};

/// The draw call that was submitted.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DrawCall {
    pub topology: Topology,
    pub first: i32,
    pub count: i32,
}

/// Draws the square once.
///
/// Steps run in a fixed order, each depending on state left by the previous:
/// 1. viewport + clear
/// 2. geometry, then program (abort on any build failure)
/// 3. attribute / uniform lookup
/// 4. enable the position attribute
/// 5. bind buffer and program
/// 6. describe the attribute layout
/// 7. upload view and projection (no transpose)
/// 8. one `drawArrays`
///
/// If the program fails to build nothing is bound and no draw is issued.
pub fn render_square<C: GlContext>(ctx: &C, config: &RenderConfig) -> Result<DrawCall, RenderError> {
    let viewport = config.viewport;
    if !viewport.is_valid() {
        return Err(RenderError::InvalidViewport { width: viewport.width, height: viewport.height });
    }

    let transforms = Transforms::for_viewport(viewport);

    ctx.viewport(0, 0, viewport.width as i32, viewport.height as i32);
    ctx.clear_color(config.clear_color);
    ctx.clear_color_buffer();

    let mesh = create_square(ctx)
        .map_err(|message| RenderError::Allocation { what: "vertex buffer", message })?;
    let program = build_program(ctx, &config.shaders)?;

    let bindings = ProgramBindings::resolve(ctx, &program);

    if let Some(index) = bindings.vertex_pos {
        ctx.enable_vertex_attrib_array(index);
    }

    ctx.bind_array_buffer(Some(mesh.buffer));
    program.bind(ctx);

    if let Some(index) = bindings.vertex_pos {
        ctx.vertex_attrib_pointer_f32(index, mesh.components, false, 0, 0);
    }

    ctx.uniform_matrix4(bindings.model_view.as_ref(), false, &transforms.view_cols());
    ctx.uniform_matrix4(bindings.projection.as_ref(), false, &transforms.projection_cols());

    let call = DrawCall { topology: mesh.topology, first: 0, count: mesh.vertex_count };
    ctx.draw_arrays(call.topology, call.first, call.count);

    log::info!(
        "drew {:?} with {} vertices at {}x{}",
        call.topology,
        call.count,
        viewport.width,
        viewport.height
    );
    Ok(call)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Viewport;
    use crate::device::{ClearColor, GlCall, RecordingContext};
    use crate::shader::{FRAGMENT_SOURCE, ShaderError, ShaderSources, ShaderStage, VERTEX_SOURCE};

    fn has_bind_or_draw(calls: &[GlCall]) -> bool {
        calls.iter().any(|c| {
            matches!(
                c,
                GlCall::UseProgram(_)
                    | GlCall::DrawArrays { .. }
                    | GlCall::EnableVertexAttribArray(_)
                    | GlCall::UniformMatrix4 { .. }
            )
        })
    }

    fn index_of(calls: &[GlCall], pred: impl Fn(&GlCall) -> bool) -> usize {
        calls.iter().position(|c| pred(c)).expect("call not recorded")
    }

    #[test]
    fn draws_strip_of_four_vertices() {
        let ctx = RecordingContext::new();
        let call = render_square(&ctx, &RenderConfig::default()).unwrap();

        assert_eq!(call, DrawCall { topology: Topology::TriangleStrip, first: 0, count: 4 });
        assert_eq!(
            ctx.draw_calls(),
            vec![GlCall::DrawArrays { topology: Topology::TriangleStrip, first: 0, count: 4 }]
        );
    }

    #[test]
    fn issues_steps_in_order() {
        let ctx = RecordingContext::new();
        render_square(&ctx, &RenderConfig::default()).unwrap();
        let calls = ctx.calls();

        let clear = index_of(&calls, |c| matches!(c, GlCall::ClearColorBuffer));
        let upload = index_of(&calls, |c| matches!(c, GlCall::ArrayBufferData { .. }));
        let link = index_of(&calls, |c| matches!(c, GlCall::LinkProgram(_)));
        let enable = index_of(&calls, |c| matches!(c, GlCall::EnableVertexAttribArray(0)));
        let use_program = index_of(&calls, |c| matches!(c, GlCall::UseProgram(Some(_))));
        let layout = index_of(&calls, |c| matches!(c, GlCall::VertexAttribPointer { .. }));
        let uniform = index_of(&calls, |c| matches!(c, GlCall::UniformMatrix4 { .. }));
        let draw = index_of(&calls, |c| matches!(c, GlCall::DrawArrays { .. }));

        assert!(clear < upload);
        assert!(upload < link);
        assert!(link < enable);
        assert!(enable < use_program);
        assert!(use_program < layout);
        assert!(layout < uniform);
        assert!(uniform < draw);
        assert_eq!(draw, calls.len() - 1);
    }

    #[test]
    fn configures_viewport_and_clear_color() {
        let ctx = RecordingContext::new();
        render_square(&ctx, &RenderConfig::default()).unwrap();
        let calls = ctx.calls();

        assert_eq!(calls[0], GlCall::Viewport { x: 0, y: 0, width: 800, height: 600 });
        assert_eq!(calls[1], GlCall::ClearColor(ClearColor::new(0.0, 0.0, 0.0, 1.0)));
        assert_eq!(calls[2], GlCall::ClearColorBuffer);
    }

    #[test]
    fn layout_is_three_unnormalized_floats() {
        let ctx = RecordingContext::new();
        render_square(&ctx, &RenderConfig::default()).unwrap();

        assert!(ctx.calls().contains(&GlCall::VertexAttribPointer {
            index: 0,
            components: 3,
            normalized: false,
            stride: 0,
            offset: 0,
        }));
    }

    #[test]
    fn uploads_both_matrices_untransposed() {
        let ctx = RecordingContext::new();
        render_square(&ctx, &RenderConfig::default()).unwrap();
        let transforms = Transforms::for_viewport(Viewport::new(800, 600));

        let uploads: Vec<_> = ctx
            .calls()
            .into_iter()
            .filter_map(|c| match c {
                GlCall::UniformMatrix4 { location, transpose, value } => Some((location, transpose, value)),
                _ => None,
            })
            .collect();

        assert_eq!(uploads.len(), 2);
        assert!(uploads.iter().all(|(loc, transpose, _)| loc.is_some() && !transpose));
        assert_eq!(uploads[0].2, transforms.view_cols());
        assert_eq!(uploads[1].2, transforms.projection_cols());
    }

    #[test]
    fn binds_linked_program() {
        let ctx = RecordingContext::new();
        render_square(&ctx, &RenderConfig::default()).unwrap();
        assert!(ctx.current_program().is_some());
    }

    #[test]
    fn link_failure_aborts_before_bind_or_draw() {
        let ctx = RecordingContext::new().failing_link();
        let err = render_square(&ctx, &RenderConfig::default()).unwrap_err();

        assert!(matches!(err, RenderError::Shader(ShaderError::Link { .. })));
        assert!(!has_bind_or_draw(&ctx.calls()));
        assert_eq!(ctx.current_program(), None);
    }

    #[test]
    fn missing_vertex_shader_never_links() {
        let ctx = RecordingContext::new().failing_compile(ShaderStage::Vertex);
        let err = render_square(&ctx, &RenderConfig::default()).unwrap_err();

        assert!(matches!(err, RenderError::Shader(ShaderError::Compile { stage: ShaderStage::Vertex, .. })));
        let calls = ctx.calls();
        assert!(!calls.iter().any(|c| matches!(c, GlCall::CreateProgram(_) | GlCall::LinkProgram(_))));
        assert!(!has_bind_or_draw(&calls));
    }

    #[test]
    fn invalid_viewport_is_rejected_up_front() {
        let ctx = RecordingContext::new();
        let config = RenderConfig::default().with_viewport(Viewport::new(800, 0));

        assert_eq!(
            render_square(&ctx, &config),
            Err(RenderError::InvalidViewport { width: 800, height: 0 })
        );
        assert!(ctx.calls().is_empty());
    }

    #[test]
    fn buffer_allocation_failure_aborts() {
        let ctx = RecordingContext::new().failing_buffer_creation();
        let err = render_square(&ctx, &RenderConfig::default()).unwrap_err();

        assert!(matches!(err, RenderError::Allocation { what: "vertex buffer", .. }));
        assert!(ctx.draw_calls().is_empty());
    }

    #[test]
    fn program_without_position_still_draws() {
        let ctx = RecordingContext::new();
        let mut config = RenderConfig::default();
        config.shaders = ShaderSources::new(
            "uniform mat4 modelViewMatrix;\nuniform mat4 projectionMatrix;\nvoid main() { gl_Position = projectionMatrix * modelViewMatrix * vec4(0.0); }",
            FRAGMENT_SOURCE,
        );

        render_square(&ctx, &config).unwrap();
        let calls = ctx.calls();
        assert!(!calls.iter().any(|c| matches!(c, GlCall::EnableVertexAttribArray(_) | GlCall::VertexAttribPointer { .. })));
        assert_eq!(ctx.draw_calls().len(), 1);
    }

    // ── shader text variants ──────────────────────────────────────────────

    fn config_with_vertex(vertex: String) -> RenderConfig {
        let mut config = RenderConfig::default();
        config.shaders = ShaderSources::new(vertex, FRAGMENT_SOURCE);
        config
    }

    fn uniform_locations(ctx: &RecordingContext) -> Vec<Option<u32>> {
        ctx.calls()
            .into_iter()
            .filter_map(|c| match c {
                GlCall::UniformMatrix4 { location, .. } => Some(location),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn preprocessor_preamble_keeps_position_attribute() {
        let ctx = RecordingContext::new();
        let vertex = format!("#version 100\n#ifdef GL_ES\nprecision mediump float;\n#endif\n{VERTEX_SOURCE}");

        render_square(&ctx, &config_with_vertex(vertex)).unwrap();
        let calls = ctx.calls();
        assert!(calls.contains(&GlCall::EnableVertexAttribArray(0)));
        assert!(calls.iter().any(|c| matches!(c, GlCall::VertexAttribPointer { index: 0, .. })));
    }

    #[test]
    fn shared_uniform_declaration_resolves_both_matrices() {
        let ctx = RecordingContext::new();
        let vertex = "attribute vec3 vertexPos;\nuniform mat4 modelViewMatrix, projectionMatrix;\nvoid main() { gl_Position = projectionMatrix * modelViewMatrix * vec4(vertexPos, 1.0); }";

        render_square(&ctx, &config_with_vertex(vertex.to_string())).unwrap();
        assert_eq!(uniform_locations(&ctx), vec![Some(0), Some(1)]);
    }

    #[test]
    fn block_comment_with_paren_compiles() {
        let ctx = RecordingContext::new();
        let vertex = format!("/* see (notes */\n{VERTEX_SOURCE}");

        let call = render_square(&ctx, &config_with_vertex(vertex)).unwrap();
        assert_eq!(call.count, 4);
        assert_eq!(uniform_locations(&ctx), vec![Some(0), Some(1)]);
    }
}
