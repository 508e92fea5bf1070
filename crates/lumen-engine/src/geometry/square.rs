use crate::device::{BufferUsage, GlContext, Topology};

/// Unit square spanning [-1, 1] in X and Y at Z = 0, in strip order.
pub const SQUARE_VERTICES: [f32; 12] = [
    -1.0, -1.0, 0.0, //
    1.0, -1.0, 0.0, //
    -1.0, 1.0, 0.0, //
    1.0, 1.0, 0.0, //
];

/// A vertex buffer plus how to draw it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mesh<B> {
    pub buffer: B,
    /// Floats per vertex.
    pub components: i32,
    pub vertex_count: i32,
    pub topology: Topology,
}

/// Allocates a buffer, binds it to `ARRAY_BUFFER` and uploads [`SQUARE_VERTICES`].
///
/// Each call creates a new buffer; nothing is cached.
pub fn create_square<C: GlContext>(ctx: &C) -> Result<Mesh<C::Buffer>, String> {
    let buffer = ctx.create_buffer()?;
    ctx.bind_array_buffer(Some(buffer));
    ctx.array_buffer_data(bytemuck::cast_slice(&SQUARE_VERTICES), BufferUsage::StaticDraw);

    Ok(Mesh {
        buffer,
        components: 3,
        vertex_count: (SQUARE_VERTICES.len() / 3) as i32,
        topology: Topology::TriangleStrip,
    })
}
