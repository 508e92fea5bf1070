//! Static vertex data uploaded to the context.

mod square;

pub use square::{Mesh, SQUARE_VERTICES, create_square};
