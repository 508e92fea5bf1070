//! Coordinate-space primitives.

mod viewport;

pub use viewport::Viewport;
