//! Fixed camera transforms.
//!
//! The camera sits at the origin looking down -Z; "moving it back" is done by
//! translating the world forward.

use std::f32::consts::FRAC_PI_4;

use glam::{Mat4, Vec3};

use crate::coords::Viewport;

/// World translation applied by the view matrix.
pub const CAMERA_OFFSET: Vec3 = Vec3::new(0.0, 0.0, -5.0);
/// Vertical field of view, radians.
pub const FOV_Y: f32 = FRAC_PI_4;
pub const Z_NEAR: f32 = 1.0;
pub const Z_FAR: f32 = 1000.0;

/// View and projection matrices, computed once per viewport.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transforms {
    pub view: Mat4,
    pub projection: Mat4,
}

impl Transforms {
    pub fn for_viewport(viewport: Viewport) -> Self {
        Self {
            view: Mat4::from_translation(CAMERA_OFFSET),
            projection: Mat4::perspective_rh_gl(FOV_Y, viewport.aspect(), Z_NEAR, Z_FAR),
        }
    }

    /// Column-major view matrix, as `uniformMatrix4fv` expects without transpose.
    #[inline]
    pub fn view_cols(&self) -> [f32; 16] {
        self.view.to_cols_array()
    }

    #[inline]
    pub fn projection_cols(&self) -> [f32; 16] {
        self.projection.to_cols_array()
    }
}

impl Default for Transforms {
    fn default() -> Self {
        Self::for_viewport(Viewport::default())
    }
}
