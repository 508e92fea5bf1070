/// Drawable size in pixels.
///
/// Drives both the context viewport and the projection aspect ratio.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0 && self.width <= i32::MAX as u32 && self.height <= i32::MAX as u32
    }

    /// Width over height.
    #[inline]
    pub fn aspect(self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800, 600)
    }
}
