use super::Rect;

/// Size of the visible raster area in pixels.
///
/// Every fog surface is allocated at this size; anything outside
/// `[0, width) x [0, height)` is off-screen and may be skipped.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// The visible area as a rectangle anchored at the origin.
    #[inline]
    pub fn bounds(self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// Whole-pixel dimensions used to allocate surfaces.
    ///
    /// Invalid viewports produce a zero-sized surface.
    #[inline]
    pub fn pixel_size(self) -> (u32, u32) {
        if !self.is_valid() {
            return (0, 0);
        }
        (self.width.ceil() as u32, self.height.ceil() as u32)
    }
}
