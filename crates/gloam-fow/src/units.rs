//! World ↔ raster coordinate conversion.
//!
//! World space is the map's coordinate system; raster space is the pixel grid
//! of the viewport-sized fog surfaces. Aura radii are authored in game units
//! (feet, metres, ...) and go through [`ViewTransform::unit_distance`] first.

use gloam_engine::coords::{Circle, Rect, Vec2, Viewport};

/// Pan/zoom state plus the grid scale.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewTransform {
    pub zoom: f32,
    /// World-space offset applied before zooming.
    pub pan: Vec2,
    /// Game units per grid cell.
    pub unit_size: f32,
    /// World units per grid cell.
    pub grid_size: f32,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self { zoom: 1.0, pan: Vec2::ZERO, unit_size: 5.0, grid_size: 50.0 }
    }
}

impl ViewTransform {
    /// A transform is usable when zoom and both scales are positive and finite.
    pub fn is_valid(&self) -> bool {
        [self.zoom, self.unit_size, self.grid_size].iter().all(|v| v.is_finite() && *v > 0.0)
            && self.pan.is_finite()
    }

    #[inline]
    pub fn g2lx(&self, x: f32) -> f32 {
        (x + self.pan.x) * self.zoom
    }

    #[inline]
    pub fn g2ly(&self, y: f32) -> f32 {
        (y + self.pan.y) * self.zoom
    }

    /// World point to raster point.
    #[inline]
    pub fn g2l(&self, p: Vec2) -> Vec2 {
        Vec2::new(self.g2lx(p.x), self.g2ly(p.y))
    }

    /// World length to raster length.
    #[inline]
    pub fn g2lz(&self, z: f32) -> f32 {
        z * self.zoom
    }

    /// Game units to world units.
    #[inline]
    pub fn unit_distance(&self, value: f32) -> f32 {
        value / self.unit_size * self.grid_size
    }

    /// Game units to raster length.
    #[inline]
    pub fn g2lr(&self, value: f32) -> f32 {
        self.g2lz(self.unit_distance(value))
    }

    /// Raster point back to world space.
    #[inline]
    pub fn l2g(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.x / self.zoom - self.pan.x, p.y / self.zoom - self.pan.y)
    }

    /// World rectangle to raster rectangle.
    pub fn g2l_rect(&self, r: Rect) -> Rect {
        Rect::from_corners(self.g2l(r.min), self.g2l(r.max))
    }

    /// Whether a world-space rectangle touches the visible raster area.
    pub fn rect_in_view(&self, r: Rect, viewport: Viewport) -> bool {
        self.g2l_rect(r).overlaps(viewport.bounds())
    }

    /// Whether a world-space circle's bounding box touches the visible raster area.
    pub fn circle_in_view(&self, c: Circle, viewport: Viewport) -> bool {
        self.rect_in_view(c.bounding_box(), viewport)
    }
}
