use core::ops::{Add, Sub};

/// A point or offset on the map plane.
///
/// The same type carries world coordinates (map units) and raster coordinates
/// (surface pixels); `gloam_fow::units::ViewTransform` converts between them.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2::new(0.0, 0.0);

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Vertex average, the anchor used for polygon tokens. `None` when empty.
    pub fn centroid(points: &[Vec2]) -> Option<Vec2> {
        if points.is_empty() {
            return None;
        }
        let n = points.len() as f32;
        let (sx, sy) = points.iter().fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        Some(Vec2::new(sx / n, sy / n))
    }

    /// Raster point in the `f64` space the path builder works in.
    #[inline]
    pub fn to_point(self) -> kurbo::Point {
        kurbo::Point::new(f64::from(self.x), f64::from(self.y))
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, by: Vec2) -> Vec2 {
        Vec2::new(self.x + by.x, self.y + by.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, by: Vec2) -> Vec2 {
        Vec2::new(self.x - by.x, self.y - by.y)
    }
}
