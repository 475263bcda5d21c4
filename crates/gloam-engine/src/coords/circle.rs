use super::{Rect, Vec2};

/// Disc given by center and radius: light reach, token vision, round tokens.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    #[inline]
    pub const fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Enclosing box. A negative radius counts as zero.
    pub fn bounding_box(self) -> Rect {
        let r = Vec2::new(self.radius.max(0.0), self.radius.max(0.0));
        Rect::from_corners(self.center - r, self.center + r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounding_box_is_centered() {
        let c = Circle::new(Vec2::new(10.0, 20.0), 5.0);
        assert_eq!(c.bounding_box(), Rect::new(5.0, 15.0, 10.0, 10.0));
    }

    #[test]
    fn negative_radius_collapses_to_point() {
        let c = Circle::new(Vec2::new(3.0, 4.0), -2.0);
        assert_eq!(c.bounding_box().width(), 0.0);
        assert_eq!(c.bounding_box().center(), c.center);
    }
}
