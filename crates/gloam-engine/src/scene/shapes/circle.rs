use kurbo::{BezPath, Shape};

use crate::coords::Vec2;
use crate::paint::Paint;
use crate::scene::cmd::PATH_TOLERANCE;

/// Circle (full arc) fill payload.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleCmd {
    pub center: Vec2,
    pub radius: f32,
    pub paint: Paint,
}

impl CircleCmd {
    #[inline]
    pub fn new(center: Vec2, radius: f32, paint: Paint) -> Self {
        Self { center, radius, paint }
    }

    pub(crate) fn to_path(&self) -> BezPath {
        if self.radius <= 0.0 {
            return BezPath::new();
        }
        kurbo::Circle::new(self.center.to_point(), f64::from(self.radius)).to_path(PATH_TOLERANCE)
    }
}
