use vello_cpu::kurbo::Point;
use vello_cpu::peniko::Gradient;

use crate::coords::Vec2;

use super::Color;

/// Light falloff: a concentric radial ramp from `inner` to `outer`.
///
/// Everything within `inner_radius` takes `inner`, the band up to
/// `outer_radius` blends linearly, and everything beyond takes `outer`. When
/// the band has no width the falloff is a hard edge at `inner_radius`.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub center: Vec2,
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub inner: Color,
    pub outer: Color,
}

impl RadialGradient {
    pub fn falloff(center: Vec2, inner_radius: f32, outer_radius: f32, inner: Color, outer: Color) -> Self {
        Self { center, inner_radius, outer_radius, inner, outer }
    }

    #[inline]
    pub fn is_hard_edge(&self) -> bool {
        self.outer_radius - self.inner_radius <= 0.0
    }

    /// Two-point radial gradient with shared centres, padded at both ends.
    pub(crate) fn to_cpu(&self) -> Gradient {
        let center = Point::new(f64::from(self.center.x), f64::from(self.center.y));
        Gradient::new_two_point_radial(center, self.inner_radius.max(0.0), center, self.outer_radius)
            .with_stops([self.inner.to_cpu(), self.outer.to_cpu()])
    }
}
