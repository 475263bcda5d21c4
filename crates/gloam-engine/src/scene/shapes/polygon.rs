use kurbo::BezPath;

use crate::coords::Vec2;
use crate::paint::Paint;

/// Closed polygon fill payload, typically a visibility polygon.
///
/// The last point is implicitly connected back to the first. Filling uses the
/// non-zero winding rule, matching canvas `fill()`.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonCmd {
    pub points: Vec<Vec2>,
    pub paint: Paint,
}

impl PolygonCmd {
    #[inline]
    pub fn new(points: Vec<Vec2>, paint: Paint) -> Self {
        Self { points, paint }
    }

    /// Fewer than three points enclose nothing and give an empty path.
    pub(crate) fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let [first, rest @ ..] = self.points.as_slice() else {
            return path;
        };
        if rest.len() < 2 {
            return path;
        }
        path.move_to(first.to_point());
        for p in rest {
            path.line_to(p.to_point());
        }
        path.close_path();
        path
    }
}
