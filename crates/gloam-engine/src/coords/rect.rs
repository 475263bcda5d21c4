use super::Vec2;

/// Axis-aligned box stored as ordered corners (`min <= max` on both axes).
///
/// Map rectangles, shape bounding boxes and the visible area all use it. The
/// constructors reorder swapped corners, so a box is never inside-out.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Box with top-left corner `(x, y)` and size `w x h`. Negative sizes
    /// extend up or left.
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self::from_corners(Vec2::new(x, y), Vec2::new(x + w, y + h))
    }

    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        Self {
            min: Vec2::new(a.x.min(b.x), a.y.min(b.y)),
            max: Vec2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Smallest box around `points`, or `None` for an empty slice.
    pub fn bounding(points: &[Vec2]) -> Option<Rect> {
        let (first, rest) = points.split_first()?;
        Some(rest.iter().fold(Rect::from_corners(*first, *first), |acc, p| Rect {
            min: Vec2::new(acc.min.x.min(p.x), acc.min.y.min(p.y)),
            max: Vec2::new(acc.max.x.max(p.x), acc.max.y.max(p.y)),
        }))
    }

    #[inline]
    pub fn width(self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(self) -> f32 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        Vec2::new((self.min.x + self.max.x) * 0.5, (self.min.y + self.max.y) * 0.5)
    }

    /// Outline starting top-left, clockwise on a y-down raster.
    pub fn corners(self) -> [Vec2; 4] {
        [self.min, Vec2::new(self.max.x, self.min.y), self.max, Vec2::new(self.min.x, self.max.y)]
    }

    pub fn translate(self, by: Vec2) -> Self {
        Self { min: self.min + by, max: self.max + by }
    }

    /// Closed-edge test: boxes sharing only an edge or a corner overlap.
    ///
    /// Culling relies on this so a zero-size light on the viewport border is
    /// still drawn.
    pub fn overlaps(self, other: Rect) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }

    pub fn to_kurbo(self) -> kurbo::Rect {
        kurbo::Rect::from_points(self.min.to_point(), self.max.to_point())
    }
}
