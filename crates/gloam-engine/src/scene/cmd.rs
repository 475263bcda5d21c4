use kurbo::BezPath;

use crate::paint::Paint;
use crate::scene::shapes::{CircleCmd, PolygonCmd, RectCmd};

/// Curve flattening tolerance in raster pixels.
pub(crate) const PATH_TOLERANCE: f64 = 0.1;

/// Renderer-agnostic fill command.
///
/// Extending the scene:
/// - add a new shape module under `scene::shapes::*`
/// - add a new variant here
/// - give it an outline in `to_path`
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Rect(RectCmd),
    Circle(CircleCmd),
    Polygon(PolygonCmd),
}

impl DrawCmd {
    #[inline]
    pub fn paint(&self) -> &Paint {
        match self {
            DrawCmd::Rect(c) => &c.paint,
            DrawCmd::Circle(c) => &c.paint,
            DrawCmd::Polygon(c) => &c.paint,
        }
    }

    /// Outline in raster space, filled with the non-zero rule. Empty when the
    /// command covers nothing.
    pub fn to_path(&self) -> BezPath {
        match self {
            DrawCmd::Rect(c) => c.to_path(),
            DrawCmd::Circle(c) => c.to_path(),
            DrawCmd::Polygon(c) => c.to_path(),
        }
    }
}

impl From<RectCmd> for DrawCmd {
    fn from(c: RectCmd) -> Self {
        DrawCmd::Rect(c)
    }
}

impl From<CircleCmd> for DrawCmd {
    fn from(c: CircleCmd) -> Self {
        DrawCmd::Circle(c)
    }
}

impl From<PolygonCmd> for DrawCmd {
    fn from(c: PolygonCmd) -> Self {
        DrawCmd::Polygon(c)
    }
}
