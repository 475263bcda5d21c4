use kurbo::{BezPath, Shape};

use crate::coords::Rect;
use crate::paint::Paint;
use crate::scene::cmd::PATH_TOLERANCE;

/// Rectangle fill payload.
#[derive(Debug, Clone, PartialEq)]
pub struct RectCmd {
    pub rect: Rect,
    pub paint: Paint,
}

impl RectCmd {
    #[inline]
    pub fn new(rect: Rect, paint: Paint) -> Self {
        Self { rect, paint }
    }

    pub(crate) fn to_path(&self) -> BezPath {
        self.rect.to_kurbo().to_path(PATH_TOLERANCE)
    }
}
