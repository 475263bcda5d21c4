//! Fill commands understood by [`Surface::draw`](crate::raster::Surface::draw).
//!
//! Responsibilities:
//! - describe geometry in raster space together with its paint
//! - turn each shape into a `kurbo` outline, one shape per file under `scene::shapes`

mod cmd;

pub mod shapes;

pub use cmd::DrawCmd;
pub use shapes::{CircleCmd, PolygonCmd, RectCmd};
