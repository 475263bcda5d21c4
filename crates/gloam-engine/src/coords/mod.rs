//! Coordinate and geometry types shared by the rasterizer and the fog layers.
//!
//! Canonical raster space:
//! - Pixels of the viewport-sized surfaces
//! - Origin top-left
//! - +X right, +Y down
//!
//! World space lives one level up (see `gloam_fow::units`); everything in this
//! module is unit-agnostic and is used for both.

mod circle;
mod rect;
mod vec2;
mod viewport;

pub use circle::Circle;
pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
