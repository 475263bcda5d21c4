//! Paint model shared by the rasterizer and the fog layers.
//!
//! Scope:
//! - color representation (premultiplied alpha)
//! - paint sources (solid fill, radial light falloff)
//!
//! Geometry types remain in `coords`.

pub mod color;
pub mod gradient;

pub use color::{Color, ColorParseError};
pub use gradient::RadialGradient;

/// Paint source for filling geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    RadialGradient(RadialGradient),
}

impl Paint {
    /// Hands the paint to a `vello_cpu` context. A hard-edged falloff is its
    /// inner colour; the filled disc supplies the edge.
    pub(crate) fn apply_to(&self, ctx: &mut vello_cpu::RenderContext) {
        match self {
            Paint::Solid(c) => ctx.set_paint(c.to_cpu()),
            Paint::RadialGradient(g) if g.is_hard_edge() => ctx.set_paint(g.inner.to_cpu()),
            Paint::RadialGradient(g) => ctx.set_paint(g.to_cpu()),
        }
    }
}
