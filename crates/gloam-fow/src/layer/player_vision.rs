use gloam_engine::coords::Viewport;
use gloam_engine::paint::{Color, Paint};
use gloam_engine::raster::BlendOp;
use gloam_engine::scene::PolygonCmd;

use crate::ids::FloorId;
use crate::shape::Access;
use crate::vision::TriangulationTarget;

use super::{DrawCtx, ShapeLayer, TOKENS_LAYER};

/// The `fow-players` layer: what the viewer's own tokens can see.
///
/// Never displayed. The fog layer of the same floor reads it as a
/// line-of-sight mask.
#[derive(Debug)]
pub struct PlayerVisionLayer {
    base: ShapeLayer,
}

impl PlayerVisionLayer {
    pub fn new(name: impl Into<String>, floor: FloorId, viewport: Viewport) -> Self {
        let mut base = ShapeLayer::new(name, floor, viewport);
        base.displayed = false;
        Self { base }
    }

    #[inline]
    pub fn base(&self) -> &ShapeLayer {
        &self.base
    }

    #[inline]
    pub fn base_mut(&mut self) -> &mut ShapeLayer {
        &mut self.base
    }

    /// Unions the visibility polygons of every token on this floor the viewer
    /// has vision on. Left empty while line of sight is off.
    pub fn draw(&mut self, ctx: &DrawCtx<'_>) {
        if self.base.valid {
            return;
        }
        self.base.surface.clear();
        self.base.displayed = false;

        let floor = self.base.floor();
        let mut seen = 0;
        if ctx.settings.fow_los {
            if let Some(tokens) = ctx.layers.get(floor, TOKENS_LAYER) {
                for id in tokens.base().shape_ids() {
                    let Some(shape) = ctx.shapes.get(*id) else { continue };
                    if !shape.is_token || !shape.owned_by(ctx.viewer, Access::VISION) {
                        continue;
                    }
                    let polygon = ctx.oracle.compute_visibility(shape.center(), TriangulationTarget::Vision, floor);
                    if polygon.is_empty() {
                        continue;
                    }
                    let outline = polygon.iter().map(|p| ctx.transform.g2l(*p)).collect();
                    self.base
                        .surface
                        .draw(&PolygonCmd::new(outline, Paint::Solid(Color::black())).into(), BlendOp::SourceOver);
                    seen += 1;
                }
            }
        }

        self.base.draw_with(ctx, false, |_| true);
        log::debug!("{} on {floor}: {seen} token view(s)", self.base.name());
    }
}
