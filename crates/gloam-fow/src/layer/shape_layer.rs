use gloam_engine::coords::Viewport;
use gloam_engine::raster::Surface;

use crate::ids::{FloorId, ShapeId};
use crate::shape::Shape;

use super::DrawCtx;

/// Base layer: an ordered list of shapes painted onto one surface.
///
/// Shapes themselves live in the [`ShapeStore`](crate::shape::ShapeStore);
/// the layer owns only their ids, in paint order.
#[derive(Debug)]
pub struct ShapeLayer {
    name: String,
    floor: FloorId,
    pub(crate) surface: Surface,
    shapes: Vec<ShapeId>,
    pub(crate) valid: bool,
    pub(crate) displayed: bool,
}

impl ShapeLayer {
    pub fn new(name: impl Into<String>, floor: FloorId, viewport: Viewport) -> Self {
        Self {
            name: name.into(),
            floor,
            surface: Surface::for_viewport(viewport),
            shapes: Vec::new(),
            valid: false,
            displayed: true,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn floor(&self) -> FloorId {
        self.floor
    }

    #[inline]
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Shape ids in paint order.
    #[inline]
    pub fn shape_ids(&self) -> &[ShapeId] {
        &self.shapes
    }

    #[inline]
    pub fn contains(&self, id: ShapeId) -> bool {
        self.shapes.contains(&id)
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    #[inline]
    pub fn is_displayed(&self) -> bool {
        self.displayed
    }

    #[inline]
    pub fn invalidate(&mut self) {
        self.valid = false;
    }

    pub(crate) fn resize(&mut self, viewport: Viewport) {
        self.surface.resize(viewport);
        self.valid = false;
    }

    /// Appends `shape` to the paint order. Returns `false` if it was already present.
    pub fn add_shape(&mut self, shape: &Shape) -> bool {
        if self.contains(shape.id) {
            return false;
        }
        self.shapes.push(shape.id);
        self.valid = false;
        true
    }

    /// Removes `shape`. Returns `false` if it was not on this layer.
    pub fn remove_shape(&mut self, shape: &Shape) -> bool {
        let Some(idx) = self.shapes.iter().position(|id| *id == shape.id) else {
            return false;
        };
        self.shapes.remove(idx);
        self.valid = false;
        true
    }

    /// Paints every shape and marks the layer valid.
    ///
    /// `clear` wipes the surface first; the fog layer passes `false` to paint
    /// on top of what it has already composed.
    pub fn draw(&mut self, ctx: &DrawCtx<'_>, clear: bool) {
        self.draw_with(ctx, clear, |_| true);
    }

    /// Like [`draw`](Self::draw), restricted to shapes accepted by `include`.
    pub(crate) fn draw_with(&mut self, ctx: &DrawCtx<'_>, clear: bool, include: impl Fn(&Shape) -> bool) {
        if self.valid {
            return;
        }
        if clear {
            self.surface.clear();
        }

        for id in &self.shapes {
            let Some(shape) = ctx.shapes.get(*id) else {
                log::trace!("{}: {id} is not registered, skipping", self.name);
                continue;
            };
            if shape.options.skip_draw || !include(shape) {
                continue;
            }
            if !shape.visible_in_canvas(ctx.viewport, ctx.transform) {
                continue;
            }
            self.surface.draw(&shape.draw_cmd(ctx.transform), shape.blend);
        }

        self.valid = true;
    }
}
