//! Shapes as seen by the fog pipeline: geometry, ownership and auras.

mod access;
mod aura;
mod store;

pub use access::{Access, ShapeOwner, Viewer};
pub use aura::Aura;
pub use store::ShapeStore;

use gloam_engine::coords::{Circle, Rect, Vec2, Viewport};
use gloam_engine::paint::{Color, Paint};
use gloam_engine::raster::BlendOp;
use gloam_engine::scene::{CircleCmd, DrawCmd, PolygonCmd, RectCmd};

use crate::ids::{AuraId, FloorId, ShapeId};
use crate::units::ViewTransform;

/// World-space outline of a shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Rect(Rect),
    Circle(Circle),
    /// Closed outline; last point connects back to the first.
    Polygon(Vec<Vec2>),
}

/// Per-shape switches.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct ShapeOptions {
    /// Painted by the fog layer itself, before the fog tint.
    pub pre_fog_shape: bool,
    /// Never painted by its layer.
    pub skip_draw: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub id: ShapeId,
    pub floor: FloorId,
    /// Name of the layer the shape lives on.
    pub layer: String,
    pub geometry: Geometry,
    pub fill: Color,
    /// Composite operation used when the shape is painted.
    pub blend: BlendOp,
    pub is_token: bool,
    pub options: ShapeOptions,
    /// Access every player gets, on top of `owners`.
    pub default_access: Access,
    pub owners: Vec<ShapeOwner>,
    pub auras: Vec<Aura>,
}

impl Shape {
    pub fn new(id: ShapeId, floor: FloorId, layer: impl Into<String>, geometry: Geometry) -> Self {
        Self {
            id,
            floor,
            layer: layer.into(),
            geometry,
            fill: Color::black(),
            blend: BlendOp::SourceOver,
            is_token: false,
            options: ShapeOptions::default(),
            default_access: Access::NONE,
            owners: Vec::new(),
            auras: Vec::new(),
        }
    }

    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = fill;
        self
    }

    pub fn with_blend(mut self, blend: BlendOp) -> Self {
        self.blend = blend;
        self
    }

    pub fn token(mut self) -> Self {
        self.is_token = true;
        self
    }

    pub fn pre_fog(mut self) -> Self {
        self.options.pre_fog_shape = true;
        self
    }

    pub fn with_owner(mut self, owner: ShapeOwner) -> Self {
        self.owners.push(owner);
        self
    }

    pub fn with_aura(mut self, aura: Aura) -> Self {
        self.auras.push(aura);
        self
    }

    pub fn aura(&self, id: AuraId) -> Option<&Aura> {
        self.auras.iter().find(|a| a.id == id)
    }

    /// World-space center. Polygons use the vertex average.
    pub fn center(&self) -> Vec2 {
        match &self.geometry {
            Geometry::Rect(r) => r.center(),
            Geometry::Circle(c) => c.center,
            Geometry::Polygon(points) => Vec2::centroid(points).unwrap_or_default(),
        }
    }

    /// World-space bounding box.
    pub fn bounding_box(&self) -> Rect {
        match &self.geometry {
            Geometry::Rect(r) => *r,
            Geometry::Circle(c) => c.bounding_box(),
            Geometry::Polygon(points) => Rect::bounding(points).unwrap_or_default(),
        }
    }

    /// Whether `viewer` holds at least `need` on this shape.
    pub fn owned_by(&self, viewer: &Viewer, need: Access) -> bool {
        viewer.is_dm
            || self.default_access.covers(need)
            || self.owners.iter().any(|o| o.user == viewer.name && o.access.covers(need))
    }

    /// Whether any part of the shape's bounding box is on screen.
    pub fn visible_in_canvas(&self, viewport: Viewport, transform: &ViewTransform) -> bool {
        transform.rect_in_view(self.bounding_box(), viewport)
    }

    /// Raster-space fill command for the shape's outline.
    pub fn draw_cmd(&self, transform: &ViewTransform) -> DrawCmd {
        let paint = Paint::Solid(self.fill);
        match &self.geometry {
            Geometry::Rect(r) => RectCmd::new(transform.g2l_rect(*r), paint).into(),
            Geometry::Circle(c) => {
                CircleCmd::new(transform.g2l(c.center), transform.g2lz(c.radius), paint).into()
            }
            Geometry::Polygon(points) => {
                PolygonCmd::new(points.iter().map(|p| transform.g2l(*p)).collect(), paint).into()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(id: u64) -> Shape {
        Shape::new(ShapeId(id), FloorId(0), "tokens", Geometry::Rect(Rect::new(0.0, 0.0, 50.0, 50.0)))
    }

    // ── ownership ─────────────────────────────────────────────────────────

    #[test]
    fn dm_owns_everything() {
        assert!(square(1).owned_by(&Viewer::dm("gm"), Access::FULL));
    }

    #[test]
    fn owner_needs_matching_permission() {
        let s = square(1).with_owner(ShapeOwner::new(
            "ana",
            Access { edit: true, movement: true, vision: false },
        ));
        assert!(s.owned_by(&Viewer::player("ana"), Access { edit: true, ..Access::NONE }));
        assert!(!s.owned_by(&Viewer::player("ana"), Access::VISION));
        assert!(!s.owned_by(&Viewer::player("bo"), Access { edit: true, ..Access::NONE }));
    }

    #[test]
    fn default_access_applies_to_everyone() {
        let mut s = square(1);
        s.default_access = Access::VISION;
        assert!(s.owned_by(&Viewer::player("anyone"), Access::VISION));
    }

    // ── geometry ──────────────────────────────────────────────────────────

    #[test]
    fn centers_and_bounds() {
        assert_eq!(square(1).center(), Vec2::new(25.0, 25.0));
        let tri = Shape::new(
            ShapeId(2),
            FloorId(0),
            "map",
            Geometry::Polygon(vec![Vec2::new(0.0, 0.0), Vec2::new(6.0, 0.0), Vec2::new(0.0, 6.0)]),
        );
        assert_eq!(tri.center(), Vec2::new(2.0, 2.0));
        assert_eq!(tri.bounding_box(), Rect::new(0.0, 0.0, 6.0, 6.0));
    }

    #[test]
    fn visibility_follows_pan() {
        let vp = Viewport::new(100.0, 100.0);
        let s = square(1);
        assert!(s.visible_in_canvas(vp, &ViewTransform::default()));
        let away = ViewTransform { pan: Vec2::new(-500.0, 0.0), ..ViewTransform::default() };
        assert!(!s.visible_in_canvas(vp, &away));
    }

    #[test]
    fn draw_cmd_is_in_raster_space() {
        let t = ViewTransform { zoom: 2.0, ..ViewTransform::default() };
        let DrawCmd::Rect(cmd) = square(1).draw_cmd(&t) else { panic!("expected rect") };
        assert_eq!(cmd.rect, Rect::new(0.0, 0.0, 100.0, 100.0));
    }
}
