use std::collections::HashMap;

use gloam_engine::coords::{Circle, Viewport};
use gloam_engine::paint::{Color, Paint, RadialGradient};
use gloam_engine::raster::{BlendOp, Surface};
use gloam_engine::scene::{CircleCmd, PolygonCmd};

use crate::ids::{FloorId, ShapeId};
use crate::shape::{Access, Shape};
use crate::vision::TriangulationTarget;

use super::{DrawCtx, ShapeLayer, MAP_LAYER, PLAYER_VISION_LAYER, TOKENS_LAYER};

/// Share of a token's half width that always stays revealed in full-fog mode.
const TOKEN_VISION_SCALE: f32 = 0.8;

/// Ids of the layer's pre-fog shapes, in insertion (= paint) order.
///
/// Only [`FowLightingLayer::add_shape`] / [`FowLightingLayer::remove_shape`]
/// touch it, together with the base collection, so every id here is also on
/// the base layer.
#[derive(Debug, Default)]
struct PreFogIndex {
    order: Vec<ShapeId>,
    positions: HashMap<ShapeId, usize>,
}

impl PreFogIndex {
    fn position(&self, id: ShapeId) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    fn push(&mut self, id: ShapeId) {
        self.positions.insert(id, self.order.len());
        self.order.push(id);
    }

    fn remove_at(&mut self, idx: usize) {
        let id = self.order.remove(idx);
        self.positions.remove(&id);
        for (i, later) in self.order.iter().enumerate().skip(idx) {
            self.positions.insert(*later, i);
        }
    }

    fn iter(&self) -> impl Iterator<Item = ShapeId> + '_ {
        self.order.iter().copied()
    }
}

/// Blend a pre-fog shape is painted with.
///
/// Outside full-fog mode the layer holds reveals rather than darkness, so
/// "paint" and "erase" swap meaning. Other operations are used as configured.
pub fn pre_fog_blend(configured: BlendOp, full_fow: bool) -> BlendOp {
    if full_fow {
        return configured;
    }
    match configured {
        BlendOp::SourceOver => BlendOp::DestinationOut,
        BlendOp::DestinationOut => BlendOp::SourceOver,
        other => other,
    }
}

/// The `fow` layer: per-floor fog mask built from lights, visibility polygons,
/// lower floors and hand-placed pre-fog shapes.
///
/// Opaque pixels of the finished surface are fog; transparent pixels are
/// revealed.
#[derive(Debug)]
pub struct FowLightingLayer {
    base: ShapeLayer,
    /// Per-light accumulation buffer, same size as the visible surface.
    scratch: Surface,
    pre_fog: PreFogIndex,
}

impl FowLightingLayer {
    pub fn new(name: impl Into<String>, floor: FloorId, viewport: Viewport) -> Self {
        Self {
            base: ShapeLayer::new(name, floor, viewport),
            scratch: Surface::for_viewport(viewport),
            pre_fog: PreFogIndex::default(),
        }
    }

    #[inline]
    pub fn base(&self) -> &ShapeLayer {
        &self.base
    }

    #[inline]
    pub fn base_mut(&mut self) -> &mut ShapeLayer {
        &mut self.base
    }

    /// Pre-fog shape ids in paint order.
    pub fn pre_fog_shapes(&self) -> impl Iterator<Item = ShapeId> + '_ {
        self.pre_fog.iter()
    }

    pub(crate) fn resize(&mut self, viewport: Viewport) {
        self.base.resize(viewport);
        self.scratch.resize(viewport);
    }

    /// Adds `shape` to the layer; pre-fog shapes are also queued for the pre-fog pass.
    pub fn add_shape(&mut self, shape: &Shape) -> bool {
        let added = self.base.add_shape(shape);
        if added && shape.options.pre_fog_shape {
            self.pre_fog.push(shape.id);
        }
        added
    }

    /// Removes `shape`. The pre-fog queue only changes if the base removal succeeded.
    pub fn remove_shape(&mut self, shape: &Shape) -> bool {
        let idx = if shape.options.pre_fog_shape { self.pre_fog.position(shape.id) } else { None };
        let removed = self.base.remove_shape(shape);
        if let (true, Some(idx)) = (removed, idx) {
            self.pre_fog.remove_at(idx);
        }
        removed
    }

    /// Rebuilds the fog mask. No-op while the layer is valid.
    pub fn draw(&mut self, ctx: &DrawCtx<'_>) {
        if self.base.valid {
            return;
        }

        let active = ctx.active_floor() == Some(self.base.floor());
        self.base.surface.clear();
        self.base.displayed = active;

        if active && ctx.floors.len() > 1 {
            self.stack_floors(ctx);
        }
        if ctx.settings.full_fow {
            self.draw_token_vision(ctx);
        }
        let lit = self.draw_lights(ctx);
        if active && ctx.settings.fow_los {
            self.gate_line_of_sight(ctx);
        }
        self.draw_pre_fog(ctx);
        if active && ctx.settings.full_fow {
            self.base
                .surface
                .fill_all(&Paint::Solid(ctx.settings.fog_colour()), BlendOp::SourceOut);
        }

        self.base.draw_with(ctx, false, |s| !s.options.pre_fog_shape);
        log::debug!("{} on {}: {lit} light(s), active={active}", self.base.name(), self.base.floor());
    }

    /// Lower floors show through wherever the floors above have no map.
    ///
    /// Walks the stack from the bottom to the active floor. Each floor except
    /// the bottom one erases its map footprint; each floor except the active
    /// one contributes its own resolved fog.
    pub(crate) fn stack_floors(&mut self, ctx: &DrawCtx<'_>) {
        for (i, floor) in ctx.floors.up_to_current().iter().enumerate() {
            if i > 0 {
                match ctx.layers.get(floor.id, MAP_LAYER) {
                    Some(map) => self.base.surface.composite(map.surface(), BlendOp::DestinationOut),
                    None => log::trace!("{} has no map layer, nothing to cut out", floor.id),
                }
            }
            if floor.id == self.base.floor() {
                continue;
            }
            if let Some(fow) = ctx.layers.get(floor.id, self.base.name()) {
                self.base.surface.composite(fow.surface(), BlendOp::SourceOver);
            }
        }
    }

    /// Keeps a soft disc around every token the viewer can see through, so
    /// a token is never lost in complete darkness.
    pub(crate) fn draw_token_vision(&mut self, ctx: &DrawCtx<'_>) {
        let Some(floor) = ctx.active_floor() else { return };
        let Some(tokens) = ctx.layers.get(floor, TOKENS_LAYER) else { return };

        for id in tokens.base().shape_ids() {
            let Some(shape) = ctx.shapes.get(*id) else { continue };
            if !shape.is_token || !shape.owned_by(ctx.viewer, Access::VISION) {
                continue;
            }
            let radius = TOKEN_VISION_SCALE * ctx.transform.g2lz(shape.bounding_box().width() * 0.5);
            if radius <= 0.0 {
                continue;
            }
            let center = ctx.transform.g2l(shape.center());
            let falloff = RadialGradient::falloff(center, radius / 2.0, radius, Color::black(), Color::transparent());
            self.base.surface.draw(
                &CircleCmd::new(center, radius, Paint::RadialGradient(falloff)).into(),
                BlendOp::SourceOver,
            );
        }
    }

    /// Unions every light's occlusion-aware falloff disc into the surface.
    ///
    /// Returns the number of lights that contributed.
    pub(crate) fn draw_lights(&mut self, ctx: &DrawCtx<'_>) -> usize {
        let t = ctx.transform;
        let mut lit = 0;

        for light in ctx.sources.vision_sources(self.base.floor()) {
            let Some(shape) = ctx.shapes.get(light.shape) else {
                log::trace!("vision source {} is gone", light.shape);
                continue;
            };
            let Some(aura) = shape.aura(light.aura) else {
                log::trace!("{} has no {}", light.shape, light.aura);
                continue;
            };
            if !shape.owned_by(ctx.viewer, Access::VISION) && !aura.visible {
                continue;
            }

            let center = shape.center();
            let reach = Circle::new(center, t.unit_distance(aura.reach()));
            if !t.circle_in_view(reach, ctx.viewport) {
                continue;
            }

            let polygon = ctx.oracle.compute_visibility(center, TriangulationTarget::Vision, shape.floor);
            if polygon.is_empty() {
                continue;
            }

            // Footprint first, then keep only the part inside the falloff disc.
            self.scratch.clear();
            let outline = polygon.iter().map(|p| t.g2l(*p)).collect();
            self.scratch
                .draw(&PolygonCmd::new(outline, Paint::Solid(Color::black())).into(), BlendOp::SourceOver);

            let lcenter = t.g2l(center);
            let outer = t.g2lr(aura.reach());
            let paint = if aura.dim_band() > 0.0 {
                Paint::RadialGradient(RadialGradient::falloff(
                    lcenter,
                    t.g2lr(aura.value),
                    outer,
                    Color::black(),
                    Color::transparent(),
                ))
            } else {
                Paint::Solid(Color::black())
            };
            self.scratch.draw(&CircleCmd::new(lcenter, outer, paint).into(), BlendOp::SourceIn);

            self.base.surface.composite(&self.scratch, BlendOp::SourceOver);
            lit += 1;
        }

        lit
    }

    /// Keeps only what the players' tokens can actually see.
    pub(crate) fn gate_line_of_sight(&mut self, ctx: &DrawCtx<'_>) {
        let Some(floor) = ctx.active_floor() else { return };
        match ctx.layers.get(floor, PLAYER_VISION_LAYER) {
            Some(players) => self.base.surface.composite(players.surface(), BlendOp::SourceIn),
            None => log::trace!("no {PLAYER_VISION_LAYER} layer on {floor}, skipping line of sight"),
        }
    }

    /// Paints the hand-placed pre-fog shapes in insertion order.
    pub(crate) fn draw_pre_fog(&mut self, ctx: &DrawCtx<'_>) {
        for id in self.pre_fog.iter() {
            let Some(shape) = ctx.shapes.get(id) else { continue };
            if !shape.visible_in_canvas(ctx.viewport, ctx.transform) {
                continue;
            }
            let op = pre_fog_blend(shape.blend, ctx.settings.full_fow);
            self.base.surface.draw(&shape.draw_cmd(ctx.transform), op);
        }
    }
}
