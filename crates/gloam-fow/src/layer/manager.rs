use gloam_engine::coords::Viewport;
use gloam_engine::raster::{BlendOp, Surface};

use crate::error::SceneError;
use crate::floor::FloorRegistry;
use crate::ids::{FloorId, ShapeId};
use crate::settings::FogSettings;
use crate::shape::{Shape, ShapeStore, Viewer};
use crate::units::ViewTransform;
use crate::vision::{VisibilityOracle, VisionSources};

use super::{DrawCtx, FLOOR_LAYERS, Layer, LayerLookup};

/// Owns the floor stack, every shape and every layer, and drives drawing.
///
/// Layers are stored bottom floor first, each floor's layers in
/// [`FLOOR_LAYERS`] order, which is also the draw order.
#[derive(Debug)]
pub struct LayerManager {
    floors: FloorRegistry,
    shapes: ShapeStore,
    layers: Vec<Layer>,
    viewport: Viewport,
    transform: ViewTransform,
    settings: FogSettings,
    viewer: Viewer,
}

impl LayerManager {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            floors: FloorRegistry::new(),
            shapes: ShapeStore::new(),
            layers: Vec::new(),
            viewport,
            transform: ViewTransform::default(),
            settings: FogSettings::default(),
            viewer: Viewer::default(),
        }
    }

    // ── accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn floors(&self) -> &FloorRegistry {
        &self.floors
    }

    #[inline]
    pub fn shapes(&self) -> &ShapeStore {
        &self.shapes
    }

    #[inline]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[inline]
    pub fn transform(&self) -> &ViewTransform {
        &self.transform
    }

    #[inline]
    pub fn settings(&self) -> &FogSettings {
        &self.settings
    }

    #[inline]
    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    pub fn get_layer(&self, floor: FloorId, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.floor() == floor && l.name() == name)
    }

    pub fn get_layer_mut(&mut self, floor: FloorId, name: &str) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| l.floor() == floor && l.name() == name)
    }

    pub fn has_layer(&self, floor: FloorId, name: &str) -> bool {
        self.get_layer(floor, name).is_some()
    }

    fn layer_index(&self, floor: FloorId, name: &str) -> Option<usize> {
        self.layers.iter().position(|l| l.floor() == floor && l.name() == name)
    }

    // ── floors and view state ─────────────────────────────────────────────

    /// Adds a floor on top of the stack together with its standard layers.
    pub fn add_floor(&mut self, name: impl Into<String>) -> FloorId {
        let id = self.floors.add_floor(name);
        self.layers
            .extend(FLOOR_LAYERS.iter().map(|n| Layer::for_name(n, id, self.viewport)));
        self.invalidate_lighting();
        log::debug!("added {id} ({} floor(s))", self.floors.len());
        id
    }

    pub fn set_current_floor(&mut self, id: FloorId) -> Result<(), SceneError> {
        self.floors.set_current(id)?;
        self.invalidate_lighting();
        Ok(())
    }

    pub fn set_settings(&mut self, settings: FogSettings) {
        self.settings = settings;
        self.invalidate_lighting();
    }

    pub fn set_viewer(&mut self, viewer: Viewer) {
        self.viewer = viewer;
        self.invalidate_lighting();
    }

    pub fn set_transform(&mut self, transform: ViewTransform) {
        if !transform.is_valid() {
            log::warn!("ignoring invalid view transform {transform:?}");
            return;
        }
        self.transform = transform;
        self.invalidate_all();
    }

    /// Resizes every surface. Content is discarded and redrawn on the next draw.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        for layer in &mut self.layers {
            layer.resize(viewport);
        }
    }

    // ── shapes ────────────────────────────────────────────────────────────

    /// Registers `shape` and appends it to the layer named by `shape.layer`.
    pub fn add_shape(&mut self, shape: Shape) -> Result<(), SceneError> {
        if self.shapes.contains(shape.id) {
            return Err(SceneError::DuplicateShape(shape.id));
        }
        let idx = self
            .layer_index(shape.floor, &shape.layer)
            .ok_or_else(|| SceneError::UnknownLayer { floor: shape.floor, name: shape.layer.clone() })?;

        self.layers[idx].add_shape(&shape);
        self.shapes.insert(shape)?;
        self.invalidate_lighting();
        Ok(())
    }

    /// Unregisters a shape. Returns `false` if it was unknown.
    pub fn remove_shape(&mut self, id: ShapeId) -> bool {
        let Some(shape) = self.shapes.get(id) else {
            return false;
        };
        if let Some(idx) = self.layer_index(shape.floor, &shape.layer) {
            self.layers[idx].remove_shape(shape);
        }
        self.shapes.remove(id);
        self.invalidate_lighting();
        true
    }

    /// Replaces a registered shape with a new version.
    ///
    /// Geometry or paint changes keep the shape's paint position; a change of
    /// floor, layer or pre-fog flag moves it to the end of its new layer.
    pub fn update_shape(&mut self, shape: Shape) -> Result<(), SceneError> {
        let old = self.shapes.get(shape.id).ok_or(SceneError::UnknownShape(shape.id))?;
        let in_place = old.floor == shape.floor
            && old.layer == shape.layer
            && old.options.pre_fog_shape == shape.options.pre_fog_shape;

        if in_place {
            let idx = self.layer_index(shape.floor, &shape.layer);
            self.shapes.replace(shape)?;
            if let Some(idx) = idx {
                self.layers[idx].invalidate();
            }
            self.invalidate_lighting();
            return Ok(());
        }

        if !self.has_layer(shape.floor, &shape.layer) {
            return Err(SceneError::UnknownLayer { floor: shape.floor, name: shape.layer });
        }
        self.remove_shape(shape.id);
        self.add_shape(shape)
    }

    // ── invalidation ──────────────────────────────────────────────────────

    /// Marks every fog and line-of-sight layer for redraw.
    pub fn invalidate_lighting(&mut self) {
        for layer in &mut self.layers {
            if matches!(layer, Layer::Lighting(_) | Layer::PlayerVision(_)) {
                layer.invalidate();
            }
        }
    }

    pub fn invalidate_all(&mut self) {
        for layer in &mut self.layers {
            layer.invalidate();
        }
    }

    // ── drawing ───────────────────────────────────────────────────────────

    /// Redraws every invalid layer, lights taken from the registered shapes.
    pub fn draw(&mut self, oracle: &dyn VisibilityOracle) {
        self.draw_with_sources(None, oracle);
    }

    /// Like [`draw`](Self::draw) with an explicit light enumeration.
    pub fn draw_with_sources(&mut self, sources: Option<&dyn VisionSources>, oracle: &dyn VisibilityOracle) {
        let mut redrawn = 0;
        for idx in 0..self.layers.len() {
            let drawn = self.with_draw_ctx(idx, sources, oracle, |layer, ctx| {
                if layer.is_valid() {
                    return false;
                }
                layer.draw(ctx);
                true
            });
            if drawn == Some(true) {
                redrawn += 1;
            }
        }
        log::debug!("draw: {redrawn}/{} layer(s) redrawn", self.layers.len());
    }

    /// Runs `f` with layer `index` borrowed mutably and a context over everything else.
    pub(crate) fn with_draw_ctx<R>(
        &mut self,
        index: usize,
        sources: Option<&dyn VisionSources>,
        oracle: &dyn VisibilityOracle,
        f: impl FnOnce(&mut Layer, &DrawCtx<'_>) -> R,
    ) -> Option<R> {
        let (layer, layers) = LayerLookup::split_out(&mut self.layers, index)?;
        let ctx = DrawCtx {
            floors: &self.floors,
            shapes: &self.shapes,
            layers,
            sources: sources.unwrap_or(&self.shapes),
            oracle,
            settings: &self.settings,
            transform: &self.transform,
            viewer: &self.viewer,
            viewport: self.viewport,
        };
        Some(f(layer, &ctx))
    }

    /// Stacks every displayed layer of the floors up to the active one.
    pub fn composite(&self) -> Surface {
        let mut out = Surface::for_viewport(self.viewport);
        for floor in self.floors.up_to_current() {
            for layer in self.layers.iter().filter(|l| l.floor() == floor.id && l.is_displayed()) {
                out.composite(layer.surface(), BlendOp::SourceOver);
            }
        }
        out
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use gloam_engine::coords::{Circle, Rect, Vec2};
    use gloam_engine::paint::Color;

    use super::*;
    use crate::ids::AuraId;
    use crate::layer::{FOW_LAYER, MAP_LAYER, PLAYER_VISION_LAYER, TOKENS_LAYER};
    use crate::shape::{Access, Aura, Geometry, ShapeOwner};
    use crate::vision::{OpenFieldOracle, TriangulationTarget, VisionSource};

    /// One 8-bit quantization step; fills are rendered at byte precision.
    pub(crate) const STEP: f32 = 1.0 / 255.0;

    /// 200x200 viewport with world (0, 0) at its centre.
    pub(crate) fn centred(floors: &[&str]) -> (LayerManager, Vec<FloorId>) {
        let mut m = LayerManager::new(Viewport::new(200.0, 200.0));
        m.set_transform(ViewTransform { pan: Vec2::new(100.0, 100.0), ..ViewTransform::default() });
        let ids = floors.iter().map(|n| m.add_floor(*n)).collect();
        (m, ids)
    }

    pub(crate) fn open_field() -> OpenFieldOracle {
        OpenFieldOracle::new(Rect::new(-100.0, -100.0, 200.0, 200.0))
    }

    /// A light at world `at` with the given core and band, visible to everyone.
    pub(crate) fn lamp(id: u64, floor: FloorId, at: Vec2, value: f32, dim: f32) -> Shape {
        Shape::new(ShapeId(id), floor, TOKENS_LAYER, Geometry::Circle(Circle::new(at, 1.0)))
            .with_aura(Aura::light(AuraId(id), value, dim).visible(true))
    }

    fn fog(m: &LayerManager, floor: FloorId) -> &Surface {
        m.get_layer(floor, FOW_LAYER).map(|l| l.surface()).unwrap()
    }

    // ── registry ──────────────────────────────────────────────────────────

    #[test]
    fn floors_get_standard_layers() {
        let (m, ids) = centred(&["ground", "upper"]);
        assert_eq!(m.layers().len(), 10);
        for id in &ids {
            for name in FLOOR_LAYERS {
                assert!(m.has_layer(*id, name));
            }
        }
        assert!(!m.has_layer(FloorId(9), MAP_LAYER));
    }

    #[test]
    fn add_shape_rejects_duplicates_and_unknown_layers() {
        let (mut m, ids) = centred(&["ground"]);
        let f = ids[0];
        m.add_shape(lamp(1, f, Vec2::ZERO, 1.0, 0.0)).unwrap();
        assert_eq!(m.add_shape(lamp(1, f, Vec2::ZERO, 1.0, 0.0)), Err(SceneError::DuplicateShape(ShapeId(1))));

        let stray = Shape::new(ShapeId(2), f, "walls", Geometry::Rect(Rect::new(0.0, 0.0, 1.0, 1.0)));
        assert!(matches!(m.add_shape(stray), Err(SceneError::UnknownLayer { .. })));
        assert_eq!(m.shapes().len(), 1);
    }

    #[test]
    fn remove_shape_clears_layer_and_store() {
        let (mut m, ids) = centred(&["ground"]);
        m.add_shape(lamp(1, ids[0], Vec2::ZERO, 1.0, 0.0)).unwrap();
        assert!(m.remove_shape(ShapeId(1)));
        assert!(!m.remove_shape(ShapeId(1)));
        assert!(!m.get_layer(ids[0], TOKENS_LAYER).unwrap().contains(ShapeId(1)));
        assert!(m.shapes().is_empty());
    }

    #[test]
    fn update_shape_moves_between_layers() {
        let (mut m, ids) = centred(&["ground", "upper"]);
        m.add_shape(lamp(1, ids[0], Vec2::ZERO, 1.0, 0.0)).unwrap();

        let mut moved = m.shapes().get(ShapeId(1)).cloned().unwrap();
        moved.floor = ids[1];
        moved.layer = MAP_LAYER.to_owned();
        m.update_shape(moved).unwrap();

        assert!(!m.get_layer(ids[0], TOKENS_LAYER).unwrap().contains(ShapeId(1)));
        assert!(m.get_layer(ids[1], MAP_LAYER).unwrap().contains(ShapeId(1)));
        assert_eq!(m.shapes().get(ShapeId(1)).unwrap().floor, ids[1]);
    }

    #[test]
    fn update_shape_to_missing_layer_keeps_old_version() {
        let (mut m, ids) = centred(&["ground"]);
        m.add_shape(lamp(1, ids[0], Vec2::ZERO, 1.0, 0.0)).unwrap();
        let mut bad = m.shapes().get(ShapeId(1)).cloned().unwrap();
        bad.layer = "walls".to_owned();
        assert!(m.update_shape(bad).is_err());
        assert!(m.get_layer(ids[0], TOKENS_LAYER).unwrap().contains(ShapeId(1)));
    }

    #[test]
    fn current_floor_change_invalidates_fog() {
        let (mut m, ids) = centred(&["ground", "upper"]);
        m.draw(&open_field());
        assert!(m.layers().iter().all(|l| l.is_valid()));

        m.set_current_floor(ids[1]).unwrap();
        assert!(!m.get_layer(ids[0], FOW_LAYER).unwrap().is_valid());
        assert!(!m.get_layer(ids[1], PLAYER_VISION_LAYER).unwrap().is_valid());
        assert!(m.get_layer(ids[0], MAP_LAYER).unwrap().is_valid());
        assert_eq!(m.set_current_floor(FloorId(7)), Err(SceneError::UnknownFloor(FloorId(7))));
    }

    // ── drawing ───────────────────────────────────────────────────────────

    #[test]
    fn draw_is_idempotent_until_invalidated() {
        let (mut m, ids) = centred(&["ground"]);
        m.add_shape(lamp(1, ids[0], Vec2::ZERO, 5.0, 5.0)).unwrap();
        m.draw(&open_field());
        let first = fog(&m, ids[0]).clone();
        assert!(m.get_layer(ids[0], FOW_LAYER).unwrap().is_valid());

        // The oracle now sees nothing, but a valid layer must not ask it.
        let blind = |_: Vec2, _: TriangulationTarget, _: FloorId| Vec::<Vec2>::new();
        m.draw(&blind);
        assert_eq!(fog(&m, ids[0]), &first);

        m.invalidate_lighting();
        m.draw(&blind);
        assert!(fog(&m, ids[0]).is_transparent());
    }

    #[test]
    fn hard_edged_light_has_no_band() {
        let (mut m, ids) = centred(&["ground"]);
        m.set_viewer(Viewer::player("bob"));
        m.add_shape(lamp(1, ids[0], Vec2::ZERO, 5.0, 0.0)).unwrap();
        m.draw(&open_field());

        // 5 game units = 50 world units = 50 px at zoom 1.
        let s = fog(&m, ids[0]);
        assert_eq!(s.alpha_at(100, 100), 1.0);
        assert_eq!(s.alpha_at(147, 100), 1.0);
        assert_eq!(s.alpha_at(152, 100), 0.0);
        assert_eq!(s.alpha_at(100, 40), 0.0);
        // Partial coverage only on the anti-aliased rim.
        for y in 0..200u32 {
            for x in 0..200u32 {
                let d = ((x as f32 + 0.5 - 100.0).powi(2) + (y as f32 + 0.5 - 100.0).powi(2)).sqrt();
                let a = s.alpha_at(x, y);
                if d < 48.5 {
                    assert_eq!(a, 1.0, "({x}, {y})");
                } else if d > 51.5 {
                    assert_eq!(a, 0.0, "({x}, {y})");
                }
            }
        }
    }

    #[test]
    fn soft_light_fades_across_band() {
        let (mut m, ids) = centred(&["ground"]);
        m.add_shape(lamp(1, ids[0], Vec2::ZERO, 5.0, 5.0)).unwrap();
        m.draw(&open_field());

        let s = fog(&m, ids[0]);
        assert_eq!(s.alpha_at(125, 100), 1.0);
        let mid = s.alpha_at(175, 100);
        assert!(mid > 0.0 && mid < 1.0);
        for x in 100..199 {
            assert!(s.alpha_at(x + 1, 100) <= s.alpha_at(x, 100) + STEP);
        }
    }

    #[test]
    fn lights_only_add_revealed_area() {
        let (mut m, ids) = centred(&["ground"]);
        let f = ids[0];
        m.add_shape(lamp(1, f, Vec2::new(-50.0, 0.0), 2.0, 1.0)).unwrap();
        m.add_shape(lamp(2, f, Vec2::new(50.0, 0.0), 2.0, 1.0)).unwrap();

        let one = |_: FloorId| vec![VisionSource { shape: ShapeId(1), aura: AuraId(1) }];
        m.draw_with_sources(Some(&one as &dyn VisionSources), &open_field());
        let single = fog(&m, f).total_alpha();

        m.invalidate_lighting();
        m.draw(&open_field());
        let both = fog(&m, f).total_alpha();

        assert!(single > 0.0);
        assert!(both > single);
    }

    #[test]
    fn hidden_light_needs_vision_access() {
        let (mut m, ids) = centred(&["ground"]);
        let f = ids[0];
        let mut private = lamp(1, f, Vec2::ZERO, 5.0, 0.0);
        private.auras[0].visible = false;
        m.add_shape(private.with_owner(ShapeOwner::new("alice", Access::VISION))).unwrap();

        m.set_viewer(Viewer::player("bob"));
        m.draw(&open_field());
        assert!(fog(&m, f).is_transparent());

        m.set_viewer(Viewer::player("alice"));
        m.draw(&open_field());
        assert_eq!(fog(&m, f).alpha_at(100, 100), 1.0);
    }

    #[test]
    fn offscreen_light_is_skipped() {
        let (mut m, ids) = centred(&["ground"]);
        m.add_shape(lamp(1, ids[0], Vec2::new(1000.0, 0.0), 5.0, 0.0)).unwrap();
        let asked = std::cell::Cell::new(0);
        let oracle = |c: Vec2, t: TriangulationTarget, f: FloorId| {
            asked.set(asked.get() + 1);
            open_field().compute_visibility(c, t, f)
        };
        m.draw(&oracle);
        assert_eq!(asked.get(), 0);
    }

    #[test]
    fn full_fog_keeps_tokens_uncovered() {
        let (mut m, ids) = centred(&["ground"]);
        m.set_viewer(Viewer::player("alice"));
        m.set_settings(FogSettings { full_fow: true, ..FogSettings::default() });
        let token = Shape::new(ShapeId(1), ids[0], TOKENS_LAYER, Geometry::Rect(Rect::new(-10.0, -10.0, 20.0, 20.0)))
            .token()
            .with_owner(ShapeOwner::new("alice", Access::VISION));
        m.add_shape(token).unwrap();
        m.draw(&open_field());

        let s = fog(&m, ids[0]);
        assert_eq!(s.alpha_at(100, 100), 0.0);
        assert!((s.alpha_at(5, 5) - 0.3).abs() < STEP);
    }

    #[test]
    fn line_of_sight_with_empty_player_view_hides_everything() {
        let (mut m, ids) = centred(&["ground"]);
        m.set_settings(FogSettings { fow_los: true, ..FogSettings::default() });
        m.add_shape(lamp(1, ids[0], Vec2::ZERO, 5.0, 5.0)).unwrap();
        m.draw(&open_field());

        assert!(m.get_layer(ids[0], PLAYER_VISION_LAYER).unwrap().surface().is_transparent());
        assert!(fog(&m, ids[0]).is_transparent());
    }

    #[test]
    fn line_of_sight_keeps_lit_area_seen_by_tokens() {
        let (mut m, ids) = centred(&["ground"]);
        m.set_viewer(Viewer::player("alice"));
        m.set_settings(FogSettings { fow_los: true, ..FogSettings::default() });
        m.add_shape(lamp(1, ids[0], Vec2::ZERO, 5.0, 0.0)).unwrap();
        let scout =
            Shape::new(ShapeId(2), ids[0], TOKENS_LAYER, Geometry::Circle(Circle::new(Vec2::new(-30.0, 0.0), 5.0)))
                .token()
                .with_owner(ShapeOwner::new("alice", Access::VISION));
        m.add_shape(scout).unwrap();

        // Anything west of the origin only sees the left half of the map.
        let oracle = |c: Vec2, t: TriangulationTarget, f: FloorId| {
            if c.x < 0.0 {
                vec![Vec2::new(-100.0, -100.0), Vec2::new(0.0, -100.0), Vec2::new(0.0, 100.0), Vec2::new(-100.0, 100.0)]
            } else {
                open_field().compute_visibility(c, t, f)
            }
        };
        m.draw(&oracle);

        let s = fog(&m, ids[0]);
        assert_eq!(s.alpha_at(80, 100), 1.0);
        assert_eq!(s.alpha_at(120, 100), 0.0);
        assert!(!m.get_layer(ids[0], PLAYER_VISION_LAYER).unwrap().is_displayed());
    }

    #[test]
    fn upper_floor_shows_lower_fog_outside_its_map() {
        let (mut m, ids) = centred(&["cellar", "hall"]);
        let (cellar, hall) = (ids[0], ids[1]);
        m.add_shape(lamp(1, cellar, Vec2::ZERO, 20.0, 0.0)).unwrap();
        let floorboards =
            Shape::new(ShapeId(2), hall, MAP_LAYER, Geometry::Rect(Rect::new(-50.0, -50.0, 50.0, 50.0)));
        m.add_shape(floorboards).unwrap();
        m.set_current_floor(hall).unwrap();
        m.draw(&open_field());

        assert_eq!(fog(&m, cellar).alpha_at(10, 10), 1.0);
        let s = fog(&m, hall);
        assert_eq!(s.alpha_at(75, 75), 0.0);
        assert_eq!(s.alpha_at(150, 150), 1.0);
        assert_eq!(s.alpha_at(10, 10), 1.0);

        assert!(m.get_layer(hall, FOW_LAYER).unwrap().is_displayed());
        assert!(!m.get_layer(cellar, FOW_LAYER).unwrap().is_displayed());
    }

    #[test]
    fn bottom_floor_map_is_never_cut_out() {
        let (mut m, ids) = centred(&["cellar", "hall"]);
        let (cellar, hall) = (ids[0], ids[1]);
        m.add_shape(lamp(1, cellar, Vec2::ZERO, 20.0, 0.0)).unwrap();
        let flagstones =
            Shape::new(ShapeId(2), cellar, MAP_LAYER, Geometry::Rect(Rect::new(-50.0, -50.0, 50.0, 50.0)));
        m.add_shape(flagstones).unwrap();
        m.set_current_floor(hall).unwrap();
        m.draw(&open_field());

        let s = fog(&m, hall);
        assert_eq!(s.alpha_at(75, 75), 1.0);
        assert_eq!(s.alpha_at(150, 150), 1.0);
    }

    #[test]
    fn walk_cuts_every_upper_map_and_stacks_middle_fog() {
        let (mut m, ids) = centred(&["cellar", "hall", "attic"]);
        let (cellar, hall, attic) = (ids[0], ids[1], ids[2]);
        m.add_shape(lamp(1, cellar, Vec2::ZERO, 20.0, 0.0)).unwrap();
        // Hall: map over the top-left corner, a small lamp inside it.
        m.add_shape(Shape::new(ShapeId(2), hall, MAP_LAYER, Geometry::Rect(Rect::new(-100.0, -100.0, 50.0, 50.0))))
            .unwrap();
        m.add_shape(lamp(3, hall, Vec2::new(-75.0, -75.0), 1.0, 0.0)).unwrap();
        // Attic: map over the bottom-right corner.
        m.add_shape(Shape::new(ShapeId(4), attic, MAP_LAYER, Geometry::Rect(Rect::new(50.0, 50.0, 50.0, 50.0))))
            .unwrap();
        m.set_current_floor(attic).unwrap();
        m.draw(&open_field());

        let s = fog(&m, attic);
        // Hall map cut, hall fog back on top where its lamp shines.
        assert_eq!(s.alpha_at(5, 45), 0.0);
        assert_eq!(s.alpha_at(25, 25), 1.0);
        // Attic map cut.
        assert_eq!(s.alpha_at(175, 175), 0.0);
        // Cellar fog everywhere else.
        assert_eq!(s.alpha_at(100, 100), 1.0);
        assert_eq!(s.alpha_at(10, 150), 1.0);
        assert_eq!(s.alpha_at(150, 10), 1.0);
    }

    #[test]
    fn line_of_sight_without_player_layer_keeps_lights() {
        let (mut m, ids) = centred(&["ground"]);
        m.layers.retain(|l| l.name() != PLAYER_VISION_LAYER);
        m.set_settings(FogSettings { fow_los: true, ..FogSettings::default() });
        m.add_shape(lamp(1, ids[0], Vec2::ZERO, 5.0, 0.0)).unwrap();
        m.draw(&open_field());

        assert!(!m.has_layer(ids[0], PLAYER_VISION_LAYER));
        assert_eq!(fog(&m, ids[0]).alpha_at(100, 100), 1.0);
    }

    #[test]
    fn composite_stacks_displayed_layers() {
        let (mut m, ids) = centred(&["ground"]);
        let rug = Shape::new(ShapeId(1), ids[0], MAP_LAYER, Geometry::Rect(Rect::new(-100.0, -100.0, 100.0, 200.0)))
            .with_fill(Color::from_srgb_u8(200, 0, 0, 255));
        m.add_shape(rug).unwrap();
        m.draw(&open_field());

        let out = m.composite();
        assert_eq!(out.alpha_at(50, 100), 1.0);
        assert_eq!(out.alpha_at(150, 100), 0.0);
    }

    #[test]
    fn viewport_change_resizes_every_layer() {
        let (mut m, _) = centred(&["ground"]);
        m.draw(&open_field());
        m.set_viewport(Viewport::new(64.0, 32.0));
        assert!(m.layers().iter().all(|l| l.surface().width() == 64 && l.surface().height() == 32));
        assert!(m.layers().iter().all(|l| !l.is_valid()));
    }
}
