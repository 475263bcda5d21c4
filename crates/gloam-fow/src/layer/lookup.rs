use gloam_engine::coords::Viewport;

use crate::floor::FloorRegistry;
use crate::ids::FloorId;
use crate::settings::FogSettings;
use crate::shape::{ShapeStore, Viewer};
use crate::units::ViewTransform;
use crate::vision::{VisibilityOracle, VisionSources};

use super::Layer;

/// Read-only view over every layer except the one currently drawing.
///
/// The drawing layer is borrowed mutably elsewhere, so asking for it here
/// resolves to `None` like any other missing layer.
#[derive(Clone, Copy)]
pub struct LayerLookup<'a> {
    before: &'a [Layer],
    after: &'a [Layer],
}

impl<'a> LayerLookup<'a> {
    /// A view over all of `layers`.
    pub fn new(layers: &'a [Layer]) -> Self {
        Self { before: layers, after: &[] }
    }

    /// Splits `layers[index]` out for mutation and returns a view over the rest.
    pub fn split_out(layers: &'a mut [Layer], index: usize) -> Option<(&'a mut Layer, LayerLookup<'a>)> {
        if index >= layers.len() {
            return None;
        }
        let (before, rest) = layers.split_at_mut(index);
        let (target, after) = rest.split_first_mut()?;
        Some((target, LayerLookup { before, after }))
    }

    pub fn get(&self, floor: FloorId, name: &str) -> Option<&'a Layer> {
        self.iter().find(|l| l.floor() == floor && l.name() == name)
    }

    pub fn has(&self, floor: FloorId, name: &str) -> bool {
        self.get(floor, name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Layer> + 'a {
        self.before.iter().chain(self.after.iter())
    }
}

/// Everything a layer may read while it draws.
pub struct DrawCtx<'a> {
    pub floors: &'a FloorRegistry,
    pub shapes: &'a ShapeStore,
    pub layers: LayerLookup<'a>,
    pub sources: &'a dyn VisionSources,
    pub oracle: &'a dyn VisibilityOracle,
    pub settings: &'a FogSettings,
    pub transform: &'a ViewTransform,
    pub viewer: &'a Viewer,
    pub viewport: Viewport,
}

impl DrawCtx<'_> {
    /// The floor being viewed, if any floor exists.
    pub fn active_floor(&self) -> Option<FloorId> {
        self.floors.current_floor().map(|f| f.id)
    }
}
