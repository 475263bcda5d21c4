//! Per-floor drawing layers and the manager that owns them.

mod lighting;
mod lookup;
mod manager;
mod player_vision;
mod shape_layer;

pub use lighting::{FowLightingLayer, pre_fog_blend};
pub use lookup::{DrawCtx, LayerLookup};
pub use manager::LayerManager;
pub use player_vision::PlayerVisionLayer;
pub use shape_layer::ShapeLayer;

use gloam_engine::coords::Viewport;
use gloam_engine::raster::Surface;

use crate::ids::{FloorId, ShapeId};
use crate::shape::Shape;

pub const MAP_LAYER: &str = "map";
pub const TOKENS_LAYER: &str = "tokens";
pub const DM_LAYER: &str = "dm";
pub const PLAYER_VISION_LAYER: &str = "fow-players";
pub const FOW_LAYER: &str = "fow";

/// Layers every floor receives, in draw order.
pub const FLOOR_LAYERS: [&str; 5] = [MAP_LAYER, TOKENS_LAYER, DM_LAYER, PLAYER_VISION_LAYER, FOW_LAYER];

#[derive(Debug)]
pub enum Layer {
    Shapes(ShapeLayer),
    Lighting(FowLightingLayer),
    PlayerVision(PlayerVisionLayer),
}

impl Layer {
    /// The layer kind conventionally used for `name`.
    pub fn for_name(name: &str, floor: FloorId, viewport: Viewport) -> Self {
        match name {
            FOW_LAYER => Layer::Lighting(FowLightingLayer::new(name, floor, viewport)),
            PLAYER_VISION_LAYER => Layer::PlayerVision(PlayerVisionLayer::new(name, floor, viewport)),
            _ => Layer::Shapes(ShapeLayer::new(name, floor, viewport)),
        }
    }

    pub fn base(&self) -> &ShapeLayer {
        match self {
            Layer::Shapes(l) => l,
            Layer::Lighting(l) => l.base(),
            Layer::PlayerVision(l) => l.base(),
        }
    }

    pub fn base_mut(&mut self) -> &mut ShapeLayer {
        match self {
            Layer::Shapes(l) => l,
            Layer::Lighting(l) => l.base_mut(),
            Layer::PlayerVision(l) => l.base_mut(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        self.base().name()
    }

    #[inline]
    pub fn floor(&self) -> FloorId {
        self.base().floor()
    }

    #[inline]
    pub fn surface(&self) -> &Surface {
        self.base().surface()
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.base().is_valid()
    }

    #[inline]
    pub fn is_displayed(&self) -> bool {
        self.base().is_displayed()
    }

    #[inline]
    pub fn contains(&self, id: ShapeId) -> bool {
        self.base().contains(id)
    }

    pub fn invalidate(&mut self) {
        self.base_mut().invalidate();
    }

    pub fn add_shape(&mut self, shape: &Shape) -> bool {
        match self {
            Layer::Shapes(l) => l.add_shape(shape),
            Layer::Lighting(l) => l.add_shape(shape),
            Layer::PlayerVision(l) => l.base_mut().add_shape(shape),
        }
    }

    pub fn remove_shape(&mut self, shape: &Shape) -> bool {
        match self {
            Layer::Shapes(l) => l.remove_shape(shape),
            Layer::Lighting(l) => l.remove_shape(shape),
            Layer::PlayerVision(l) => l.base_mut().remove_shape(shape),
        }
    }

    pub(crate) fn resize(&mut self, viewport: Viewport) {
        match self {
            Layer::Shapes(l) => l.resize(viewport),
            Layer::Lighting(l) => l.resize(viewport),
            Layer::PlayerVision(l) => l.base_mut().resize(viewport),
        }
    }

    pub fn draw(&mut self, ctx: &DrawCtx<'_>) {
        match self {
            Layer::Shapes(l) => l.draw(ctx, true),
            Layer::Lighting(l) => l.draw(ctx),
            Layer::PlayerVision(l) => l.draw(ctx),
        }
    }
}
