//! Gloam fog of war: per-floor fog masks for a multi-floor tabletop map.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use gloam_fow::prelude::*;
//!
//! let mut scene = LayerManager::new(Viewport::new(800.0, 600.0));
//! let ground = scene.add_floor("ground");
//!
//! let torch = Shape::new(ShapeId(1), ground, TOKENS_LAYER, Geometry::Circle(Circle::new(Vec2::ZERO, 5.0)))
//!     .with_aura(Aura::light(AuraId(1), 20.0, 10.0).visible(true));
//! scene.add_shape(torch)?;
//!
//! // Once per invalidated frame:
//! scene.draw(&OpenFieldOracle::new(Rect::new(-400.0, -300.0, 800.0, 600.0)));
//! let frame = scene.composite();
//! ```
//!
//! # Plugging in occlusion
//!
//! Anything implementing [`vision::VisibilityOracle`] (closures included)
//! decides what a light can reach:
//!
//! ```rust,ignore
//! let walls = |center: Vec2, _: TriangulationTarget, floor: FloorId| my_mesh.visible_from(center, floor);
//! scene.draw(&walls);
//! ```

pub mod error;
pub mod floor;
pub mod ids;
pub mod layer;
pub mod settings;
pub mod shape;
pub mod units;
pub mod vision;

pub use error::SceneError;
pub use layer::LayerManager;

/// The types needed to build and draw a scene.
pub mod prelude {
    pub use crate::error::SceneError;
    pub use crate::floor::{Floor, FloorRegistry};
    pub use crate::ids::{AuraId, FloorId, ShapeId};
    pub use crate::layer::{
        DM_LAYER, FOW_LAYER, FowLightingLayer, Layer, LayerManager, MAP_LAYER, PLAYER_VISION_LAYER,
        PlayerVisionLayer, ShapeLayer, TOKENS_LAYER,
    };
    pub use crate::settings::FogSettings;
    pub use crate::shape::{Access, Aura, Geometry, Shape, ShapeOptions, ShapeOwner, ShapeStore, Viewer};
    pub use crate::units::ViewTransform;
    pub use crate::vision::{OpenFieldOracle, TriangulationTarget, VisibilityOracle, VisionSource, VisionSources};

    // Engine primitives.
    pub use gloam_engine::coords::{Circle, Rect, Vec2, Viewport};
    pub use gloam_engine::paint::Color;
    pub use gloam_engine::raster::{BlendOp, Surface};
}
