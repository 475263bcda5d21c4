//! JSON scene files: everything needed to set up a [`LayerManager`] and
//! render a sequence of frames from it.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use gloam_engine::coords::{Circle, Rect, Vec2, Viewport};
use gloam_engine::paint::Color;
use gloam_engine::raster::BlendOp;
use gloam_fow::ids::{AuraId, FloorId, ShapeId};
use gloam_fow::layer::LayerManager;
use gloam_fow::settings::FogSettings;
use gloam_fow::shape::{Access, Aura, Geometry, Shape, ShapeOwner, Viewer};
use gloam_fow::units::ViewTransform;

// ── top level ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneFile {
    pub viewport: ViewportConfig,
    #[serde(default)]
    pub transform: TransformConfig,
    #[serde(default)]
    pub viewer: ViewerConfig,
    #[serde(default)]
    pub settings: SettingsConfig,
    pub floors: Vec<FloorConfig>,
    /// Floor shown first; defaults to the bottom one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_floor: Option<String>,
    /// World-space area the open-field visibility oracle reveals.
    /// Defaults to the area under the viewport.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub world_bounds: Option<[f32; 4]>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub frames: Vec<FrameConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewportConfig {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformConfig {
    #[serde(default = "one")]
    pub zoom: f32,
    #[serde(default)]
    pub pan: [f32; 2],
    #[serde(default = "default_unit_size")]
    pub unit_size: f32,
    #[serde(default = "default_grid_size")]
    pub grid_size: f32,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self { zoom: 1.0, pan: [0.0, 0.0], unit_size: default_unit_size(), grid_size: default_grid_size() }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewerConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub dm: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsConfig {
    #[serde(default)]
    pub full_fow: bool,
    #[serde(default)]
    pub fow_los: bool,
    /// CSS colour: `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(..)` or `rgba(..)`.
    #[serde(default = "default_fow_colour")]
    pub fow_colour: String,
    #[serde(default = "default_fow_opacity")]
    pub fow_opacity: f32,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            full_fow: false,
            fow_los: false,
            fow_colour: default_fow_colour(),
            fow_opacity: default_fow_opacity(),
        }
    }
}

// ── floors / shapes ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloorConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shapes: Vec<ShapeConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeometryConfig {
    /// `[x, y, w, h]`
    Rect([f32; 4]),
    Circle { center: [f32; 2], radius: f32 },
    Polygon(Vec<[f32; 2]>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeConfig {
    pub id: u64,
    pub layer: String,
    pub geometry: GeometryConfig,
    #[serde(default = "default_fill")]
    pub fill: String,
    #[serde(default = "default_blend")]
    pub blend: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub token: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub pre_fog: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub skip_draw: bool,
    #[serde(default)]
    pub default_access: AccessConfig,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub owners: Vec<OwnerConfig>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub auras: Vec<AuraConfig>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AccessConfig {
    #[serde(default)]
    pub edit: bool,
    #[serde(default)]
    pub movement: bool,
    #[serde(default)]
    pub vision: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerConfig {
    pub user: String,
    #[serde(flatten)]
    pub access: AccessConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuraConfig {
    pub id: u64,
    pub value: f32,
    #[serde(default)]
    pub dim: f32,
    #[serde(default, skip_serializing_if = "is_false")]
    pub visible: bool,
    #[serde(default = "yes")]
    pub active: bool,
    #[serde(default = "yes")]
    pub vision_source: bool,
}

// ── frames ────────────────────────────────────────────────────────────────

/// One rendered image. Changes apply cumulatively, in file order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameConfig {
    pub output: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_floor: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub moves: Vec<MoveConfig>,
    /// Dump a single layer of the current floor instead of the composite.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer: Option<String>,
}

/// Translates a shape by `by` world units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveConfig {
    pub shape: u64,
    pub by: [f32; 2],
}

fn one() -> f32 {
    1.0
}

fn yes() -> bool {
    true
}

fn is_false(v: &bool) -> bool {
    !v
}

fn default_unit_size() -> f32 {
    ViewTransform::default().unit_size
}

fn default_grid_size() -> f32 {
    ViewTransform::default().grid_size
}

fn default_fow_colour() -> String {
    "#000000".to_owned()
}

fn default_fow_opacity() -> f32 {
    FogSettings::default().fow_opacity
}

fn default_fill() -> String {
    "#000000".to_owned()
}

fn default_blend() -> String {
    BlendOp::SourceOver.as_str().to_owned()
}

// ── conversion ────────────────────────────────────────────────────────────

impl SceneFile {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("malformed scene file")
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.viewport.width, self.viewport.height)
    }

    /// World bounds for the open-field oracle.
    pub fn world_bounds(&self, transform: &ViewTransform) -> Rect {
        match self.world_bounds {
            Some([x, y, w, h]) => Rect::new(x, y, w, h),
            None => {
                let min = transform.l2g(Vec2::ZERO);
                let max = transform.l2g(Vec2::new(self.viewport.width, self.viewport.height));
                Rect::from_corners(min, max)
            }
        }
    }

    /// Builds the layer manager with every floor and shape registered.
    pub fn build(&self) -> Result<LayerManager> {
        let viewport = self.viewport();
        if !viewport.is_valid() {
            bail!("viewport {}x{} is not drawable", self.viewport.width, self.viewport.height);
        }

        let mut manager = LayerManager::new(viewport);
        manager.set_transform(self.transform.to_transform());
        manager.set_viewer(self.viewer.to_viewer());
        manager.set_settings(self.settings.to_settings()?);

        for floor in &self.floors {
            let id = manager.add_floor(&floor.name);
            for shape in &floor.shapes {
                let shape = shape.to_shape(id).with_context(|| format!("shape {} on {:?}", shape.id, floor.name))?;
                manager.add_shape(shape)?;
            }
        }

        if let Some(name) = &self.current_floor {
            let id = floor_by_name(&manager, name)?;
            manager.set_current_floor(id)?;
        }

        log::info!("scene: {} floor(s), {} shape(s)", manager.floors().len(), manager.shapes().len());
        Ok(manager)
    }
}

/// Resolves a floor by name.
pub fn floor_by_name(manager: &LayerManager, name: &str) -> Result<FloorId> {
    manager
        .floors()
        .floors()
        .iter()
        .find(|f| f.name == name)
        .map(|f| f.id)
        .with_context(|| format!("no floor named {name:?}"))
}

impl TransformConfig {
    pub fn to_transform(&self) -> ViewTransform {
        ViewTransform {
            zoom: self.zoom,
            pan: Vec2::new(self.pan[0], self.pan[1]),
            unit_size: self.unit_size,
            grid_size: self.grid_size,
        }
    }
}

impl ViewerConfig {
    pub fn to_viewer(&self) -> Viewer {
        if self.dm { Viewer::dm(&self.name) } else { Viewer::player(&self.name) }
    }
}

impl SettingsConfig {
    pub fn to_settings(&self) -> Result<FogSettings> {
        let fow_colour = Color::parse_css(&self.fow_colour).context("fow_colour")?;
        if !(0.0..=1.0).contains(&self.fow_opacity) {
            log::warn!("fow_opacity {} outside 0..=1, clamping", self.fow_opacity);
        }
        Ok(FogSettings { full_fow: self.full_fow, fow_los: self.fow_los, fow_colour, fow_opacity: self.fow_opacity })
    }
}

impl From<AccessConfig> for Access {
    fn from(a: AccessConfig) -> Self {
        Access { edit: a.edit, movement: a.movement, vision: a.vision }
    }
}

impl GeometryConfig {
    pub fn to_geometry(&self) -> Geometry {
        match self {
            GeometryConfig::Rect([x, y, w, h]) => Geometry::Rect(Rect::new(*x, *y, *w, *h)),
            GeometryConfig::Circle { center, radius } => {
                Geometry::Circle(Circle::new(Vec2::new(center[0], center[1]), *radius))
            }
            GeometryConfig::Polygon(points) => Geometry::Polygon(points.iter().map(|p| Vec2::new(p[0], p[1])).collect()),
        }
    }
}

impl ShapeConfig {
    pub fn to_shape(&self, floor: FloorId) -> Result<Shape> {
        let fill = Color::parse_css(&self.fill).context("fill")?;
        let blend: BlendOp = self.blend.parse().context("blend")?;

        let mut shape = Shape::new(ShapeId(self.id), floor, &self.layer, self.geometry.to_geometry())
            .with_fill(fill)
            .with_blend(blend);
        shape.is_token = self.token;
        shape.options.pre_fog_shape = self.pre_fog;
        shape.options.skip_draw = self.skip_draw;
        shape.default_access = self.default_access.into();
        shape.owners = self.owners.iter().map(|o| ShapeOwner::new(&o.user, o.access.into())).collect();
        shape.auras = self
            .auras
            .iter()
            .map(|a| Aura {
                active: a.active,
                vision_source: a.vision_source,
                ..Aura::light(AuraId(a.id), a.value, a.dim).visible(a.visible)
            })
            .collect();
        Ok(shape)
    }
}

/// Returns `shape` translated by `by` world units.
pub fn translated(shape: &Shape, by: Vec2) -> Shape {
    let geometry = match &shape.geometry {
        Geometry::Rect(r) => Geometry::Rect(r.translate(by)),
        Geometry::Circle(c) => Geometry::Circle(Circle::new(c.center + by, c.radius)),
        Geometry::Polygon(points) => Geometry::Polygon(points.iter().map(|p| *p + by).collect()),
    };
    Shape { geometry, ..shape.clone() }
}
