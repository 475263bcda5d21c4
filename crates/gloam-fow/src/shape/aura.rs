use crate::ids::AuraId;

/// Radius-based effect attached to a shape. Vision-source auras are the lights
/// of the fog pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Aura {
    pub id: AuraId,
    /// Core radius in game units, drawn at full intensity.
    pub value: f32,
    /// Width of the falloff band beyond `value`, in game units.
    pub dim: f32,
    /// Whether viewers without vision access still get the reveal.
    pub visible: bool,
    pub active: bool,
    /// Whether this aura casts light into the fog.
    pub vision_source: bool,
}

impl Aura {
    /// An active, light-casting aura.
    pub fn light(id: AuraId, value: f32, dim: f32) -> Self {
        Self {
            id,
            value,
            dim,
            visible: false,
            active: true,
            vision_source: true,
        }
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Falloff band width; negative values count as a hard edge.
    #[inline]
    pub fn dim_band(&self) -> f32 {
        self.dim.max(0.0)
    }

    /// Full reach (core + band) in game units.
    #[inline]
    pub fn reach(&self) -> f32 {
        self.value + self.dim_band()
    }

    #[inline]
    pub fn casts_light(&self) -> bool {
        self.active && self.vision_source
    }
}
