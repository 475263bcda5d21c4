use gloam_engine::paint::Color;

/// Read-only game settings consulted by the fog pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct FogSettings {
    /// Everything is dark except what is revealed.
    pub full_fow: bool,
    /// Reveals are additionally gated by the player line-of-sight mask.
    pub fow_los: bool,
    pub fow_colour: Color,
    /// Alpha applied to `fow_colour` when tinting unrevealed areas.
    pub fow_opacity: f32,
}

impl Default for FogSettings {
    fn default() -> Self {
        Self {
            full_fow: false,
            fow_los: false,
            fow_colour: Color::black(),
            fow_opacity: 0.3,
        }
    }
}

impl FogSettings {
    /// The tint painted over unrevealed areas in full-fog mode.
    pub fn fog_colour(&self) -> Color {
        self.fow_colour.with_alpha(self.fow_opacity.clamp(0.0, 1.0))
    }
}
