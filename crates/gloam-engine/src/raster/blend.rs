use std::fmt;
use std::str::FromStr;

use crate::paint::Color;

/// Porter-Duff composite operation, named after the canvas
/// `globalCompositeOperation` values.
///
/// Each operator is `result = src * Fa + dst * Fb` on premultiplied colours.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum BlendOp {
    /// Source drawn on top of the destination. The neutral default.
    #[default]
    SourceOver,
    /// Source kept only where the destination is present.
    SourceIn,
    /// Source kept only where the destination is absent; destination discarded.
    SourceOut,
    SourceAtop,
    DestinationOver,
    DestinationIn,
    /// Destination erased wherever the source is present.
    DestinationOut,
    DestinationAtop,
    Xor,
    Copy,
    /// Additive, clamped to 1.
    Lighter,
}

impl BlendOp {
    pub const ALL: [BlendOp; 11] = [
        BlendOp::SourceOver,
        BlendOp::SourceIn,
        BlendOp::SourceOut,
        BlendOp::SourceAtop,
        BlendOp::DestinationOver,
        BlendOp::DestinationIn,
        BlendOp::DestinationOut,
        BlendOp::DestinationAtop,
        BlendOp::Xor,
        BlendOp::Copy,
        BlendOp::Lighter,
    ];

    /// The canvas name (`"source-over"`, `"destination-out"`, ...).
    pub const fn as_str(self) -> &'static str {
        match self {
            BlendOp::SourceOver => "source-over",
            BlendOp::SourceIn => "source-in",
            BlendOp::SourceOut => "source-out",
            BlendOp::SourceAtop => "source-atop",
            BlendOp::DestinationOver => "destination-over",
            BlendOp::DestinationIn => "destination-in",
            BlendOp::DestinationOut => "destination-out",
            BlendOp::DestinationAtop => "destination-atop",
            BlendOp::Xor => "xor",
            BlendOp::Copy => "copy",
            BlendOp::Lighter => "lighter",
        }
    }

    /// `(Fa, Fb)` for the given source and destination alphas.
    #[inline]
    fn factors(self, sa: f32, da: f32) -> (f32, f32) {
        match self {
            BlendOp::SourceOver => (1.0, 1.0 - sa),
            BlendOp::SourceIn => (da, 0.0),
            BlendOp::SourceOut => (1.0 - da, 0.0),
            BlendOp::SourceAtop => (da, 1.0 - sa),
            BlendOp::DestinationOver => (1.0 - da, 1.0),
            BlendOp::DestinationIn => (0.0, sa),
            BlendOp::DestinationOut => (0.0, 1.0 - sa),
            BlendOp::DestinationAtop => (1.0 - da, sa),
            BlendOp::Xor => (1.0 - da, 1.0 - sa),
            BlendOp::Copy => (1.0, 0.0),
            BlendOp::Lighter => (1.0, 1.0),
        }
    }

    /// Combines one source pixel with one destination pixel.
    #[inline]
    pub fn apply(self, src: Color, dst: Color) -> Color {
        let (fa, fb) = self.factors(src.a, dst.a);
        Color::from_premul(
            src.r * fa + dst.r * fb,
            src.g * fa + dst.g * fb,
            src.b * fa + dst.b * fb,
            src.a * fa + dst.a * fb,
        )
        .clamped()
    }

    /// True when a fully transparent source leaves the destination untouched.
    ///
    /// Bounded operators only need to visit pixels the source covers; unbounded
    /// ones (`source-in`, `copy`, ...) rewrite the whole surface.
    #[inline]
    pub fn is_bounded(self) -> bool {
        let (_, fb) = self.factors(0.0, 1.0);
        fb >= 1.0
    }
}

impl fmt::Display for BlendOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a composite operation name that is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownBlendOp(pub String);

impl fmt::Display for UnknownBlendOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown composite operation {:?}", self.0)
    }
}

impl std::error::Error for UnknownBlendOp {}

impl FromStr for BlendOp {
    type Err = UnknownBlendOp;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        BlendOp::ALL
            .into_iter()
            .find(|op| op.as_str() == name)
            .ok_or_else(|| UnknownBlendOp(name.to_owned()))
    }
}
