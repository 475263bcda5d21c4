//! CPU raster surfaces and canvas-style compositing.
//!
//! Fill commands are rasterized by `vello_cpu` onto a transparent source
//! layer; [`compose`] then applies the named [`BlendOp`] pixel by pixel. A
//! [`Surface`] carries no "current composite operation" state, so a draw can
//! never leak a blend mode into the next one.

mod blend;
mod rasterizer;
mod surface;

pub use blend::{BlendOp, UnknownBlendOp};
pub use surface::{compose, Surface};
