//! Gloam engine crate.
//!
//! CPU raster core used by the fog-of-war layers: geometry, paint sources,
//! `vello_cpu` rasterization onto premultiplied surfaces, and Porter-Duff
//! compositing with explicit blend operations.

pub mod coords;
pub mod logging;
pub mod paint;
pub mod raster;
pub mod scene;
