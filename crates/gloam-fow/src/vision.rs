//! Collaborators that decide where light comes from and how far it can see.

use gloam_engine::coords::{Rect, Vec2};

use crate::ids::{AuraId, FloorId, ShapeId};

/// One active light: a shape and one of its auras.
///
/// Recomputed every frame; never stored between draws.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct VisionSource {
    pub shape: ShapeId,
    pub aura: AuraId,
}

/// Which occlusion mesh a visibility query runs against.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TriangulationTarget {
    Vision,
    Movement,
}

/// Enumerates the lights on a floor.
pub trait VisionSources {
    fn vision_sources(&self, floor: FloorId) -> Vec<VisionSource>;
}

impl<F> VisionSources for F
where
    F: Fn(FloorId) -> Vec<VisionSource>,
{
    fn vision_sources(&self, floor: FloorId) -> Vec<VisionSource> {
        self(floor)
    }
}

/// Computes the unobstructed region around an observer.
///
/// Returns the polygon boundary in world space, in order; the last point
/// connects back to the first. An empty result means nothing is visible.
pub trait VisibilityOracle {
    fn compute_visibility(&self, center: Vec2, target: TriangulationTarget, floor: FloorId) -> Vec<Vec2>;
}

impl<F> VisibilityOracle for F
where
    F: Fn(Vec2, TriangulationTarget, FloorId) -> Vec<Vec2>,
{
    fn compute_visibility(&self, center: Vec2, target: TriangulationTarget, floor: FloorId) -> Vec<Vec2> {
        self(center, target, floor)
    }
}

/// Oracle for floors without obstructions: everything within `bounds` is visible.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OpenFieldOracle {
    pub bounds: Rect,
}

impl OpenFieldOracle {
    pub fn new(bounds: Rect) -> Self {
        Self { bounds }
    }
}

impl VisibilityOracle for OpenFieldOracle {
    fn compute_visibility(&self, _center: Vec2, _target: TriangulationTarget, _floor: FloorId) -> Vec<Vec2> {
        self.bounds.corners().to_vec()
    }
}
