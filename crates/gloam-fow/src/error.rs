use std::fmt;

use crate::ids::{FloorId, ShapeId};

/// Misuse of the floor / layer / shape registries.
///
/// Rendering never produces these: a missing collaborator during a draw only
/// means "contributes nothing this frame".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    UnknownFloor(FloorId),
    UnknownLayer { floor: FloorId, name: String },
    UnknownShape(ShapeId),
    DuplicateShape(ShapeId),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::UnknownFloor(id) => write!(f, "unknown {id}"),
            SceneError::UnknownLayer { floor, name } => write!(f, "no layer {name:?} on {floor}"),
            SceneError::UnknownShape(id) => write!(f, "unknown {id}"),
            SceneError::DuplicateShape(id) => write!(f, "{id} is already registered"),
        }
    }
}

impl std::error::Error for SceneError {}
