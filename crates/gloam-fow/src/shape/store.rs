use std::collections::HashMap;

use crate::error::SceneError;
use crate::ids::{FloorId, ShapeId};
use crate::vision::{VisionSource, VisionSources};

use super::Shape;

/// Every registered shape, by id.
///
/// Layers keep ordered id lists and resolve them here. Iteration follows
/// registration order so vision-source enumeration is stable between frames.
#[derive(Debug, Default)]
pub struct ShapeStore {
    shapes: HashMap<ShapeId, Shape>,
    order: Vec<ShapeId>,
}

impl ShapeStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[inline]
    pub fn contains(&self, id: ShapeId) -> bool {
        self.shapes.contains_key(&id)
    }

    #[inline]
    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    pub fn insert(&mut self, shape: Shape) -> Result<(), SceneError> {
        if self.shapes.contains_key(&shape.id) {
            return Err(SceneError::DuplicateShape(shape.id));
        }
        self.order.push(shape.id);
        self.shapes.insert(shape.id, shape);
        Ok(())
    }

    /// Swaps in a new version of an already registered shape, keeping its position.
    pub fn replace(&mut self, shape: Shape) -> Result<Shape, SceneError> {
        match self.shapes.get_mut(&shape.id) {
            Some(slot) => Ok(std::mem::replace(slot, shape)),
            None => Err(SceneError::UnknownShape(shape.id)),
        }
    }

    pub fn remove(&mut self, id: ShapeId) -> Option<Shape> {
        let shape = self.shapes.remove(&id)?;
        self.order.retain(|s| *s != id);
        Some(shape)
    }

    /// Shapes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.order.iter().filter_map(|id| self.shapes.get(id))
    }
}

impl VisionSources for ShapeStore {
    /// Active light-casting auras of every shape on `floor`.
    fn vision_sources(&self, floor: FloorId) -> Vec<VisionSource> {
        self.iter()
            .filter(|s| s.floor == floor)
            .flat_map(|s| {
                s.auras
                    .iter()
                    .filter(|a| a.casts_light())
                    .map(|a| VisionSource { shape: s.id, aura: a.id })
            })
            .collect()
    }
}
