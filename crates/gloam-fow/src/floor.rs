use crate::error::SceneError;
use crate::ids::FloorId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Floor {
    pub id: FloorId,
    pub name: String,
}

/// Ordered floor stack (bottom to top) plus the floor being viewed.
#[derive(Debug, Default)]
pub struct FloorRegistry {
    floors: Vec<Floor>,
    current: usize,
    next_id: u32,
}

impl FloorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a floor on top of the stack.
    ///
    /// The first floor added becomes the current one.
    pub fn add_floor(&mut self, name: impl Into<String>) -> FloorId {
        let id = FloorId(self.next_id);
        self.next_id += 1;
        self.floors.push(Floor { id, name: name.into() });
        id
    }

    #[inline]
    pub fn floors(&self) -> &[Floor] {
        &self.floors
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.floors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.floors.is_empty()
    }

    #[inline]
    pub fn current_floor(&self) -> Option<&Floor> {
        self.floors.get(self.current)
    }

    #[inline]
    pub fn current_floor_index(&self) -> usize {
        self.current
    }

    #[inline]
    pub fn is_current(&self, id: FloorId) -> bool {
        self.current_floor().is_some_and(|f| f.id == id)
    }

    pub fn index_of(&self, id: FloorId) -> Option<usize> {
        self.floors.iter().position(|f| f.id == id)
    }

    pub fn get(&self, id: FloorId) -> Option<&Floor> {
        self.floors.iter().find(|f| f.id == id)
    }

    pub fn set_current(&mut self, id: FloorId) -> Result<(), SceneError> {
        self.current = self.index_of(id).ok_or(SceneError::UnknownFloor(id))?;
        Ok(())
    }

    /// Floors from the bottom up to and including the current one.
    pub fn up_to_current(&self) -> &[Floor] {
        if self.floors.is_empty() {
            return &[];
        }
        &self.floors[..=self.current.min(self.floors.len() - 1)]
    }
}
