//! # Memory World
//!
//! A sparse voxel world kept entirely in memory, used by the demo and the tests.
//!
//! ## Architecture
//!
//! Cells are grouped into 16x16x16 chunks stored in a hash map keyed by chunk position.
//! Only chunks that were added (explicitly or by placing a cell in them) exist; reading a
//! cell in any other chunk yields `None`, the same answer a real host gives for unloaded
//! terrain.
//!
//! The world also records every refresh and neighbour notification so tests can check that
//! cleared cells were announced.

use std::collections::HashMap;

use cgmath::Point3;

use crate::{
    core::MtResource,
    host::{MaterialView, WorldAccess},
    voxels::{Cell, MaterialId},
};

/// The dimension (width, height, depth) of a chunk in cells.
pub const CHUNK_DIMENSION: i32 = 16;
/// The number of cells in a single 2D plane of a chunk (CHUNK_DIMENSION²).
pub const CHUNK_PLANE_SIZE: i32 = CHUNK_DIMENSION * CHUNK_DIMENSION;
/// The total number of cells in a chunk (CHUNK_DIMENSION³).
pub const CHUNK_SIZE: i32 = CHUNK_PLANE_SIZE * CHUNK_DIMENSION;

/// A 16x16x16 block of cells.
///
/// Cells are stored densely in row-major order (x, then z, then y).
#[derive(Clone, Debug)]
pub struct Chunk {
    /// The position of this chunk in chunk coordinates (not cell coordinates).
    pub position: Point3<i32>,
    materials: Vec<MaterialId>,
    sub_states: Vec<u32>,
}

impl Chunk {
    /// Creates a chunk where every cell is empty.
    pub fn empty(position: Point3<i32>) -> Self {
        Self {
            position,
            materials: vec![MaterialId::EMPTY; CHUNK_SIZE as usize],
            sub_states: vec![0; CHUNK_SIZE as usize],
        }
    }

    /// Creates a chunk where every cell holds `material`.
    pub fn solid(position: Point3<i32>, material: MaterialId) -> Self {
        Self {
            position,
            materials: vec![material; CHUNK_SIZE as usize],
            sub_states: vec![0; CHUNK_SIZE as usize],
        }
    }

    fn index(local: Point3<i32>) -> usize {
        (local.x + local.z * CHUNK_DIMENSION + local.y * CHUNK_PLANE_SIZE) as usize
    }

    pub fn get(&self, local: Point3<i32>) -> (MaterialId, u32) {
        let index = Self::index(local);
        (self.materials[index], self.sub_states[index])
    }

    pub fn set(&mut self, local: Point3<i32>, material: MaterialId, sub_state: u32) {
        let index = Self::index(local);
        self.materials[index] = material;
        self.sub_states[index] = sub_state;
    }

    /// Number of non-empty cells.
    pub fn occupied(&self) -> usize {
        self.materials.iter().filter(|m| !m.is_empty()).count()
    }
}

/// Splits a cell position into its chunk position and the position inside that chunk.
pub fn to_chunk_local(cell: Cell) -> (Point3<i32>, Point3<i32>) {
    let chunk = Point3::new(
        cell.x.div_euclid(CHUNK_DIMENSION),
        cell.y.div_euclid(CHUNK_DIMENSION),
        cell.z.div_euclid(CHUNK_DIMENSION),
    );
    let local = Point3::new(
        cell.x.rem_euclid(CHUNK_DIMENSION),
        cell.y.rem_euclid(CHUNK_DIMENSION),
        cell.z.rem_euclid(CHUNK_DIMENSION),
    );
    (chunk, local)
}

/// A voxel world composed of chunks.
///
/// # Examples
///
/// ```
/// use cgmath::Point3;
/// use vein_miner::{host::MaterialView, sandbox::MemoryWorld, voxels::MaterialId};
///
/// let mut world = MemoryWorld::new();
/// world.place(Point3::new(-1, 5, 20), MaterialId(16));
///
/// assert_eq!(world.material(Point3::new(-1, 5, 20)), Some(MaterialId(16)));
/// assert_eq!(world.material(Point3::new(-2, 5, 20)), Some(MaterialId::EMPTY));
/// // Nothing was ever placed near the origin, so that chunk is not loaded.
/// assert_eq!(world.material(Point3::new(0, 0, 0)), None);
/// ```
#[derive(Debug, Default)]
pub struct MemoryWorld {
    /// A mapping from chunk coordinates to chunk data.
    pub chunks: HashMap<Point3<i32>, MtResource<Chunk>>,
    refreshed: Vec<Cell>,
    notified: Vec<(Cell, MaterialId)>,
}

impl MemoryWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an empty chunk at the given chunk coordinates if none exists there.
    pub fn add_chunk_at(&mut self, position: Point3<i32>) {
        self.chunks
            .entry(position)
            .or_insert_with(|| MtResource::new(Chunk::empty(position)));
    }

    /// Retrieves the chunk at the given chunk coordinates.
    pub fn get_chunk_at(&self, position: Point3<i32>) -> Option<MtResource<Chunk>> {
        self.chunks.get(&position).cloned()
    }

    /// Removes a chunk, making its cells unresolvable.
    pub fn unload_chunk_at(&mut self, position: Point3<i32>) {
        self.chunks.remove(&position);
    }

    /// Writes `material` into `cell`, loading its chunk if needed.
    pub fn place(&mut self, cell: Cell, material: MaterialId) {
        self.place_with_state(cell, material, 0);
    }

    pub fn place_with_state(&mut self, cell: Cell, material: MaterialId, sub_state: u32) {
        let (chunk, local) = to_chunk_local(cell);
        self.add_chunk_at(chunk);
        if let Some(chunk) = self.chunks.get(&chunk) {
            chunk.get_mut().set(local, material, sub_state);
        }
    }

    /// Fills the axis-aligned box between `min` and `max` (inclusive) with `material`.
    pub fn fill(&mut self, min: Cell, max: Cell, material: MaterialId) {
        for y in min.y..=max.y {
            for z in min.z..=max.z {
                for x in min.x..=max.x {
                    self.place(Point3::new(x, y, z), material);
                }
            }
        }
    }

    /// Counts cells whose material matches `material`, across all loaded chunks.
    pub fn count(&self, material: MaterialId) -> usize {
        self.chunks
            .values()
            .map(|chunk| {
                let chunk = chunk.get();
                chunk.materials.iter().filter(|m| **m == material).count()
            })
            .sum()
    }

    /// Cells that received a refresh, in order.
    pub fn refreshed(&self) -> &[Cell] {
        &self.refreshed
    }

    /// Neighbour notifications sent, in order.
    pub fn notified(&self) -> &[(Cell, MaterialId)] {
        &self.notified
    }

    fn lookup(&self, cell: Cell) -> Option<(MaterialId, u32)> {
        let (chunk, local) = to_chunk_local(cell);
        self.chunks.get(&chunk).map(|chunk| chunk.get().get(local))
    }
}

impl MaterialView for MemoryWorld {
    fn material(&self, cell: Cell) -> Option<MaterialId> {
        self.lookup(cell).map(|(material, _)| material)
    }

    fn sub_state(&self, cell: Cell) -> Option<u32> {
        self.lookup(cell).map(|(_, sub_state)| sub_state)
    }
}

impl WorldAccess for MemoryWorld {
    fn set_material(&mut self, cell: Cell, material: MaterialId) -> bool {
        let (chunk, local) = to_chunk_local(cell);
        match self.chunks.get(&chunk) {
            Some(chunk) => {
                chunk.get_mut().set(local, material, 0);
                true
            }
            None => false,
        }
    }

    fn refresh(&mut self, cell: Cell) {
        self.refreshed.push(cell);
    }

    fn notify_neighbors(&mut self, cell: Cell, material: MaterialId) {
        self.notified.push((cell, material));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_cells_map_into_lower_chunk() {
        let (chunk, local) = to_chunk_local(Point3::new(-1, 16, -17));

        assert_eq!(chunk, Point3::new(-1, 1, -2));
        assert_eq!(local, Point3::new(15, 0, 15));
    }

    #[test]
    fn test_place_then_read_back() {
        let mut world = MemoryWorld::new();
        let cell = Point3::new(3, -4, 40);

        world.place_with_state(cell, MaterialId(35), 14);

        assert_eq!(world.material(cell), Some(MaterialId(35)));
        assert_eq!(world.sub_state(cell), Some(14));
        assert_eq!(world.count(MaterialId(35)), 1);
    }

    #[test]
    fn test_unloaded_chunk_is_unresolvable() {
        let mut world = MemoryWorld::new();
        let cell = Point3::new(0, 0, 0);
        world.place(cell, MaterialId(1));

        world.unload_chunk_at(Point3::new(0, 0, 0));

        assert_eq!(world.material(cell), None);
        assert!(!world.set_material(cell, MaterialId::EMPTY));
    }

    #[test]
    fn test_solid_chunk_is_full() {
        let chunk = Chunk::solid(Point3::new(0, 0, 0), MaterialId(1));

        assert_eq!(chunk.occupied(), CHUNK_SIZE as usize);
        assert_eq!(Chunk::empty(Point3::new(0, 0, 0)).occupied(), 0);
    }
}
