//! # Crosshair Cache
//!
//! Remembers what the player was looking at on the previous tick. Tools that destroy a
//! block instantly empty the cell before the interact event is seen, so the detector falls
//! back to this entry to learn what the block used to be.

use crate::{
    host::MaterialView,
    voxels::{Cell, MaterialId},
};

/// The last non-empty cell under the crosshair.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CrosshairEntry {
    pub cell: Cell,
    pub material: MaterialId,
}

#[derive(Debug, Default)]
pub struct CrosshairCache {
    entry: Option<CrosshairEntry>,
}

impl CrosshairCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the looked-at cell if it currently holds something.
    ///
    /// Empty or unresolvable cells leave the previous entry in place; it may go stale,
    /// which is harmless because it is only ever read back for the same cell.
    pub fn refresh(&mut self, looking_at: Option<Cell>, world: &dyn MaterialView) {
        let Some(cell) = looking_at else {
            return;
        };

        if let Some(material) = world.material(cell).filter(|m| !m.is_empty()) {
            self.entry = Some(CrosshairEntry { cell, material });
        }
    }

    /// The cached material for `cell`, if the entry is for that exact cell.
    pub fn material_at(&self, cell: Cell) -> Option<MaterialId> {
        self.entry
            .filter(|entry| entry.cell == cell)
            .map(|entry| entry.material)
    }

    pub fn entry(&self) -> Option<CrosshairEntry> {
        self.entry
    }
}
