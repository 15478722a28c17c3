//! # Cell Module
//!
//! Cell positions and the 26-connected neighbourhood used by the vein search.

use cgmath::{Point3, Vector3};

/// One addressable voxel position in world coordinates.
pub type Cell = Point3<i32>;

/// Offsets of the full 3x3x3 cube around a cell, minus the centre.
///
/// Ordered by x, then y, then z, from -1 to 1.
pub const NEIGHBOR_OFFSETS: [Vector3<i32>; 26] = neighbor_offsets();

const fn neighbor_offsets() -> [Vector3<i32>; 26] {
    let mut offsets = [Vector3 { x: 0, y: 0, z: 0 }; 26];
    let mut index = 0;
    let mut dx = -1;
    while dx <= 1 {
        let mut dy = -1;
        while dy <= 1 {
            let mut dz = -1;
            while dz <= 1 {
                if dx != 0 || dy != 0 || dz != 0 {
                    offsets[index] = Vector3 { x: dx, y: dy, z: dz };
                    index += 1;
                }
                dz += 1;
            }
            dy += 1;
        }
        dx += 1;
    }
    offsets
}

/// Iterates over the cells sharing a face, edge or corner with `cell`.
///
/// Offsets that would step past the edge of the `i32` coordinate range are skipped, so a
/// cell on the boundary yields fewer than 26 neighbours.
pub fn neighbors(cell: Cell) -> impl Iterator<Item = Cell> {
    NEIGHBOR_OFFSETS.into_iter().filter_map(move |offset| {
        Some(Point3::new(
            cell.x.checked_add(offset.x)?,
            cell.y.checked_add(offset.y)?,
            cell.z.checked_add(offset.z)?,
        ))
    })
}

/// Squared Euclidean distance between two cells.
///
/// Computed in `i64` so that cells far from the origin cannot overflow.
pub fn distance_squared(a: Cell, b: Cell) -> i64 {
    let dx = (a.x as i64) - (b.x as i64);
    let dy = (a.y as i64) - (b.y as i64);
    let dz = (a.z as i64) - (b.z as i64);
    dx * dx + dy * dy + dz * dz
}
