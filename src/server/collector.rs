//! # Vein Collector
//!
//! Finds the cells that make up one vein with a priority flood fill over the 26-neighbour
//! cube, nearest cells first.
//!
//! ## Algorithm
//!
//! The frontier is a min-heap ordered by squared distance to the anchor. The anchor is
//! seeded at distance 0. Each popped cell is appended to the result if its live material
//! matches the target; the anchor is expanded even when it no longer matches (the player
//! usually just broke it). A neighbour is marked visited on first sight and only enqueued
//! if it matches, so every cell is read at most once as a neighbour.
//!
//! The search stops once the result holds `max_cells` cells or the frontier runs dry.
//! A vein that bends back towards the anchor can pop a far cell before a nearer one
//! reached through it, so the result is stably sorted by distance before it is returned.

use std::{
    cmp::Reverse,
    collections::{BinaryHeap, HashSet},
};

use crate::{
    host::MaterialView,
    voxels::{distance_squared, neighbors, Cell, MaterialId},
};

/// The cells of one vein, nearest to the anchor first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Vein {
    pub cells: Vec<Cell>,
    /// `true` if the search stopped because it hit the cap.
    pub truncated: bool,
}

impl Vein {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

fn matches_target<W: MaterialView + ?Sized>(world: &W, cell: Cell, target: MaterialId) -> bool {
    world
        .material(cell)
        .is_some_and(|material| material.matches(target))
}

/// Collects up to `max_cells` cells connected to `anchor` whose material matches `target`.
///
/// Cells the world cannot resolve are treated as non-matching.
pub fn collect_vein<W: MaterialView + ?Sized>(
    world: &W,
    anchor: Cell,
    target: MaterialId,
    max_cells: usize,
) -> Vein {
    let mut vein = Vein::default();
    if max_cells == 0 {
        return vein;
    }

    let mut frontier = BinaryHeap::new();
    let mut visited = HashSet::new();

    let key = |cell: Cell| [cell.x, cell.y, cell.z];
    visited.insert(key(anchor));
    frontier.push(Reverse((0i64, key(anchor))));

    while let Some(Reverse((_, [x, y, z]))) = frontier.pop() {
        if vein.cells.len() >= max_cells {
            vein.truncated = true;
            break;
        }

        let cell = Cell::new(x, y, z);
        let is_match = matches_target(world, cell, target);
        if !is_match && cell != anchor {
            continue;
        }
        if is_match {
            vein.cells.push(cell);
        }

        for neighbor in neighbors(cell) {
            if !visited.insert(key(neighbor)) {
                continue;
            }
            if matches_target(world, neighbor, target) {
                frontier.push(Reverse((distance_squared(neighbor, anchor), key(neighbor))));
            }
        }
    }

    vein.cells.sort_by_key(|cell| distance_squared(*cell, anchor));
    vein
}
