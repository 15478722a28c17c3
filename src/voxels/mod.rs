//! # Voxel Primitives
//!
//! This module contains the value types shared by the client and the authority when they
//! talk about the voxel grid: cell positions and material identifiers.
//!
//! ## Key Components
//!
//! * **Cell**: an integer position in the voxel grid
//! * **MaterialId**: the type of a cell's content, with canonicalization of activated
//!   variants so that both forms of an ore count as one vein
//!
//! Neither type carries world state. Everything about a cell is looked up through the
//! accessors in [`crate::host`].

pub mod cell;
pub mod material;

pub use cell::{distance_squared, neighbors, Cell};
pub use material::MaterialId;
