//! # Sandbox
//!
//! An in-memory host implementing every collaborator trait of [`crate::host`]. The demo
//! binary runs against it and so do the tests.

pub mod actor;
pub mod materials;
pub mod world;

pub use actor::MemoryActor;
pub use materials::{pickaxe, standard_registry, GravelHarvest, Material};
pub use world::MemoryWorld;
