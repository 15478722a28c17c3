mod activation_tests;

use cgmath::Point3;

use crate::{
    sandbox::{Material, MemoryWorld},
    voxels::Cell,
};

const ORE: Cell = Point3 { x: 2, y: 64, z: -3 };

/// A world with a single coal ore at `ORE` on a stone floor.
fn world_with_ore() -> MemoryWorld {
    let mut world = MemoryWorld::new();
    world.fill(
        Point3::new(0, 63, -5),
        Point3::new(4, 63, -1),
        Material::Stone.id(),
    );
    world.place(ORE, Material::CoalOre.id());
    world
}
