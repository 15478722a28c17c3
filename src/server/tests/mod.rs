mod cost_tests;
mod drops_tests;
mod session_tests;

use cgmath::Point3;

use crate::{
    host::MaterialRegistry,
    sandbox::{pickaxe, standard_registry, Material, MemoryActor, MemoryWorld},
    voxels::Cell,
};

/// A loaded, empty world.
fn empty_world() -> MemoryWorld {
    let mut world = MemoryWorld::new();
    for x in -1..=1 {
        for y in -1..=1 {
            for z in -1..=1 {
                world.add_chunk_at(Point3::new(x, y, z));
            }
        }
    }
    world
}

/// Places `length` cells of `material` along the x axis, starting at `start`.
fn place_line(world: &mut MemoryWorld, start: Cell, length: i32, material: Material) {
    for offset in 0..length {
        world.place(Point3::new(start.x + offset, start.y, start.z), material.id());
    }
}

/// An actor holding a fresh iron pickaxe, with the real stack sizes.
fn miner(registry: &MaterialRegistry) -> MemoryActor {
    let materials = [
        Material::Coal,
        Material::Redstone,
        Material::IronOre,
        Material::Cobblestone,
        Material::IronPickaxe,
    ];

    MemoryActor::new()
        .at(Point3::new(0.5, 1.0, 0.5))
        .holding(pickaxe(Material::IronPickaxe).unwrap())
        .with_stack_limits(registry, materials.into_iter().map(Material::id))
}

fn registry() -> MaterialRegistry {
    standard_registry()
}
