//! # Standard Materials
//!
//! The material set of the in-memory host and its capability table.

use std::fmt;

use cgmath::Point3;
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

use crate::{
    host::{
        Actor, FixedDrops, HarvestRoutine, ItemStack, MaterialCapabilities, MaterialRegistry,
        ToolStack, WorldAccess,
    },
    voxels::{Cell, MaterialId},
};

/// Enumerates the materials the sandbox knows about.
///
/// Discriminants are the material ids used in the world and on the wire. The
/// `FromPrimitive` derive allows conversion back from an id.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive)]
pub enum Material {
    Air = 0,
    Stone = 1,
    Grass = 2,
    Dirt = 3,
    Cobblestone = 4,
    Gravel = 13,
    GoldOre = 14,
    IronOre = 15,
    CoalOre = 16,
    Wool = 35,
    DiamondOre = 56,
    RedstoneOre = 73,
    /// Redstone ore after being touched; reverts on its own.
    LitRedstoneOre = 74,
    IronPickaxe = 257,
    Coal = 263,
    Diamond = 264,
    WoodenPickaxe = 270,
    StonePickaxe = 274,
    DiamondPickaxe = 278,
    Flint = 318,
    Redstone = 331,
}

impl Material {
    pub fn id(self) -> MaterialId {
        MaterialId(self as u32)
    }

    /// Looks up the material for `id`, if the sandbox knows it.
    pub fn from_id(id: MaterialId) -> Option<Self> {
        FromPrimitive::from_u32(id.0)
    }
}

impl From<Material> for MaterialId {
    fn from(material: Material) -> Self {
        material.id()
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Harvest tiers of the pickaxes; a bare hand is tier 0.
const WOODEN_TIER: u32 = 1;
const STONE_TIER: u32 = 2;
const IRON_TIER: u32 = 3;
const DIAMOND_TIER: u32 = 4;

/// A fresh pickaxe of the given material, or `None` if `material` is not a pickaxe.
pub fn pickaxe(material: Material) -> Option<ToolStack> {
    let (tier, durability) = match material {
        Material::WoodenPickaxe => (WOODEN_TIER, 60),
        Material::StonePickaxe => (STONE_TIER, 132),
        Material::IronPickaxe => (IRON_TIER, 251),
        Material::DiamondPickaxe => (DIAMOND_TIER, 1562),
        _ => return None,
    };

    Some(ToolStack {
        material: material.id(),
        tier,
        durability: Some(durability),
    })
}

/// Gravel's own harvest: one in ten breaks yields flint instead of gravel.
///
/// The item is spawned at the centre of the broken cell, like a regular block drop.
#[derive(Debug, Default)]
pub struct GravelHarvest;

impl HarvestRoutine for GravelHarvest {
    fn harvest(
        &self,
        _world: &mut dyn WorldAccess,
        actor: &mut dyn Actor,
        cell: Cell,
        _sub_state: u32,
        rng: &mut fastrand::Rng,
    ) -> bool {
        let dropped = if rng.u8(..10) == 0 {
            Material::Flint
        } else {
            Material::Gravel
        };

        let centre = Point3::new(
            f64::from(cell.x) + 0.5,
            f64::from(cell.y) + 0.5,
            f64::from(cell.z) + 0.5,
        );
        actor.spawn_world_item(centre, ItemStack::new(dropped.id(), 0, 1));
        true
    }
}

/// Builds the capability table for the sandbox materials.
///
/// Lit redstone ore has no entry of its own; it resolves through its canonical id.
pub fn standard_registry() -> MaterialRegistry {
    let ore = |drops: FixedDrops, tier: u32| MaterialCapabilities::with_drops(drops, tier);

    MaterialRegistry::builder()
        .material(Material::Stone, ore(FixedDrops::single(Material::Cobblestone.id()), WOODEN_TIER))
        .material(Material::Cobblestone, ore(FixedDrops::single(Material::Cobblestone.id()), WOODEN_TIER))
        .material(Material::Grass, ore(FixedDrops::single(Material::Dirt.id()), 0))
        .material(Material::Dirt, ore(FixedDrops::single(Material::Dirt.id()), 0))
        .material(
            Material::Gravel,
            ore(FixedDrops::single(Material::Gravel.id()), 0).harvested_by(GravelHarvest),
        )
        .material(
            Material::Wool,
            ore(
                FixedDrops {
                    keep_sub_state: true,
                    ..FixedDrops::single(Material::Wool.id())
                },
                0,
            ),
        )
        .material(Material::CoalOre, ore(FixedDrops::single(Material::Coal.id()), WOODEN_TIER))
        .material(Material::IronOre, ore(FixedDrops::single(Material::IronOre.id()), STONE_TIER))
        .material(Material::GoldOre, ore(FixedDrops::single(Material::GoldOre.id()), IRON_TIER))
        .material(Material::DiamondOre, ore(FixedDrops::single(Material::Diamond.id()), IRON_TIER))
        .material(
            Material::RedstoneOre,
            ore(FixedDrops::range(Material::Redstone.id(), 4..=5), IRON_TIER),
        )
        .material(Material::WoodenPickaxe, MaterialCapabilities::item(1))
        .material(Material::StonePickaxe, MaterialCapabilities::item(1))
        .material(Material::IronPickaxe, MaterialCapabilities::item(1))
        .material(Material::DiamondPickaxe, MaterialCapabilities::item(1))
        .build()
}
