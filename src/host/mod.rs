//! # Host Interfaces
//!
//! The vein miner does not own the world, the players or the item system. It reaches them
//! through the traits in this module, which a hosting game implements once.
//!
//! ## Collaborators
//!
//! * [`MaterialView`] / [`WorldAccess`]: read and write cells
//! * [`InventoryAccess`]: held tool, inventory insertion, world items, durability
//! * [`ResourceAccess`]: the actor's hunger level, cost deduction, chat notices
//! * [`CapabilityTable`]: per-material harvest routine, drop table and harvest check
//!
//! ## Failure Model
//!
//! Lookups return `Option`. `None` means the host could not resolve the request, and the
//! caller picks a harmless default at the call site (skip the cell, drop nothing). Nothing
//! here returns an error that could abort a whole vein operation.

pub mod capabilities;

use std::sync::Arc;

use cgmath::Point3;

use crate::voxels::{Cell, MaterialId};

pub use capabilities::{FixedDrops, MaterialCapabilities, MaterialRegistry, MaterialRegistryBuilder};

/// Identifies one connected actor on the authority.
pub type ActorId = u64;

/// A quantity of one item kind, the unit of delivery.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ItemStack {
    pub material: MaterialId,
    pub variant: u32,
    pub count: u32,
}

impl ItemStack {
    pub fn new(material: MaterialId, variant: u32, count: u32) -> Self {
        Self {
            material,
            variant,
            count,
        }
    }

    /// Returns `true` if `other` holds the same item kind and could share a slot.
    pub fn stacks_with(&self, other: &ItemStack) -> bool {
        self.material == other.material && self.variant == other.variant
    }
}

/// The item an actor is holding, as far as mining cares about it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ToolStack {
    pub material: MaterialId,
    /// Harvest tier; materials with a higher requirement cannot be harvested.
    pub tier: u32,
    /// Remaining uses, or `None` for items that do not wear out.
    pub durability: Option<u32>,
}

impl ToolStack {
    /// Returns `true` if using this item consumes durability.
    pub fn consumes_durability(&self) -> bool {
        self.durability.is_some()
    }

    /// Returns `true` once no uses are left.
    pub fn is_depleted(&self) -> bool {
        self.durability == Some(0)
    }
}

/// Read access to the voxel grid.
pub trait MaterialView {
    /// Live material at `cell`, or `None` if the cell cannot be resolved (e.g. unloaded).
    fn material(&self, cell: Cell) -> Option<MaterialId>;

    /// Sub-state (metadata) of the cell, or `None` if it cannot be resolved.
    fn sub_state(&self, cell: Cell) -> Option<u32>;
}

/// Write access to the voxel grid.
pub trait WorldAccess: MaterialView {
    /// Writes `material` into `cell`. Returns `false` if the write did not happen.
    fn set_material(&mut self, cell: Cell, material: MaterialId) -> bool;

    /// Marks the cell for a visual refresh.
    fn refresh(&mut self, cell: Cell);

    /// Tells the cells around `cell` that it changed to `material`.
    fn notify_neighbors(&mut self, cell: Cell, material: MaterialId);
}

/// The actor's items and body.
pub trait InventoryAccess {
    /// The currently held item, if any.
    fn held_tool(&self) -> Option<ToolStack>;

    /// Inserts as much of `stack` as fits into the inventory.
    ///
    /// # Returns
    /// The part that did not fit, or `None` if everything was stored
    fn insert(&mut self, stack: ItemStack) -> Option<ItemStack>;

    /// Drops `stack` into the world as an item entity at `position`.
    fn spawn_world_item(&mut self, position: Point3<f64>, stack: ItemStack);

    /// Wears the held tool by `amount` uses. The host removes the tool once it breaks.
    fn reduce_durability(&mut self, amount: u32);

    /// Where the actor stands; overflow drops land here.
    fn position(&self) -> Point3<f64>;
}

/// The actor's hunger and chat.
pub trait ResourceAccess {
    /// Current hunger level, or `None` if it cannot be read.
    fn resource_level(&self) -> Option<u32>;

    /// Charges `points` hunger points.
    fn deduct(&mut self, points: u32);

    /// Shows `message` to the actor.
    fn notify(&mut self, message: &str);
}

/// Everything the authority needs from one player.
pub trait Actor: InventoryAccess + ResourceAccess {}

impl<T: InventoryAccess + ResourceAccess + ?Sized> Actor for T {}

/// A material's own harvest logic, applying its special drop rules.
pub trait HarvestRoutine: Send + Sync {
    /// Produces the drops for breaking `cell` (spawning them through `actor`).
    ///
    /// The routine must not clear the cell; the harvest engine does that afterwards. Any
    /// roll goes through `rng`, the operation's generator.
    ///
    /// # Returns
    /// `false` if the routine could not run, in which case drops are synthesized from the
    /// material's drop table instead
    fn harvest(
        &self,
        world: &mut dyn WorldAccess,
        actor: &mut dyn Actor,
        cell: Cell,
        sub_state: u32,
        rng: &mut fastrand::Rng,
    ) -> bool;
}

/// What a material drops when harvested without a dedicated routine.
pub trait DropTable: Send + Sync {
    /// The dropped material for the given sub-state, or `None` for no drop.
    fn dropped(&self, sub_state: u32, rng: &mut fastrand::Rng) -> Option<MaterialId>;

    /// How many items drop.
    fn quantity(&self, rng: &mut fastrand::Rng) -> u32;

    /// The variant of the dropped item for the given sub-state.
    fn variant(&self, sub_state: u32) -> u32;
}

/// Per-material capabilities of the hosting game.
pub trait CapabilityTable {
    fn canonical_harvest(&self, material: MaterialId) -> Option<Arc<dyn HarvestRoutine>>;

    fn drop_table(&self, material: MaterialId) -> Option<Arc<dyn DropTable>>;

    /// Returns `true` if `tool` (or the bare hand) may harvest `material`.
    fn can_harvest(&self, tool: Option<&ToolStack>, material: MaterialId) -> bool;

    /// Largest stack of `material` one slot or one world item may hold.
    fn max_stack_size(&self, material: MaterialId) -> u32;
}
