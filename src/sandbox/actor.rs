//! # Memory Actor
//!
//! An in-memory player: a fixed-size inventory, a held tool, a hunger level and a log of
//! everything the authority told it or dropped around it.

use cgmath::Point3;

use crate::{
    host::{CapabilityTable, InventoryAccess, ItemStack, ResourceAccess, ToolStack},
    voxels::MaterialId,
};

/// Number of inventory slots.
pub const INVENTORY_SLOTS: usize = 36;
/// Hunger level of a freshly spawned actor.
pub const MAX_FOOD_LEVEL: u32 = 20;

/// A player kept in memory.
///
/// Slot limits default to 64; [`MemoryActor::with_stack_limits`] copies the real sizes
/// out of a capability table.
#[derive(Clone, Debug)]
pub struct MemoryActor {
    slots: Vec<Option<ItemStack>>,
    stack_limits: Vec<(MaterialId, u32)>,
    default_stack_limit: u32,
    tool: Option<ToolStack>,
    food_level: Option<u32>,
    deducted: u32,
    position: Point3<f64>,
    spawned: Vec<(Point3<f64>, ItemStack)>,
    notices: Vec<String>,
}

impl Default for MemoryActor {
    fn default() -> Self {
        Self {
            slots: vec![None; INVENTORY_SLOTS],
            stack_limits: Vec::new(),
            default_stack_limit: 64,
            tool: None,
            food_level: Some(MAX_FOOD_LEVEL),
            deducted: 0,
            position: Point3::new(0.0, 0.0, 0.0),
            spawned: Vec::new(),
            notices: Vec::new(),
        }
    }
}

impl MemoryActor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places the actor at `position`.
    pub fn at(mut self, position: Point3<f64>) -> Self {
        self.position = position;
        self
    }

    pub fn holding(mut self, tool: ToolStack) -> Self {
        self.tool = Some(tool);
        self
    }

    /// Sets the hunger level; `None` simulates a host that cannot report it.
    pub fn with_food_level(mut self, level: Option<u32>) -> Self {
        self.food_level = level;
        self
    }

    /// Uses the stack sizes of `capabilities` for the given materials.
    pub fn with_stack_limits(
        mut self,
        capabilities: &dyn CapabilityTable,
        materials: impl IntoIterator<Item = MaterialId>,
    ) -> Self {
        self.stack_limits = materials
            .into_iter()
            .map(|material| (material, capabilities.max_stack_size(material)))
            .collect();
        self
    }

    /// Occupies `count` slots with items that stack with nothing the world drops.
    pub fn with_filled_slots(mut self, count: usize) -> Self {
        for (index, slot) in self.slots.iter_mut().take(count).enumerate() {
            *slot = Some(ItemStack::new(MaterialId(u32::MAX), index as u32, 1));
        }
        self
    }

    fn stack_limit(&self, material: MaterialId) -> u32 {
        self.stack_limits
            .iter()
            .find(|(m, _)| *m == material)
            .map(|(_, limit)| *limit)
            .unwrap_or(self.default_stack_limit)
    }

    /// Total count of `material` across all slots.
    pub fn count_of(&self, material: MaterialId) -> u32 {
        self.slots
            .iter()
            .flatten()
            .filter(|stack| stack.material == material)
            .map(|stack| stack.count)
            .sum()
    }

    pub fn slots(&self) -> impl Iterator<Item = &ItemStack> {
        self.slots.iter().flatten()
    }

    pub fn tool(&self) -> Option<ToolStack> {
        self.tool
    }

    pub fn food_level(&self) -> Option<u32> {
        self.food_level
    }

    /// Hunger points charged so far.
    pub fn deducted(&self) -> u32 {
        self.deducted
    }

    /// Items dropped into the world, in order.
    pub fn spawned(&self) -> &[(Point3<f64>, ItemStack)] {
        &self.spawned
    }

    /// Total count of `material` dropped into the world.
    pub fn spawned_count_of(&self, material: MaterialId) -> u32 {
        self.spawned
            .iter()
            .filter(|(_, stack)| stack.material == material)
            .map(|(_, stack)| stack.count)
            .sum()
    }

    pub fn notices(&self) -> &[String] {
        &self.notices
    }
}

impl InventoryAccess for MemoryActor {
    fn held_tool(&self) -> Option<ToolStack> {
        self.tool
    }

    fn insert(&mut self, mut stack: ItemStack) -> Option<ItemStack> {
        let limit = self.stack_limit(stack.material).max(1);

        // Top up partial stacks first, then fill empty slots.
        for slot in self.slots.iter_mut().flatten() {
            if stack.count == 0 {
                break;
            }
            if slot.stacks_with(&stack) && slot.count < limit {
                let moved = (limit - slot.count).min(stack.count);
                slot.count += moved;
                stack.count -= moved;
            }
        }

        for slot in self.slots.iter_mut().filter(|slot| slot.is_none()) {
            if stack.count == 0 {
                break;
            }
            let moved = limit.min(stack.count);
            *slot = Some(ItemStack { count: moved, ..stack });
            stack.count -= moved;
        }

        (stack.count > 0).then_some(stack)
    }

    fn spawn_world_item(&mut self, position: Point3<f64>, stack: ItemStack) {
        self.spawned.push((position, stack));
    }

    fn reduce_durability(&mut self, amount: u32) {
        let Some(tool) = self.tool.as_mut() else {
            return;
        };
        let Some(durability) = tool.durability.as_mut() else {
            return;
        };

        *durability = durability.saturating_sub(amount);
        if *durability == 0 {
            self.tool = None;
        }
    }

    fn position(&self) -> Point3<f64> {
        self.position
    }
}

impl ResourceAccess for MemoryActor {
    fn resource_level(&self) -> Option<u32> {
        self.food_level
    }

    fn deduct(&mut self, points: u32) {
        self.deducted += points;
        if let Some(level) = self.food_level.as_mut() {
            *level = level.saturating_sub(points);
        }
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}
