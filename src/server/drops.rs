//! # Drop Economy
//!
//! Aggregates the drops of one vein operation and hands them to the actor afterwards.
//!
//! Drops are keyed by `(material, variant)` and kept in first-seen order, so a vein of
//! mixed drops is delivered in the order it was mined. Each entry is split into stacks no
//! larger than the material's max stack size before delivery.

use std::collections::HashMap;

use log::debug;

use crate::{
    host::{CapabilityTable, InventoryAccess, ItemStack},
    voxels::MaterialId,
};

/// Identifies one kind of drop.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DropKey {
    pub material: MaterialId,
    pub variant: u32,
}

/// Pending drops of one operation, in insertion order.
#[derive(Clone, Debug, Default)]
pub struct DropAccumulator {
    entries: Vec<(DropKey, u32)>,
    index: HashMap<DropKey, usize>,
}

impl DropAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `quantity` items of `(material, variant)`. Zero quantities are ignored.
    pub fn add(&mut self, material: MaterialId, variant: u32, quantity: u32) {
        if quantity == 0 {
            return;
        }

        let key = DropKey { material, variant };
        match self.index.get(&key) {
            Some(&position) => {
                let total = &mut self.entries[position].1;
                *total = total.saturating_add(quantity);
            }
            None => {
                self.index.insert(key, self.entries.len());
                self.entries.push((key, quantity));
            }
        }
    }

    /// Accumulated entries in first-seen order.
    pub fn entries(&self) -> impl Iterator<Item = (DropKey, u32)> + '_ {
        self.entries.iter().copied()
    }

    /// Total quantity recorded for `(material, variant)`.
    pub fn quantity(&self, material: MaterialId, variant: u32) -> u32 {
        self.index
            .get(&DropKey { material, variant })
            .map(|&position| self.entries[position].1)
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Splits `quantity` into full stacks of `max_stack` followed by the remainder.
///
/// # Examples
///
/// ```
/// use vein_miner::server::drops::split_into_batches;
///
/// assert_eq!(split_into_batches(130, 64), vec![64, 64, 2]);
/// assert_eq!(split_into_batches(64, 64), vec![64]);
/// assert!(split_into_batches(0, 64).is_empty());
/// ```
pub fn split_into_batches(quantity: u32, max_stack: u32) -> Vec<u32> {
    let max_stack = max_stack.max(1);
    let mut batches = vec![max_stack; (quantity / max_stack) as usize];
    if quantity % max_stack > 0 {
        batches.push(quantity % max_stack);
    }
    batches
}

/// Where harvested drops end up.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Delivery {
    /// Into the actor's inventory; whatever does not fit drops at the actor's feet.
    Inventory,
    /// Dropped into the world at the actor's position.
    InPlace,
}

/// What a delivery did with the accumulated drops.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    /// Items stored in the inventory.
    pub inserted: u32,
    /// Items spawned into the world.
    pub spawned: u32,
}

/// Hands every accumulated drop to `actor`.
pub fn deliver<A: InventoryAccess + ?Sized>(
    drops: &DropAccumulator,
    actor: &mut A,
    capabilities: &dyn CapabilityTable,
    delivery: Delivery,
) -> DeliveryReport {
    let mut report = DeliveryReport::default();

    for (key, quantity) in drops.entries() {
        let max_stack = capabilities.max_stack_size(key.material);

        for count in split_into_batches(quantity, max_stack) {
            let stack = ItemStack::new(key.material, key.variant, count);

            let overflow = match delivery {
                Delivery::Inventory => actor.insert(stack),
                Delivery::InPlace => Some(stack),
            };

            match overflow {
                Some(rest) if rest.count > 0 => {
                    report.inserted += count.saturating_sub(rest.count);
                    report.spawned += rest.count;
                    let position = actor.position();
                    actor.spawn_world_item(position, rest);
                }
                _ => report.inserted += count,
            }
        }
    }

    debug!(
        "Delivered drops: {} inserted, {} spawned",
        report.inserted, report.spawned
    );
    report
}
