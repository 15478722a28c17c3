//! # Harvest Engine
//!
//! Breaks the collected cells one by one and records what they drop.
//!
//! For every cell, in collection order:
//!
//! 1. re-read the live material and skip the cell unless it still matches the target
//! 2. skip the cell if the held tool may not harvest it
//! 3. run the material's own harvest routine, or fall back to its drop table
//! 4. clear the cell
//! 5. wear the held tool by one use and stop once it is used up
//!
//! A cell that cannot be resolved, may not be harvested or has no drop entry is skipped on
//! its own; nothing here aborts the operation.

use log::trace;

use super::drops::DropAccumulator;
use crate::{
    host::{Actor, CapabilityTable, WorldAccess},
    voxels::{Cell, MaterialId},
};

/// Result of harvesting one vein.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct HarvestOutcome {
    /// Cells actually cleared.
    pub mined: usize,
    /// `true` if the held tool broke and the remaining cells were left alone.
    pub tool_depleted: bool,
}

/// Borrows the collaborators of one vein operation.
pub struct HarvestEngine<'a> {
    world: &'a mut dyn WorldAccess,
    actor: &'a mut dyn Actor,
    capabilities: &'a dyn CapabilityTable,
    rng: &'a mut fastrand::Rng,
}

impl<'a> HarvestEngine<'a> {
    pub fn new(
        world: &'a mut dyn WorldAccess,
        actor: &'a mut dyn Actor,
        capabilities: &'a dyn CapabilityTable,
        rng: &'a mut fastrand::Rng,
    ) -> Self {
        Self {
            world,
            actor,
            capabilities,
            rng,
        }
    }

    /// Harvests `cells` in order, adding synthesized drops to `drops`.
    pub fn harvest_vein(
        &mut self,
        cells: &[Cell],
        target: MaterialId,
        drops: &mut DropAccumulator,
    ) -> HarvestOutcome {
        let mut outcome = HarvestOutcome::default();

        for &cell in cells {
            if !self.harvest_cell(cell, target, drops) {
                continue;
            }
            outcome.mined += 1;

            if self.wear_tool() {
                trace!("Tool broke after {} cells", outcome.mined);
                outcome.tool_depleted = true;
                break;
            }
        }

        outcome
    }

    /// Breaks a single cell.
    ///
    /// # Returns
    /// `true` if the cell was cleared
    fn harvest_cell(&mut self, cell: Cell, target: MaterialId, drops: &mut DropAccumulator) -> bool {
        let Some(material) = self
            .world
            .material(cell)
            .filter(|material| material.matches(target))
        else {
            trace!("Skipping {:?}, no longer part of the vein", cell);
            return false;
        };

        let tool = self.actor.held_tool();
        if !self.capabilities.can_harvest(tool.as_ref(), material) {
            trace!("Skipping {:?}, {} cannot be harvested with {:?}", cell, material, tool);
            return false;
        }

        let sub_state = self.world.sub_state(cell).unwrap_or(0);
        let harvested = match self.capabilities.canonical_harvest(material) {
            Some(routine) => routine.harvest(
                &mut *self.world,
                &mut *self.actor,
                cell,
                sub_state,
                &mut *self.rng,
            ),
            None => false,
        };

        if !harvested {
            self.synthesize_drops(material, sub_state, drops);
        }

        self.world.set_material(cell, MaterialId::EMPTY);
        self.world.refresh(cell);
        self.world.notify_neighbors(cell, MaterialId::EMPTY);
        true
    }

    fn synthesize_drops(&mut self, material: MaterialId, sub_state: u32, drops: &mut DropAccumulator) {
        let Some(table) = self.capabilities.drop_table(material) else {
            return;
        };
        let Some(dropped) = table.dropped(sub_state, self.rng) else {
            return;
        };

        let quantity = table.quantity(self.rng);
        drops.add(dropped, table.variant(sub_state), quantity);
    }

    /// Uses up one durability point of the held tool.
    ///
    /// # Returns
    /// `true` if the tool is gone or has no uses left afterwards
    fn wear_tool(&mut self) -> bool {
        let Some(tool) = self.actor.held_tool() else {
            return false;
        };
        if !tool.consumes_durability() {
            return false;
        }

        self.actor.reduce_durability(1);
        self.actor
            .held_tool()
            .map_or(true, |tool| tool.is_depleted())
    }
}
