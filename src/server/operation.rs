//! # Vein Operation
//!
//! One complete vein mine, run synchronously for a single [`MineRequest`]:
//!
//! 1. resolve the origin material from the anchor, or from the client's hint if the anchor
//!    is already empty
//! 2. check the actor's hunger
//! 3. collect the vein
//! 4. harvest it
//! 5. deliver the drops
//! 6. charge hunger for the cells mined

use log::{debug, info};
use thiserror::Error;
use web_time::Instant;

use super::{
    collector::collect_vein,
    cost,
    drops::{self, DeliveryReport, DropAccumulator},
    harvest::HarvestEngine,
};
use crate::{
    config::VeinConfig,
    host::{Actor, CapabilityTable, WorldAccess},
    protocol::MineRequest,
    voxels::{Cell, MaterialId},
};

/// Reasons an operation ends before touching the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VeinAbort {
    #[error("no material at {0:?} and no hint to fall back on")]
    MissingOrigin(Cell),

    #[error("actor resource level is unavailable")]
    ResourceUnavailable,

    #[error("actor has no resource left to spend")]
    InsufficientResource,
}

/// Why harvesting stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Every collected cell was visited.
    Exhausted,
    /// The vein was larger than `max_cells`; the rest is still in the world.
    CapReached,
    /// The held tool broke part way through.
    ToolDepleted,
}

/// Summary of a finished operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VeinReport {
    pub anchor: Cell,
    /// Canonical material of the vein.
    pub origin: MaterialId,
    pub collected: usize,
    pub mined: usize,
    /// Hunger points charged.
    pub hunger: u32,
    pub stop: StopReason,
    pub delivery: DeliveryReport,
}

/// Borrows everything a vein mine touches for the length of one request.
pub struct VeinOperation<'a> {
    config: &'a VeinConfig,
    world: &'a mut dyn WorldAccess,
    actor: &'a mut dyn Actor,
    capabilities: &'a dyn CapabilityTable,
    rng: &'a mut fastrand::Rng,
}

impl<'a> VeinOperation<'a> {
    pub fn new(
        config: &'a VeinConfig,
        world: &'a mut dyn WorldAccess,
        actor: &'a mut dyn Actor,
        capabilities: &'a dyn CapabilityTable,
        rng: &'a mut fastrand::Rng,
    ) -> Self {
        Self {
            config,
            world,
            actor,
            capabilities,
            rng,
        }
    }

    /// Picks the canonical vein material for `request`.
    ///
    /// The live material wins; the hint only covers anchors the client already cleared.
    pub fn resolve_origin(&self, request: &MineRequest) -> Result<MaterialId, VeinAbort> {
        let live = self
            .world
            .material(request.anchor)
            .unwrap_or(MaterialId::EMPTY);

        let origin = if live.is_empty() { request.hint } else { live };
        if origin.is_empty() {
            return Err(VeinAbort::MissingOrigin(request.anchor));
        }
        Ok(origin.canonical())
    }

    /// Runs the whole operation.
    ///
    /// # Errors
    /// A [`VeinAbort`] if the operation was refused before any cell was touched
    pub fn run(self, request: MineRequest) -> Result<VeinReport, VeinAbort> {
        let started = Instant::now();

        let origin = self.resolve_origin(&request)?;
        cost::check_resources(&mut *self.actor)?;

        let vein = collect_vein(&*self.world, request.anchor, origin, self.config.max_cells);
        debug!(
            "Collected {} cells of {} around {:?}",
            vein.len(),
            origin,
            request.anchor
        );

        let mut pending = DropAccumulator::new();
        let outcome = HarvestEngine::new(
            &mut *self.world,
            &mut *self.actor,
            self.capabilities,
            &mut *self.rng,
        )
        .harvest_vein(&vein.cells, origin, &mut pending);

        let delivery = drops::deliver(
            &pending,
            &mut *self.actor,
            self.capabilities,
            self.config.delivery(),
        );
        let hunger = cost::charge(&mut *self.actor, outcome.mined, self.config.hunger_per_blocks);

        let stop = if outcome.tool_depleted {
            StopReason::ToolDepleted
        } else if vein.truncated {
            StopReason::CapReached
        } else {
            StopReason::Exhausted
        };

        info!(
            "Vein mined {} of {} cells of {} at {:?} ({:?}, {} hunger) in {:?}",
            outcome.mined,
            vein.len(),
            origin,
            request.anchor,
            stop,
            hunger,
            started.elapsed()
        );

        Ok(VeinReport {
            anchor: request.anchor,
            origin,
            collected: vein.len(),
            mined: outcome.mined,
            hunger,
            stop,
            delivery,
        })
    }
}
