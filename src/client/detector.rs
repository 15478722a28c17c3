//! # Break Detector
//!
//! Decides when the player has really broken a block while holding the modifier.
//!
//! ## States
//!
//! * `Idle`: nothing is tracked
//! * `Armed { target, recorded }`: the player started hitting `target` with the modifier
//!   held; `recorded` is the last material seen there
//!
//! ## Transitions
//!
//! | From    | Event                                  | To      | Emits         |
//! |---------|----------------------------------------|---------|---------------|
//! | any     | interact at a new cell, modifier held  | `Armed` |               |
//! | any     | interact, modifier released            | `Idle`  |               |
//! | `Armed` | tick, modifier released                | `Idle`  |               |
//! | `Armed` | tick, target still holds material      | `Armed` |               |
//! | `Armed` | tick, target empty, recorded non-empty | `Idle`  | `MineRequest` |
//! | `Armed` | tick, target empty, recorded empty     | `Idle`  |               |
//!
//! A request leaves the detector `Idle`, so one physical break yields at most one request.

use log::debug;

use super::crosshair::CrosshairCache;
use crate::{
    host::MaterialView,
    protocol::MineRequest,
    voxels::{Cell, MaterialId},
};

/// Pending break state of one client session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum BreakState {
    #[default]
    Idle,
    Armed {
        target: Cell,
        recorded: MaterialId,
    },
}

#[derive(Debug, Default)]
pub struct BreakDetector {
    state: BreakState,
}

impl BreakDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> BreakState {
        self.state
    }

    /// Handles the player hitting the block at `cell`.
    ///
    /// # Arguments
    /// * `cell` - The cell the interact event targets
    /// * `held` - Whether the modifier is held
    /// * `world` - The client's view of the world
    /// * `crosshair` - Fallback for blocks that were destroyed instantly
    pub fn on_interact(
        &mut self,
        cell: Cell,
        held: bool,
        world: &dyn MaterialView,
        crosshair: &CrosshairCache,
    ) {
        if !held {
            if self.state != BreakState::Idle {
                debug!("Vein mine target dropped, modifier not held");
            }
            self.state = BreakState::Idle;
            return;
        }

        if matches!(self.state, BreakState::Armed { target, .. } if target == cell) {
            return;
        }

        let live = world.material(cell).unwrap_or(MaterialId::EMPTY);
        let recorded = if live.is_empty() {
            crosshair.material_at(cell).unwrap_or(MaterialId::EMPTY)
        } else {
            live
        };

        debug!("Vein mine armed at {:?} with {}", cell, recorded);
        self.state = BreakState::Armed {
            target: cell,
            recorded,
        };
    }

    /// Runs the per-tick check.
    ///
    /// # Returns
    /// The request to send if the armed block broke during this tick
    pub fn poll(&mut self, held: bool, world: &dyn MaterialView) -> Option<MineRequest> {
        let BreakState::Armed { target, recorded } = self.state else {
            return None;
        };

        if !held {
            debug!("Vein mine cancelled, modifier released");
            self.state = BreakState::Idle;
            return None;
        }

        let live = world.material(target).unwrap_or(MaterialId::EMPTY);
        if !live.is_empty() {
            self.state = BreakState::Armed {
                target,
                recorded: live,
            };
            return None;
        }

        self.state = BreakState::Idle;
        if recorded.is_empty() {
            return None;
        }

        debug!("Block at {:?} broke, requesting vein mine of {}", target, recorded);
        Some(MineRequest {
            anchor: target,
            hint: recorded,
        })
    }

    /// Forgets any pending target.
    pub fn reset(&mut self) {
        self.state = BreakState::Idle;
    }
}
