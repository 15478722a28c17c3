//! # Client
//!
//! The client half of vein mining. It watches the activation key and the player's block
//! interactions and turns "broke a block while holding the key" into a [`MineRequest`]
//! for the authority.
//!
//! A [`ClientSession`] is driven by the host:
//!
//! 1. forward window events with [`ClientSession::intake_input`] (or call
//!    [`ClientSession::set_key_pressed`])
//! 2. report every interact-with-block event with [`ClientSession::on_block_interact`]
//! 3. call [`ClientSession::tick`] once per game tick and send the returned messages
//!
//! [`MineRequest`]: crate::protocol::MineRequest

pub mod activation;
pub mod crosshair;
pub mod detector;

#[cfg(test)]
mod tests;

use winit::event::WindowEvent;

use crate::{
    config::VeinConfig,
    host::MaterialView,
    protocol::Message,
    voxels::Cell,
};

pub use activation::{ActivationTracker, KeyTransition};
pub use crosshair::{CrosshairCache, CrosshairEntry};
pub use detector::{BreakDetector, BreakState};

/// Per-player client state.
#[derive(Debug)]
pub struct ClientSession {
    tracker: ActivationTracker,
    detector: BreakDetector,
    crosshair: CrosshairCache,
    greeted: bool,
}

impl ClientSession {
    pub fn new(config: &VeinConfig) -> Self {
        Self {
            tracker: ActivationTracker::new(config.activation_input),
            detector: BreakDetector::new(),
            crosshair: CrosshairCache::new(),
            greeted: false,
        }
    }

    pub fn intake_input(&mut self, event: &WindowEvent) {
        self.tracker.intake_input(event);
    }

    pub fn set_key_pressed(&mut self, pressed: bool) {
        self.tracker.set_pressed(pressed);
    }

    /// Reports that the player hit the block at `cell`.
    pub fn on_block_interact(&mut self, cell: Cell, world: &dyn MaterialView) {
        self.detector
            .on_interact(cell, self.tracker.is_held(), world, &self.crosshair);
    }

    /// Advances the session by one tick.
    ///
    /// # Arguments
    /// * `world` - The client's view of the world
    /// * `looking_at` - The cell under the crosshair, if any
    ///
    /// # Returns
    /// The messages to send to the authority, in order
    pub fn tick(&mut self, world: &dyn MaterialView, looking_at: Option<Cell>) -> Vec<Message> {
        let mut outgoing = Vec::new();

        if let Some(held) = self.tracker.end_tick() {
            outgoing.push(Message::KeyState { held });
        }

        if let Some(request) = self.detector.poll(self.tracker.is_held(), world) {
            outgoing.push(request.into());
        }

        // Must run after the poll so the cache describes the previous tick.
        self.crosshair.refresh(looking_at, world);

        outgoing
    }

    /// The load notice, returned once per session.
    pub fn take_greeting(&mut self) -> Option<String> {
        if self.greeted {
            return None;
        }
        self.greeted = true;

        Some(format!(
            "{} {} loaded. Hold {:?} + left-click to veinmine.",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            self.tracker.key()
        ))
    }

    pub fn is_key_held(&self) -> bool {
        self.tracker.is_held()
    }

    pub fn break_state(&self) -> BreakState {
        self.detector.state()
    }

    pub fn crosshair(&self) -> &CrosshairCache {
        &self.crosshair
    }
}
