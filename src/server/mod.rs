//! # Server
//!
//! The authority half of vein mining. It receives the payloads sent on
//! [`CHANNEL`](crate::protocol::CHANNEL), keeps one session per connected actor and runs a
//! [`VeinOperation`] for every mine request.
//!
//! ## Key Components
//! - `collector`: priority flood fill that finds the vein
//! - `harvest`: breaks the collected cells and records drops
//! - `drops`: aggregates and delivers drops
//! - `cost`: hunger guard and deduction
//! - `operation`: one request from start to finish
//!
//! Nothing here fails towards the host. Malformed payloads and refused operations are
//! logged and [`VeinMineServer::handle_payload`] returns `None`.

pub mod collector;
pub mod cost;
pub mod drops;
pub mod harvest;
pub mod operation;

#[cfg(test)]
mod tests;

use std::collections::HashMap;

use log::{debug, info, warn};

use crate::{
    config::VeinConfig,
    core::MtResource,
    host::{Actor, ActorId, CapabilityTable, WorldAccess},
    protocol::{Message, MineRequest},
};

pub use collector::{collect_vein, Vein};
pub use operation::{StopReason, VeinAbort, VeinOperation, VeinReport};

/// Authority-side state of one actor.
#[derive(Debug, Clone)]
pub struct ActorSession {
    /// Last key state the client reported.
    pub key_held: bool,
    /// Completed operations.
    pub operations: u64,
    /// Cells mined over all operations.
    pub total_mined: u64,
    rng: fastrand::Rng,
}

impl ActorSession {
    fn new(rng: fastrand::Rng) -> Self {
        Self {
            key_held: false,
            operations: 0,
            total_mined: 0,
            rng,
        }
    }
}

/// Session state shared by every connection of the authority.
pub struct VeinMineServer {
    config: VeinConfig,
    sessions: MtResource<HashMap<ActorId, MtResource<ActorSession>>>,
    seed: Option<u64>,
}

impl VeinMineServer {
    pub fn new(config: VeinConfig) -> Self {
        Self {
            config,
            sessions: MtResource::default(),
            seed: None,
        }
    }

    /// A server whose drop rolls are reproducible, those of harvest routines included.
    /// Each session is seeded from `seed` and its actor id.
    pub fn with_seed(config: VeinConfig, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::new(config)
        }
    }

    pub fn config(&self) -> &VeinConfig {
        &self.config
    }

    /// Opens a session for `actor_id`, keeping an existing one.
    pub fn connect(&self, actor_id: ActorId) -> MtResource<ActorSession> {
        self.sessions
            .get_mut()
            .entry(actor_id)
            .or_insert_with(|| {
                debug!("Opening vein mine session for actor {}", actor_id);
                let rng = match self.seed {
                    Some(seed) => fastrand::Rng::with_seed(seed ^ actor_id),
                    None => fastrand::Rng::new(),
                };
                MtResource::new(ActorSession::new(rng))
            })
            .clone()
    }

    /// Drops the session of `actor_id`.
    pub fn disconnect(&self, actor_id: ActorId) {
        if self.sessions.get_mut().remove(&actor_id).is_some() {
            debug!("Closed vein mine session for actor {}", actor_id);
        }
    }

    /// A snapshot of the session of `actor_id`.
    pub fn session(&self, actor_id: ActorId) -> Option<ActorSession> {
        self.sessions
            .get()
            .get(&actor_id)
            .map(|session| session.get().clone())
    }

    /// Handles one payload received from `actor_id`.
    ///
    /// # Returns
    /// The report of the vein operation, if the payload was a mine request that ran
    pub fn handle_payload(
        &self,
        actor_id: ActorId,
        payload: &[u8],
        world: &mut dyn WorldAccess,
        actor: &mut dyn Actor,
        capabilities: &dyn CapabilityTable,
    ) -> Option<VeinReport> {
        let message = match Message::decode(payload) {
            Ok(message) => message,
            Err(err) => {
                warn!("Dropping payload from actor {}: {}", actor_id, err);
                return None;
            }
        };

        match message {
            Message::KeyState { held } => {
                self.connect(actor_id).get_mut().key_held = held;
                None
            }
            Message::MineRequest(request) => {
                self.handle_request(actor_id, request, world, actor, capabilities)
            }
        }
    }

    /// Runs a vein operation for `request`.
    pub fn handle_request(
        &self,
        actor_id: ActorId,
        request: MineRequest,
        world: &mut dyn WorldAccess,
        actor: &mut dyn Actor,
        capabilities: &dyn CapabilityTable,
    ) -> Option<VeinReport> {
        let handle = self.connect(actor_id);
        let mut session = handle.get_mut();

        if !session.key_held {
            // The client decides when to vein mine; a lost key message must not block it.
            info!(
                "Actor {} requested a vein mine without reporting the key as held",
                actor_id
            );
        }

        let result = VeinOperation::new(&self.config, world, actor, capabilities, &mut session.rng)
            .run(request);

        match result {
            Ok(report) => {
                session.operations += 1;
                session.total_mined += report.mined as u64;
                Some(report)
            }
            Err(abort) => {
                warn!("Vein mine for actor {} aborted: {}", actor_id, abort);
                None
            }
        }
    }
}
