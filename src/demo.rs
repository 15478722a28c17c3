//! # Demo
//!
//! Runs a client session and the authority against the sandbox host, on two threads
//! connected by channels that carry encoded payloads the way a network connection would.
//!
//! ## Flow
//! 1. The main thread plays the client: it holds the activation key, hits an ore block
//!    and breaks it
//! 2. Every message produced by [`ClientSession::tick`] is encoded and sent to the
//!    authority thread
//! 3. The authority decodes each payload, runs vein operations and sends reports back
//! 4. Dropping the payload sender ends the authority thread, which is then joined

use std::{
    sync::mpsc::{channel, Receiver, Sender},
    thread::{self, JoinHandle},
};

use cgmath::Point3;
use log::info;
use thiserror::Error;

use crate::{
    client::ClientSession,
    config::VeinConfig,
    core::MtResource,
    host::{ActorId, WorldAccess},
    sandbox::{pickaxe, standard_registry, Material, MemoryActor, MemoryWorld},
    server::{VeinMineServer, VeinReport},
    voxels::{Cell, MaterialId},
};

/// Actor id of the simulated player.
const PLAYER: ActorId = 1;
/// Seed of the world layout and of the authority's drop rolls.
const DEMO_SEED: u64 = 0x5eed;

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("authority thread is no longer receiving")]
    AuthorityGone,

    #[error("authority thread panicked")]
    AuthorityPanicked,
}

/// A connection from the client to the authority thread.
#[derive(Debug)]
pub struct AuthorityChannel {
    payload_sender: Sender<Vec<u8>>,
    report_receiver: Receiver<VeinReport>,
    worker: JoinHandle<()>,
}

impl AuthorityChannel {
    /// Starts the authority on its own thread.
    pub fn spawn(
        config: VeinConfig,
        world: MtResource<MemoryWorld>,
        actor: MtResource<MemoryActor>,
    ) -> Self {
        let (payload_sender, payload_receiver) = channel::<Vec<u8>>();
        let (report_sender, report_receiver) = channel();

        let worker = thread::spawn(move || {
            let registry = standard_registry();
            let server = VeinMineServer::with_seed(config, DEMO_SEED);
            server.connect(PLAYER);

            for payload in payload_receiver {
                let mut world_guard = world.get_mut();
                let mut actor_guard = actor.get_mut();

                if let Some(report) = server.handle_payload(
                    PLAYER,
                    &payload,
                    &mut *world_guard,
                    &mut *actor_guard,
                    &registry,
                ) {
                    if report_sender.send(report).is_err() {
                        break;
                    }
                }
            }

            if let Some(session) = server.session(PLAYER) {
                info!(
                    "Authority shutting down after {} operations, {} cells mined",
                    session.operations, session.total_mined
                );
            }
        });

        Self {
            payload_sender,
            report_receiver,
            worker,
        }
    }

    pub fn send(&self, payload: Vec<u8>) -> Result<(), DemoError> {
        self.payload_sender
            .send(payload)
            .map_err(|_| DemoError::AuthorityGone)
    }

    /// Closes the connection and waits for the authority to finish.
    ///
    /// # Returns
    /// Every report the authority produced
    pub fn finish(self) -> Result<Vec<VeinReport>, DemoError> {
        drop(self.payload_sender);
        self.worker
            .join()
            .map_err(|_| DemoError::AuthorityPanicked)?;
        Ok(self.report_receiver.try_iter().collect())
    }
}

/// Builds a stone slab with an irregular coal vein and a redstone pocket in it.
///
/// # Returns
/// The world and the cell the player will break
pub fn build_world() -> (MemoryWorld, Cell) {
    let mut world = MemoryWorld::new();
    let mut rng = fastrand::Rng::with_seed(DEMO_SEED);

    world.fill(
        Point3::new(0, 32, 0),
        Point3::new(15, 47, 15),
        Material::Stone.id(),
    );

    let anchor = Point3::new(8, 40, 8);
    let mut cell = anchor;
    for _ in 0..40 {
        world.place(cell, Material::CoalOre.id());
        cell = Point3::new(
            (cell.x + rng.i32(-1..=1)).clamp(1, 14),
            (cell.y + rng.i32(-1..=1)).clamp(33, 46),
            (cell.z + rng.i32(-1..=1)).clamp(1, 14),
        );
    }

    world.fill(
        Point3::new(2, 34, 2),
        Point3::new(3, 35, 3),
        Material::RedstoneOre.id(),
    );
    world.place(Point3::new(2, 34, 3), Material::LitRedstoneOre.id());

    (world, anchor)
}

/// Plays one vein mine from key press to delivered drops.
pub fn run_demo(config: VeinConfig) -> Result<Vec<VeinReport>, DemoError> {
    let (world, anchor) = build_world();
    let ore_before = world.count(Material::CoalOre.id());
    let world = MtResource::new(world);

    let registry = standard_registry();
    let mut player = MemoryActor::new()
        .at(Point3::new(8.5, 48.0, 8.5))
        .with_stack_limits(&registry, [Material::Coal.id(), Material::Redstone.id()]);
    if let Some(tool) = pickaxe(Material::IronPickaxe) {
        player = player.holding(tool);
    }
    let actor = MtResource::new(player);

    let authority = AuthorityChannel::spawn(config.clone(), world.clone(), actor.clone());
    let mut client = ClientSession::new(&config);

    if let Some(greeting) = client.take_greeting() {
        info!("{}", greeting);
    }

    let tick = |client: &mut ClientSession| -> Result<(), DemoError> {
        let outgoing = client.tick(&*world.get(), Some(anchor));
        for message in outgoing {
            authority.send(message.encode())?;
        }
        Ok(())
    };

    client.set_key_pressed(true);
    tick(&mut client)?;

    client.on_block_interact(anchor, &*world.get());
    tick(&mut client)?;

    // The host's own break handling removes the block the player mined.
    world.get_mut().set_material(anchor, MaterialId::EMPTY);
    tick(&mut client)?;

    client.set_key_pressed(false);
    tick(&mut client)?;

    let reports = authority.finish()?;

    let world_guard = world.get();
    let actor_guard = actor.get();
    info!(
        "Coal ore left: {} of {}; inventory holds {} coal, tool durability {:?}",
        world_guard.count(Material::CoalOre.id()),
        ore_before,
        actor_guard.count_of(Material::Coal.id()),
        actor_guard.tool().and_then(|tool| tool.durability)
    );

    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::collect_vein;

    #[test]
    fn test_demo_mines_the_whole_vein() {
        let (world, anchor) = build_world();
        let vein_size = collect_vein(&world, anchor, Material::CoalOre.id(), 1000).len();

        let reports = run_demo(VeinConfig::default()).unwrap();

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].origin, Material::CoalOre.id());
        assert_eq!(reports[0].mined, (vein_size - 1).min(64));
    }
}
