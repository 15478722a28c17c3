#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Vein Miner
//!
//! Mines a whole ore vein when a player breaks one block of it while holding an activation
//! key.
//!
//! The crate is split along the network boundary of a block game:
//!
//! ## Key Modules
//!
//! * `client` - Watches the activation key and block breaks, emits requests
//! * `protocol` - The two messages sent from client to authority
//! * `server` - Finds the vein, harvests it, delivers drops and charges hunger
//! * `host` - Traits the hosting game implements to expose its world and players
//! * `voxels` - Cells, material ids and material canonicalization
//! * `core` - Shared-state primitives
//! * `config` - JSON configuration
//! * `sandbox` - An in-memory host used by the demo and the tests
//!
//! ## Usage
//!
//! ```rust
//! use cgmath::Point3;
//! use vein_miner::{
//!     client::ClientSession,
//!     config::VeinConfig,
//!     host::WorldAccess,
//!     sandbox::{pickaxe, standard_registry, Material, MemoryActor, MemoryWorld},
//!     server::VeinMineServer,
//!     voxels::MaterialId,
//! };
//!
//! let config = VeinConfig::default();
//! let registry = standard_registry();
//! let mut world = MemoryWorld::new();
//! world.fill(Point3::new(0, 0, 0), Point3::new(2, 0, 0), Material::CoalOre.id());
//! let mut actor = MemoryActor::new().holding(pickaxe(Material::StonePickaxe).unwrap());
//!
//! let mut client = ClientSession::new(&config);
//! let server = VeinMineServer::new(config);
//! let anchor = Point3::new(0, 0, 0);
//!
//! client.set_key_pressed(true);
//! client.tick(&world, Some(anchor));
//! client.on_block_interact(anchor, &world);
//! world.set_material(anchor, MaterialId::EMPTY);
//!
//! for message in client.tick(&world, Some(anchor)) {
//!     server.handle_payload(1, &message.encode(), &mut world, &mut actor, &registry);
//! }
//! assert_eq!(actor.count_of(Material::Coal.id()), 2);
//! ```

use std::path::PathBuf;

use log::{error, info, LevelFilter};

pub mod client;
pub mod config;
pub mod core;
pub mod demo;
pub mod host;
pub mod protocol;
pub mod sandbox;
pub mod server;
pub mod voxels;

use config::{VeinConfig, CONFIG_FILE_NAME};

/// Entry point of the demo binary.
///
/// Reads the configuration from the path given as the first argument (or
/// [`CONFIG_FILE_NAME`] in the working directory), creating it if it does not exist, and
/// plays one vein mine against the sandbox host.
pub fn run() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .filter_level(LevelFilter::Info)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));

    let config = match VeinConfig::load_or_create(&path) {
        Ok(config) => config,
        Err(err) => {
            error!("Could not load configuration: {}", err);
            return;
        }
    };

    match demo::run_demo(config) {
        Ok(reports) => {
            for report in reports {
                info!("{:?}", report);
            }
        }
        Err(err) => error!("Demo failed: {}", err),
    }
}
