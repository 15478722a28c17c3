use cgmath::Point3;

use super::{empty_world, miner, place_line, registry};
use crate::{
    config::VeinConfig,
    host::{MaterialView, WorldAccess},
    protocol::{Message, MineRequest},
    sandbox::{pickaxe, Material, MemoryActor},
    server::{StopReason, VeinMineServer},
    voxels::MaterialId,
};

const ACTOR: u64 = 7;

fn server(config: VeinConfig) -> VeinMineServer {
    VeinMineServer::with_seed(config, 42)
}

fn request(x: i32, y: i32, z: i32, hint: MaterialId) -> Vec<u8> {
    Message::MineRequest(MineRequest {
        anchor: Point3::new(x, y, z),
        hint,
    })
    .encode()
}

#[test]
fn test_request_after_client_broke_anchor_uses_hint() {
    let mut world = empty_world();
    let registry = registry();
    let mut actor = miner(&registry);
    let server = server(VeinConfig::default());
    place_line(&mut world, Point3::new(0, 0, 0), 5, Material::CoalOre);
    world.set_material(Point3::new(0, 0, 0), MaterialId::EMPTY);

    let report = server
        .handle_payload(
            ACTOR,
            &request(0, 0, 0, Material::CoalOre.id()),
            &mut world,
            &mut actor,
            &registry,
        )
        .unwrap();

    assert_eq!(report.origin, Material::CoalOre.id());
    assert_eq!(report.mined, 4);
    assert_eq!(report.stop, StopReason::Exhausted);
    assert_eq!(actor.count_of(Material::Coal.id()), 4);
}

#[test]
fn test_live_anchor_is_mined_with_the_vein() {
    let mut world = empty_world();
    let registry = registry();
    let mut actor = miner(&registry);
    let server = server(VeinConfig::default());
    place_line(&mut world, Point3::new(0, 0, 0), 5, Material::CoalOre);

    let report = server
        .handle_payload(
            ACTOR,
            &request(0, 0, 0, MaterialId::EMPTY),
            &mut world,
            &mut actor,
            &registry,
        )
        .unwrap();

    assert_eq!(report.mined, 5);
    assert_eq!(world.material(Point3::new(0, 0, 0)), Some(MaterialId::EMPTY));
}

#[test]
fn test_live_material_wins_over_hint() {
    let mut world = empty_world();
    let registry = registry();
    let mut actor = miner(&registry);
    let server = server(VeinConfig::default());
    place_line(&mut world, Point3::new(0, 0, 0), 3, Material::IronOre);

    let report = server
        .handle_payload(
            ACTOR,
            &request(0, 0, 0, Material::CoalOre.id()),
            &mut world,
            &mut actor,
            &registry,
        )
        .unwrap();

    assert_eq!(report.origin, Material::IronOre.id());
    assert_eq!(report.mined, 3);
}

#[test]
fn test_missing_origin_changes_nothing() {
    let mut world = empty_world();
    let registry = registry();
    let mut actor = miner(&registry);
    let server = server(VeinConfig::default());
    place_line(&mut world, Point3::new(1, 0, 0), 3, Material::CoalOre);

    let report = server.handle_payload(
        ACTOR,
        &request(0, 0, 0, MaterialId::EMPTY),
        &mut world,
        &mut actor,
        &registry,
    );

    assert_eq!(report, None);
    assert_eq!(world.count(Material::CoalOre.id()), 3);
    assert!(actor.notices().is_empty());
}

#[test]
fn test_hungry_actor_changes_nothing() {
    let mut world = empty_world();
    let registry = registry();
    let mut actor = miner(&registry).with_food_level(Some(0));
    let server = server(VeinConfig::default());
    place_line(&mut world, Point3::new(0, 0, 0), 3, Material::CoalOre);

    let report = server.handle_payload(
        ACTOR,
        &request(0, 0, 0, MaterialId::EMPTY),
        &mut world,
        &mut actor,
        &registry,
    );

    assert_eq!(report, None);
    assert_eq!(world.count(Material::CoalOre.id()), 3);
    assert_eq!(actor.notices().len(), 1);
    assert_eq!(actor.tool(), miner(&registry).tool());
}

#[test]
fn test_hunger_is_charged_per_block_count() {
    let mut world = empty_world();
    let registry = registry();
    let mut actor = miner(&registry);
    let server = server(VeinConfig {
        max_cells: 100,
        ..Default::default()
    });
    place_line(&mut world, Point3::new(-8, 0, 0), 70, Material::Stone);

    let report = server
        .handle_payload(
            ACTOR,
            &request(-8, 0, 0, MaterialId::EMPTY),
            &mut world,
            &mut actor,
            &registry,
        )
        .unwrap();

    assert_eq!(report.mined, 70);
    assert_eq!(report.hunger, 2);
    assert_eq!(actor.deducted(), 2);
    assert_eq!(actor.count_of(Material::Cobblestone.id()), 70);
}

#[test]
fn test_cap_leaves_rest_of_vein() {
    let mut world = empty_world();
    let registry = registry();
    let mut actor = miner(&registry);
    let server = server(VeinConfig {
        max_cells: 4,
        ..Default::default()
    });
    place_line(&mut world, Point3::new(0, 0, 0), 10, Material::CoalOre);

    let report = server
        .handle_payload(
            ACTOR,
            &request(0, 0, 0, MaterialId::EMPTY),
            &mut world,
            &mut actor,
            &registry,
        )
        .unwrap();

    assert_eq!(report.collected, 4);
    assert_eq!(report.mined, 4);
    assert_eq!(report.stop, StopReason::CapReached);
    assert_eq!(world.count(Material::CoalOre.id()), 6);
    assert_eq!(report.hunger, 0);
}

#[test]
fn test_tool_depletion_is_reported() {
    let mut world = empty_world();
    let registry = registry();
    let mut tool = pickaxe(Material::WoodenPickaxe).unwrap();
    tool.durability = Some(2);
    let mut actor = MemoryActor::new().holding(tool);
    let server = server(VeinConfig::default());
    place_line(&mut world, Point3::new(0, 0, 0), 5, Material::CoalOre);

    let report = server
        .handle_payload(
            ACTOR,
            &request(0, 0, 0, MaterialId::EMPTY),
            &mut world,
            &mut actor,
            &registry,
        )
        .unwrap();

    assert_eq!(report.mined, 2);
    assert_eq!(report.stop, StopReason::ToolDepleted);
    assert_eq!(actor.count_of(Material::Coal.id()), 2);
}

#[test]
fn test_in_place_delivery_follows_config() {
    let mut world = empty_world();
    let registry = registry();
    let mut actor = miner(&registry);
    let server = server(VeinConfig {
        deliver_to_inventory: false,
        ..Default::default()
    });
    place_line(&mut world, Point3::new(0, 0, 0), 3, Material::CoalOre);

    let report = server
        .handle_payload(
            ACTOR,
            &request(0, 0, 0, MaterialId::EMPTY),
            &mut world,
            &mut actor,
            &registry,
        )
        .unwrap();

    assert_eq!(report.delivery.spawned, 3);
    assert_eq!(actor.count_of(Material::Coal.id()), 0);
    assert_eq!(actor.spawned_count_of(Material::Coal.id()), 3);
}

#[test]
fn test_key_state_is_tracked_per_actor() {
    let mut world = empty_world();
    let registry = registry();
    let mut actor = miner(&registry);
    let server = server(VeinConfig::default());
    let held = Message::KeyState { held: true }.encode();

    assert_eq!(
        server.handle_payload(ACTOR, &held, &mut world, &mut actor, &registry),
        None
    );

    assert!(server.session(ACTOR).unwrap().key_held);
    assert!(server.session(ACTOR + 1).is_none());
}

#[test]
fn test_session_totals_accumulate() {
    let mut world = empty_world();
    let registry = registry();
    let mut actor = miner(&registry);
    let server = server(VeinConfig::default());
    place_line(&mut world, Point3::new(0, 0, 0), 3, Material::CoalOre);
    place_line(&mut world, Point3::new(0, 5, 0), 2, Material::CoalOre);

    for y in [0, 5] {
        server.handle_payload(
            ACTOR,
            &request(0, y, 0, MaterialId::EMPTY),
            &mut world,
            &mut actor,
            &registry,
        );
    }

    let session = server.session(ACTOR).unwrap();
    assert_eq!(session.operations, 2);
    assert_eq!(session.total_mined, 5);

    server.disconnect(ACTOR);
    assert!(server.session(ACTOR).is_none());
}

#[test]
fn test_malformed_payload_is_dropped() {
    let mut world = empty_world();
    let registry = registry();
    let mut actor = miner(&registry);
    let server = server(VeinConfig::default());
    place_line(&mut world, Point3::new(0, 0, 0), 3, Material::CoalOre);

    let report = server.handle_payload(ACTOR, &[1, 2, 3], &mut world, &mut actor, &registry);

    assert_eq!(report, None);
    assert_eq!(world.count(Material::CoalOre.id()), 3);
}

#[test]
fn test_legacy_request_mines_live_anchor() {
    let mut world = empty_world();
    let registry = registry();
    let mut actor = miner(&registry);
    let server = server(VeinConfig::default());
    place_line(&mut world, Point3::new(0, 0, 0), 3, Material::CoalOre);
    let legacy = [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];

    let report = server
        .handle_payload(ACTOR, &legacy, &mut world, &mut actor, &registry)
        .unwrap();

    assert_eq!(report.mined, 3);
}

#[test]
fn test_requests_at_coordinate_limits_stay_in_range() {
    let mut world = empty_world();
    let registry = registry();
    let mut actor = miner(&registry);
    let server = server(VeinConfig::default());

    // Broken anchor on the positive edge, one ore left beside it.
    world.place(Point3::new(i32::MAX, 0, 0), MaterialId::EMPTY);
    world.place(Point3::new(i32::MAX - 1, 0, 0), Material::CoalOre.id());
    // Live vein on the negative edge.
    place_line(&mut world, Point3::new(i32::MIN, 0, 0), 2, Material::CoalOre);

    let high = server
        .handle_payload(
            ACTOR,
            &request(i32::MAX, 0, 0, Material::CoalOre.id()),
            &mut world,
            &mut actor,
            &registry,
        )
        .unwrap();
    let low = server
        .handle_payload(
            ACTOR,
            &request(i32::MIN, 0, 0, Material::CoalOre.id()),
            &mut world,
            &mut actor,
            &registry,
        )
        .unwrap();

    assert_eq!(high.mined, 1);
    assert_eq!(low.mined, 2);
    assert_eq!(world.count(Material::CoalOre.id()), 0);
    assert_eq!(actor.count_of(Material::Coal.id()), 3);
}

#[test]
fn test_unloaded_corner_request_mines_nothing() {
    let mut world = empty_world();
    let registry = registry();
    let mut actor = miner(&registry);
    let server = server(VeinConfig::default());

    let report = server
        .handle_payload(
            ACTOR,
            &request(i32::MIN, i32::MAX, i32::MIN, Material::CoalOre.id()),
            &mut world,
            &mut actor,
            &registry,
        )
        .unwrap();

    assert_eq!(report.mined, 0);
}
