use cgmath::Point3;
use test_case::test_case;

use super::{miner, registry};
use crate::{
    host::ItemStack,
    sandbox::{Material, MemoryActor},
    server::drops::{deliver, split_into_batches, Delivery, DeliveryReport, DropAccumulator},
};

#[test_case(130, 64, vec![64, 64, 2])]
#[test_case(128, 64, vec![64, 64])]
#[test_case(5, 64, vec![5])]
#[test_case(3, 1, vec![1, 1, 1])]
#[test_case(7, 0, vec![1, 1, 1, 1, 1, 1, 1] ; "zero stack size is treated as one")]
fn test_split_into_batches(quantity: u32, max_stack: u32, expected: Vec<u32>) {
    assert_eq!(split_into_batches(quantity, max_stack), expected);
}

#[test]
fn test_accumulator_keeps_first_seen_order() {
    let mut drops = DropAccumulator::new();

    drops.add(Material::Redstone.id(), 0, 4);
    drops.add(Material::Coal.id(), 0, 1);
    drops.add(Material::Redstone.id(), 0, 5);
    drops.add(Material::Diamond.id(), 0, 0);

    let entries: Vec<_> = drops
        .entries()
        .map(|(key, quantity)| (key.material, quantity))
        .collect();
    assert_eq!(
        entries,
        vec![(Material::Redstone.id(), 9), (Material::Coal.id(), 1)]
    );
}

#[test]
fn test_inventory_delivery_stacks_items() {
    let registry = registry();
    let mut actor = miner(&registry);
    let mut drops = DropAccumulator::new();
    drops.add(Material::Redstone.id(), 0, 130);

    let report = deliver(&drops, &mut actor, &registry, Delivery::Inventory);

    assert_eq!(
        report,
        DeliveryReport {
            inserted: 130,
            spawned: 0
        }
    );
    let counts: Vec<u32> = actor.slots().map(|stack| stack.count).collect();
    assert_eq!(counts, vec![64, 64, 2]);
}

#[test]
fn test_overflow_lands_at_actor_position() {
    let registry = registry();
    let position = Point3::new(3.5, 70.0, -8.5);
    let mut actor = MemoryActor::new().at(position).with_filled_slots(35);
    let mut drops = DropAccumulator::new();
    drops.add(Material::Coal.id(), 0, 100);

    let report = deliver(&drops, &mut actor, &registry, Delivery::Inventory);

    assert_eq!(report.inserted, 64);
    assert_eq!(report.spawned, 36);
    assert_eq!(
        actor.spawned(),
        &[(position, ItemStack::new(Material::Coal.id(), 0, 36))]
    );
}

#[test]
fn test_in_place_delivery_spawns_everything() {
    let registry = registry();
    let mut actor = miner(&registry);
    let mut drops = DropAccumulator::new();
    drops.add(Material::Coal.id(), 0, 70);
    drops.add(Material::Redstone.id(), 0, 4);

    let report = deliver(&drops, &mut actor, &registry, Delivery::InPlace);

    assert_eq!(report.inserted, 0);
    assert_eq!(report.spawned, 74);
    let sizes: Vec<u32> = actor.spawned().iter().map(|(_, stack)| stack.count).collect();
    assert_eq!(sizes, vec![64, 6, 4]);
    assert!(actor
        .spawned()
        .iter()
        .all(|(position, _)| *position == Point3::new(0.5, 1.0, 0.5)));
    assert_eq!(actor.slots().count(), 0);
}
