use test_case::test_case;

use crate::{
    host::ResourceAccess,
    sandbox::MemoryActor,
    server::{
        cost::{charge, check_resources, hunger_cost, INSUFFICIENT_RESOURCE_NOTICE},
        VeinAbort,
    },
};

#[test_case(70, 32, 2)]
#[test_case(10, 32, 0)]
#[test_case(64, 32, 2)]
#[test_case(0, 32, 0)]
#[test_case(500, 0, 0 ; "disabled")]
fn test_hunger_cost(mined: usize, hunger_per_blocks: u32, expected: u32) {
    assert_eq!(hunger_cost(mined, hunger_per_blocks), expected);
}

#[test]
fn test_hungry_actor_is_refused_with_notice() {
    let mut actor = MemoryActor::new().with_food_level(Some(0));

    assert_eq!(check_resources(&mut actor), Err(VeinAbort::InsufficientResource));
    assert_eq!(actor.notices(), &[INSUFFICIENT_RESOURCE_NOTICE.to_string()]);
}

#[test]
fn test_unknown_level_is_refused_silently() {
    let mut actor = MemoryActor::new().with_food_level(None);

    assert_eq!(check_resources(&mut actor), Err(VeinAbort::ResourceUnavailable));
    assert!(actor.notices().is_empty());
}

#[test]
fn test_one_point_is_enough_to_start() {
    let mut actor = MemoryActor::new().with_food_level(Some(1));

    assert_eq!(check_resources(&mut actor), Ok(1));
}

#[test]
fn test_charge_deducts_whole_points() {
    let mut actor = MemoryActor::new();

    assert_eq!(charge(&mut actor, 70, 32), 2);
    assert_eq!(charge(&mut actor, 31, 32), 0);

    assert_eq!(actor.deducted(), 2);
    assert_eq!(actor.resource_level(), Some(18));
}
