//! # Cost Accountant
//!
//! Vein mining costs hunger: one point per `hunger_per_blocks` cells mined, rounded down.
//! An actor with no hunger left may not start an operation at all.

use log::debug;

use super::operation::VeinAbort;
use crate::host::ResourceAccess;

/// Shown to an actor that is too hungry to vein mine.
pub const INSUFFICIENT_RESOURCE_NOTICE: &str = "[vein-miner] Not enough food to veinmine.";

/// Entry guard, run before anything is collected or changed.
///
/// # Errors
/// * [`VeinAbort::ResourceUnavailable`] if the host cannot report the level; nothing is shown
/// * [`VeinAbort::InsufficientResource`] if the level is below one; the actor is notified
pub fn check_resources<A: ResourceAccess + ?Sized>(actor: &mut A) -> Result<u32, VeinAbort> {
    let level = actor
        .resource_level()
        .ok_or(VeinAbort::ResourceUnavailable)?;

    if level < 1 {
        actor.notify(INSUFFICIENT_RESOURCE_NOTICE);
        return Err(VeinAbort::InsufficientResource);
    }

    Ok(level)
}

/// Hunger points owed for `mined` cells.
///
/// # Examples
///
/// ```
/// use vein_miner::server::cost::hunger_cost;
///
/// assert_eq!(hunger_cost(70, 32), 2);
/// assert_eq!(hunger_cost(10, 32), 0);
/// assert_eq!(hunger_cost(500, 0), 0);
/// ```
pub fn hunger_cost(mined: usize, hunger_per_blocks: u32) -> u32 {
    if hunger_per_blocks == 0 || mined == 0 {
        return 0;
    }
    u32::try_from(mined / hunger_per_blocks as usize).unwrap_or(u32::MAX)
}

/// Deducts the cost of `mined` cells from `actor`.
///
/// # Returns
/// The points charged
pub fn charge<A: ResourceAccess + ?Sized>(actor: &mut A, mined: usize, hunger_per_blocks: u32) -> u32 {
    let points = hunger_cost(mined, hunger_per_blocks);
    if points > 0 {
        debug!("Charging {} hunger for {} cells", points, mined);
        actor.deduct(points);
    }
    points
}
