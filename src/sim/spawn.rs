//! Item placement
//!
//! Uniform cell sampling with trail exclusion. Placement is bounded-retry:
//! on a near-full board the sampler gives up after a fixed attempt cap and
//! returns whatever it drew last, which callers tolerate instead of treating
//! as an error.

use rand::Rng;

use super::state::{Cell, Item, ItemKind, Trail};
use crate::consts::*;
use crate::modes::DifficultyProfile;

/// Uniform random cell anywhere on the playfield
pub fn random_cell<R: Rng>(rng: &mut R) -> Cell {
    Cell::new(
        rng.random_range(0..GRID_SIZE),
        rng.random_range(0..GRID_SIZE),
    )
}

/// Sample until the candidate is off the trail, giving up after
/// [`PLACEMENT_ATTEMPT_CAP`] draws and returning the last candidate as-is.
pub fn safe_cell<R: Rng>(rng: &mut R, trail: &Trail) -> Cell {
    let mut attempts = 0;
    loop {
        let candidate = random_cell(rng);
        attempts += 1;
        if !trail.contains(candidate) || attempts >= PLACEMENT_ATTEMPT_CAP {
            return candidate;
        }
    }
}

/// Rebuild the item set for a new consumption cycle.
///
/// Always exactly three water drops, then `hazard_attempts` independent
/// trials that each add one pollution item when a uniform draw clears the
/// mode's bias threshold (lower bias = more expected pollution). The result
/// replaces the previous set wholesale; uncollected leftovers are discarded.
pub fn regenerate_items<R: Rng>(
    rng: &mut R,
    trail: &Trail,
    profile: &DifficultyProfile,
) -> Vec<Item> {
    let mut items = Vec::with_capacity(WATER_ITEMS_PER_SPAWN + profile.hazard_attempts as usize);

    for _ in 0..WATER_ITEMS_PER_SPAWN {
        items.push(Item {
            pos: safe_cell(rng, trail),
            kind: ItemKind::Water,
        });
    }

    for _ in 0..profile.hazard_attempts {
        if rng.random::<f64>() > profile.pollution_bias {
            items.push(Item {
                pos: safe_cell(rng, trail),
                kind: ItemKind::Pollution,
            });
        }
    }

    items
}
